//! Scripted walkthrough of the navigation authorization layer.
//!
//! Wires a stub identity provider and role store to the real session state,
//! policy engine, and router, then replays a typical multi-role session.
//! Run with `RUST_LOG=debug` to see each decision.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use tracing::info;

use navguard_core::{Role, SubjectId};
use navguard_policy::PolicyEngine;
use navguard_router::{Router, default_table};
use navguard_session::{
    AuthError, Credentials, IdentityProvider, ProviderToken, RoleLookupError, RoleStore,
    SessionState, resolve_identity,
};

/// Stand-in for the external identity provider.
struct DemoProvider;

impl IdentityProvider for DemoProvider {
    fn authenticate(&self, credentials: &Credentials) -> Result<ProviderToken, AuthError> {
        let now = Utc::now();
        let (subject, display_name, role) = match credentials.email.as_str() {
            // Vera's token embeds her role claim.
            "vera@example.org" => ("uid-vera", "Vera", Some("volunteer")),
            // Sam's does not; the role store supplies it.
            "sam@example.org" => ("uid-sam", "Sam", None),
            _ => return Err(AuthError::InvalidCredentials),
        };

        Ok(ProviderToken {
            subject: SubjectId::new(subject),
            display_name: display_name.to_string(),
            role: role.map(str::to_string),
            issued_at: now - Duration::minutes(1),
            expires_at: now + Duration::hours(8),
        })
    }
}

/// Stand-in for the role/profile record store.
struct DemoRoles;

impl RoleStore for DemoRoles {
    fn role_for(&self, subject: &SubjectId) -> Result<Role, RoleLookupError> {
        match subject.as_str() {
            "uid-sam" => Ok(Role::Staff),
            _ => Err(RoleLookupError::NotFound),
        }
    }
}

fn sign_in(session: &SessionState, email: &str) -> anyhow::Result<()> {
    let token = DemoProvider
        .authenticate(&Credentials {
            email: email.to_string(),
            secret: "demo".to_string(),
        })
        .context("authentication failed")?;
    let identity = resolve_identity(&token, &DemoRoles, Utc::now())
        .context("identity resolution failed")?;
    session.sign_in(identity);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    navguard_observability::init();

    let table = default_table().context("deployed route table failed validation")?;
    let session = Arc::new(SessionState::new());
    let mut router = Router::new(PolicyEngine::new(table), Arc::clone(&session));

    info!("anonymous visitor tries the staff dashboard");
    let outcome = router.navigate("/staffhome");
    info!(?outcome, "landed");

    info!("vera signs in as a volunteer and tries again");
    sign_in(&session, "vera@example.org")?;
    router.pump();
    let outcome = router.navigate("/staffhome");
    info!(?outcome, "landed");

    let outcome = router.navigate("/profile");
    info!(?outcome, "volunteer profile");

    info!("sam signs in (role comes from the profile store)");
    sign_in(&session, "sam@example.org")?;
    router.pump();
    let outcome = router.navigate("/manage-events");
    info!(?outcome, "staff management view");

    info!("session expires while parked on a gated view");
    session.expire();
    let outcome = router.pump();
    info!(?outcome, "after expiry");

    Ok(())
}
