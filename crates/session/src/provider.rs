//! Identity-provider boundary.
//!
//! The provider authenticates credentials and hands back a token; the
//! role/profile store supplies the role when the token does not embed one.
//! Everything here is fail-closed: any failure on the way from token to
//! [`Identity`] yields an error the caller maps to "signed out", never a
//! partially trusted identity.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use navguard_core::{Role, SubjectId};

use crate::identity::Identity;

/// Credentials presented to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub secret: String,
}

/// Token model (transport-agnostic).
///
/// The minimal set of claims this layer expects once the provider has
/// verified credentials and decoded its token. Signature verification is
/// intentionally outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderToken {
    /// Subject / principal identifier.
    pub subject: SubjectId,

    /// Display name for the signed-in principal.
    pub display_name: String,

    /// Role claim as issued, when the provider embeds one. Left raw so the
    /// closed-enumeration check happens exactly once, during resolution.
    pub role: Option<String>,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Authentication failure reported by the provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("provider unavailable: {0}")]
    Provider(String),
}

/// Role lookup failure from the role/profile store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoleLookupError {
    #[error("no role record for subject")]
    NotFound,

    #[error("role store unavailable: {0}")]
    Store(String),
}

/// Why a token could not be turned into a valid [`Identity`].
///
/// All variants degrade to "unauthenticated" at the caller; none grant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityResolutionError {
    #[error(transparent)]
    Token(#[from] TokenValidationError),

    #[error(transparent)]
    RoleLookup(#[from] RoleLookupError),

    #[error("unrecognized role claim: '{0}'")]
    UnknownRole(String),
}

/// External identity provider.
///
/// Implementations wrap whatever backend actually authenticates (object
/// safety keeps them swappable behind `dyn`).
pub trait IdentityProvider: Send + Sync {
    fn authenticate(&self, credentials: &Credentials) -> Result<ProviderToken, AuthError>;
}

/// Role/profile record store.
///
/// Consulted when the provider's token does not embed a role. The lookup is
/// synchronous and must complete before an identity is considered valid for
/// policy evaluation.
pub trait RoleStore: Send + Sync {
    fn role_for(&self, subject: &SubjectId) -> Result<Role, RoleLookupError>;
}

/// Deterministically validate token claims.
pub fn validate_token(token: &ProviderToken, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if token.expires_at <= token.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < token.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= token.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

/// Resolve a provider token into a valid [`Identity`].
///
/// The embedded role claim wins when present; otherwise the role store is
/// consulted. An unrecognized role string refuses resolution outright: an
/// identity outside the closed enumeration must never reach the policy
/// engine.
pub fn resolve_identity(
    token: &ProviderToken,
    roles: &dyn RoleStore,
    now: DateTime<Utc>,
) -> Result<Identity, IdentityResolutionError> {
    validate_token(token, now)?;

    let role = match &token.role {
        Some(claim) => Role::from_str(claim).map_err(|_| {
            warn!(subject = %token.subject, claim = %claim, "refusing unrecognized role claim");
            IdentityResolutionError::UnknownRole(claim.clone())
        })?,
        None => roles.role_for(&token.subject)?,
    };

    Ok(Identity::new(
        token.subject.clone(),
        token.display_name.clone(),
        role,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    struct FixedRoleStore(Result<Role, RoleLookupError>);

    impl RoleStore for FixedRoleStore {
        fn role_for(&self, _subject: &SubjectId) -> Result<Role, RoleLookupError> {
            self.0.clone()
        }
    }

    fn token(role: Option<&str>) -> ProviderToken {
        let now = Utc::now();
        ProviderToken {
            subject: SubjectId::new("uid-7"),
            display_name: "Noor".to_string(),
            role: role.map(str::to_string),
            issued_at: now - Duration::minutes(5),
            expires_at: now + Duration::hours(1),
        }
    }

    #[test]
    fn embedded_role_claim_wins_over_store() {
        let store = FixedRoleStore(Ok(Role::Staff));
        let identity = resolve_identity(&token(Some("caregiver")), &store, Utc::now()).unwrap();
        assert_eq!(identity.role, Role::Caregiver);
    }

    #[test]
    fn missing_claim_falls_back_to_role_store() {
        let store = FixedRoleStore(Ok(Role::Beneficiary));
        let identity = resolve_identity(&token(None), &store, Utc::now()).unwrap();
        assert_eq!(identity.role, Role::Beneficiary);
    }

    #[test]
    fn unrecognized_role_claim_refuses_resolution() {
        let store = FixedRoleStore(Ok(Role::Staff));
        let err = resolve_identity(&token(Some("admin")), &store, Utc::now()).unwrap_err();
        assert!(matches!(err, IdentityResolutionError::UnknownRole(_)));
    }

    #[test]
    fn role_store_failure_refuses_resolution() {
        let store = FixedRoleStore(Err(RoleLookupError::NotFound));
        let err = resolve_identity(&token(None), &store, Utc::now()).unwrap_err();
        assert!(matches!(err, IdentityResolutionError::RoleLookup(_)));
    }

    #[test]
    fn expired_token_refuses_resolution() {
        let store = FixedRoleStore(Ok(Role::Staff));
        let mut expired = token(Some("staff"));
        expired.expires_at = Utc::now() - Duration::minutes(1);

        let err = resolve_identity(&expired, &store, Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            IdentityResolutionError::Token(TokenValidationError::Expired)
        ));
    }

    #[test]
    fn token_time_window_validation() {
        let now = Utc::now();
        let mut t = token(None);

        t.issued_at = now + Duration::minutes(10);
        t.expires_at = now + Duration::hours(1);
        assert_eq!(
            validate_token(&t, now),
            Err(TokenValidationError::NotYetValid)
        );

        t.issued_at = now;
        t.expires_at = now;
        assert_eq!(
            validate_token(&t, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }
}
