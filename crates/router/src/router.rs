use std::sync::Arc;

use tracing::{debug, warn};

use navguard_policy::{Decision, NavigationRequest, PolicyEngine};
use navguard_session::{SessionState, Subscription};

/// Where a navigation attempt ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The location now being rendered (the target itself, or wherever the
    /// policy redirected to).
    Rendered(String),
    /// The target matched no route and the table is configured to surface
    /// that distinctly.
    NotFound(String),
}

impl Outcome {
    pub fn location(&self) -> &str {
        match self {
            Outcome::Rendered(path) | Outcome::NotFound(path) => path,
        }
    }
}

/// Executes policy decisions for a session.
///
/// Navigation is single-flight: requests are handled one at a time, and a
/// redirect supersedes the request that produced it. The router also
/// subscribes to the session feed so that a sign-out or expiry while parked
/// on a gated view redirects away instead of leaving it rendered.
#[derive(Debug)]
pub struct Router {
    engine: PolicyEngine,
    session: Arc<SessionState>,
    events: Subscription,
    current: Option<String>,
}

impl Router {
    pub fn new(engine: PolicyEngine, session: Arc<SessionState>) -> Self {
        let events = session.subscribe();
        Self {
            engine,
            session,
            events,
            current: None,
        }
    }

    /// The location currently rendered, absent before the initial load.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Attempt a transition to `target`.
    pub fn navigate(&mut self, target: impl Into<String>) -> Outcome {
        let target = target.into();
        let request = match &self.current {
            Some(origin) => NavigationRequest::with_origin(target, origin.clone()),
            None => NavigationRequest::new(target),
        };
        self.run(request)
    }

    /// Drain pending session events and re-evaluate the current location.
    ///
    /// Call from the host's event loop after identity-provider callbacks
    /// have been applied to the session. Returns the resulting outcome when
    /// anything had to be re-evaluated.
    pub fn pump(&mut self) -> Option<Outcome> {
        let mut saw_event = false;
        while let Ok(event) = self.events.try_recv() {
            debug!(event_type = event.event_type(), "session event observed");
            saw_event = true;
        }
        if !saw_event {
            return None;
        }

        let current = self.current.clone()?;
        Some(self.run(NavigationRequest::with_origin(current.clone(), current)))
    }

    fn run(&mut self, mut request: NavigationRequest) -> Outcome {
        // Table validation guarantees a redirect's destination proceeds, so
        // one hop suffices; the guard keeps an invalid table from looping.
        let mut hops = 0u8;
        loop {
            match self.engine.evaluate_session(&self.session, &request) {
                Decision::Proceed => {
                    self.current = Some(request.target.clone());
                    return Outcome::Rendered(request.target);
                }
                Decision::NotFound => return Outcome::NotFound(request.target),
                Decision::Redirect(destination) if hops < 2 => {
                    hops += 1;
                    request = NavigationRequest::with_origin(destination, request.target);
                }
                Decision::Redirect(destination) => {
                    warn!(
                        destination,
                        "redirect chain exceeded its bound; parking on the public landing"
                    );
                    let landing = self.engine.table().default_public_landing().to_string();
                    self.current = Some(landing.clone());
                    return Outcome::Rendered(landing);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use navguard_core::{Role, SubjectId};
    use navguard_session::Identity;

    use crate::config::default_table;

    fn setup() -> (Router, Arc<SessionState>) {
        let session = Arc::new(SessionState::new());
        let engine = PolicyEngine::new(default_table().unwrap());
        (Router::new(engine, Arc::clone(&session)), session)
    }

    fn identity(role: Role) -> Identity {
        Identity::new(SubjectId::new("uid-r"), "Robin", role)
    }

    #[test]
    fn initial_load_of_public_route_renders_it() {
        let (mut router, _session) = setup();
        assert_eq!(router.current(), None);

        let outcome = router.navigate("/login");
        assert_eq!(outcome, Outcome::Rendered("/login".to_string()));
        assert_eq!(router.current(), Some("/login"));
    }

    #[test]
    fn anonymous_gated_navigation_lands_on_public_landing() {
        let (mut router, _session) = setup();
        let outcome = router.navigate("/profile");
        assert_eq!(outcome, Outcome::Rendered("/".to_string()));
    }

    #[test]
    fn redirect_supersedes_the_original_request() {
        let (mut router, session) = setup();
        session.sign_in(identity(Role::Volunteer));

        let outcome = router.navigate("/staffhome");
        assert_eq!(outcome, Outcome::Rendered("/volunteerhome".to_string()));
        assert_eq!(router.current(), Some("/volunteerhome"));
    }

    #[test]
    fn pump_is_quiet_without_session_events() {
        let (mut router, _session) = setup();
        router.navigate("/login");
        assert_eq!(router.pump(), None);
    }

    #[test]
    fn sign_out_on_gated_view_redirects_away() {
        let (mut router, session) = setup();
        session.sign_in(identity(Role::Staff));
        router.navigate("/staffhome");

        session.sign_out();
        let outcome = router.pump().unwrap();
        assert_eq!(outcome, Outcome::Rendered("/".to_string()));
        assert_eq!(router.current(), Some("/"));
    }

    #[test]
    fn sign_in_event_leaves_permitted_view_alone() {
        let (mut router, session) = setup();
        router.navigate("/login");

        session.sign_in(identity(Role::Beneficiary));
        let outcome = router.pump().unwrap();
        assert_eq!(outcome, Outcome::Rendered("/login".to_string()));
    }
}
