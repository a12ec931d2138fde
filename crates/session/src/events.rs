use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// Session-change events published on the session feed.
///
/// These originate from the identity-provider collaborator's own outcomes
/// (a successful authentication, an explicit sign-out, a session expiring
/// server-side). Observers re-evaluate any cached navigation decision on
/// each event rather than polling [`crate::SessionState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    SignedIn(Identity),
    SignedOut,
    Expired,
}

impl SessionEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::SignedIn(_) => "session.signed_in",
            SessionEvent::SignedOut => "session.signed_out",
            SessionEvent::Expired => "session.expired",
        }
    }
}
