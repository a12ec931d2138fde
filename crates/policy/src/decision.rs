use serde::{Deserialize, Serialize};

/// Output of policy evaluation. Transient, not persisted.
///
/// `NotFound` is only produced when the route table is configured with
/// [`UnmatchedPolicy::NotFound`](crate::UnmatchedPolicy::NotFound); under
/// the default configuration an unmatched target behaves like a
/// RequiresAuth route instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Let the transition happen.
    Proceed,
    /// Transition to `destination` instead; the caller turns this into a
    /// fresh navigation request.
    Redirect(String),
    /// The target matches no route policy.
    NotFound,
}

impl core::fmt::Display for Decision {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Decision::Proceed => f.write_str("proceed"),
            Decision::Redirect(destination) => write!(f, "redirect -> {destination}"),
            Decision::NotFound => f.write_str("not found"),
        }
    }
}
