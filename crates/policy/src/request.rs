use serde::{Deserialize, Serialize};

/// A single transition attempt.
///
/// Transient: created per attempt, consumed by the policy engine, never
/// persisted. `origin` is the previous location, absent on initial load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub target: String,
    pub origin: Option<String>,
}

impl NavigationRequest {
    /// A request with no previous location (initial load).
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            origin: None,
        }
    }

    pub fn with_origin(target: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            origin: Some(origin.into()),
        }
    }
}
