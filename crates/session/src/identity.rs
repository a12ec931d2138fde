use serde::{Deserialize, Serialize};

use navguard_core::{Role, SubjectId};

/// The currently signed-in principal.
///
/// # Invariants
/// - `role` is always a value of the closed role enumeration; an identity
///   carrying an unrecognized role cannot be constructed (resolution refuses
///   it upstream).
/// - Exactly one `Identity` (or none) exists at a time, owned by
///   [`crate::SessionState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: SubjectId,
    pub display_name: String,
    pub role: Role,
}

impl Identity {
    pub fn new(id: SubjectId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role,
        }
    }
}
