//! The closed role enumeration used for route authorization.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Principal category.
///
/// The enumeration is closed: the policy engine's per-role home mapping must
/// be total over it, and a `match` keeps that structural. Role values match
/// exactly (set membership, never prefix/substring matching).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Beneficiary,
    Caregiver,
    Volunteer,
    Staff,
}

impl Role {
    /// Every role value, for totality checks over the enumeration.
    pub const ALL: [Role; 4] = [
        Role::Beneficiary,
        Role::Caregiver,
        Role::Volunteer,
        Role::Staff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Beneficiary => "beneficiary",
            Role::Caregiver => "caregiver",
            Role::Volunteer => "volunteer",
            Role::Staff => "staff",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    /// Parse a role value. Unrecognized values are refused (fail-closed)
    /// rather than mapped to some default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beneficiary" => Ok(Role::Beneficiary),
            "caregiver" => Ok(Role::Caregiver),
            "volunteer" => Ok(Role::Volunteer),
            "staff" => Ok(Role::Staff),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}
