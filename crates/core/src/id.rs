//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of the signed-in principal.
///
/// Subject ids are minted by the external identity provider and are opaque
/// at this layer: stable, comparable, never parsed for structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(Cow<'static, str>);

impl SubjectId {
    pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SubjectId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(DomainError::invalid_id("SubjectId: empty"));
        }
        Ok(Self(Cow::Owned(s.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_id_rejects_empty() {
        assert!("".parse::<SubjectId>().is_err());
        assert!("   ".parse::<SubjectId>().is_err());
    }

    #[test]
    fn subject_id_is_opaque_and_stable() {
        let a: SubjectId = "uid-8f2e".parse().unwrap();
        let b = SubjectId::new("uid-8f2e");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "uid-8f2e");
    }
}
