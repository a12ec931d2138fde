//! Route policy data model.

use core::str::FromStr;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use navguard_core::Role;

/// Parameters captured while matching a concrete path against a pattern.
pub type PathParams = BTreeMap<String, String>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("path pattern must start with '/': '{0}'")]
    MissingLeadingSlash(String),

    #[error("path pattern has an empty segment: '{0}'")]
    EmptySegment(String),

    #[error("path pattern has an unnamed parameter segment: '{0}'")]
    UnnamedParameter(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A `/`-segmented path pattern.
///
/// Literal segments match exactly; `:name` segments match any single
/// segment and capture it as a parameter (`/editevent/:id`). Patterns carry
/// no wildcards and no prefix semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// The pattern as written, for display and duplicate detection.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a concrete path, capturing any `:name` parameters.
    ///
    /// A trailing slash on the path is tolerated (`/login/` matches
    /// `/login`); everything else is segment-exact.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let path = if path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };

        let given: Vec<&str> = split_segments(path)?;
        if given.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, value) in self.segments.iter().zip(given) {
            match segment {
                Segment::Literal(lit) if lit == value => {}
                Segment::Literal(_) => return None,
                // An empty segment never satisfies a parameter.
                Segment::Param(_) if value.is_empty() => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), value.to_string());
                }
            }
        }
        Some(params)
    }
}

fn split_segments(path: &str) -> Option<Vec<&str>> {
    let rest = path.strip_prefix('/')?;
    if rest.is_empty() {
        return Some(Vec::new());
    }
    Some(rest.split('/').collect())
}

impl FromStr for PathPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(s.to_string()))?;

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for part in rest.split('/') {
                if part.is_empty() {
                    return Err(PatternError::EmptySegment(s.to_string()));
                }
                if let Some(name) = part.strip_prefix(':') {
                    if name.is_empty() {
                        return Err(PatternError::UnnamedParameter(s.to_string()));
                    }
                    segments.push(Segment::Param(name.to_string()));
                } else {
                    segments.push(Segment::Literal(part.to_string()));
                }
            }
        }

        Ok(Self {
            raw: s.to_string(),
            segments,
        })
    }
}

impl TryFrom<String> for PathPattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PathPattern> for String {
    fn from(value: PathPattern) -> Self {
        value.raw
    }
}

impl core::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Whether a route needs an authenticated session at all.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    RequiresAuth,
}

/// Policy metadata attached to one navigable destination.
///
/// Immutable configuration: loaded once at startup, never mutated at
/// runtime. `allowed_roles` is meaningful only for `RequiresAuth` routes;
/// empty means "any authenticated role".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePolicy {
    pub name: String,
    pub path: PathPattern,
    pub visibility: Visibility,
    #[serde(default)]
    pub allowed_roles: BTreeSet<Role>,
}

impl RoutePolicy {
    /// Would an identity of `role` be allowed to view this route?
    pub fn permits(&self, role: Role) -> bool {
        match self.visibility {
            Visibility::Public => true,
            Visibility::RequiresAuth => {
                self.allowed_roles.is_empty() || self.allowed_roles.contains(&role)
            }
        }
    }
}
