//! The route table: immutable policy configuration, validated at startup.
//!
//! A malformed table is a configuration error reported before any
//! navigation is processed; evaluation itself never fails. Validation
//! proves the structural guarantees the engine relies on for termination:
//! the default public landing really is public, and every per-role home is
//! a route that role is permitted to view.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use navguard_core::Role;

use crate::route::{PathParams, RoutePolicy, Visibility};

/// What to do with a target that matches no route policy.
///
/// Silently proceeding is not an option; the fail-closed default treats the
/// unknown target as requiring authentication with no role restriction.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    #[default]
    RequireAuth,
    NotFound,
}

/// Home destination for each role.
///
/// One field per role keeps the mapping total over the closed enumeration:
/// a table simply cannot be written that forgets a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleHomes {
    pub beneficiary: String,
    pub caregiver: String,
    pub volunteer: String,
    pub staff: String,
}

impl RoleHomes {
    pub fn home(&self, role: Role) -> &str {
        match role {
            Role::Beneficiary => &self.beneficiary,
            Role::Caregiver => &self.caregiver,
            Role::Volunteer => &self.volunteer,
            Role::Staff => &self.staff,
        }
    }
}

/// Declarative route table configuration, as loaded by the router host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTableConfig {
    pub routes: Vec<RoutePolicy>,
    pub default_public_landing: String,
    pub role_homes: RoleHomes,
    #[serde(default)]
    pub unmatched: UnmatchedPolicy,
}

/// Startup-time configuration fault in a route table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("route table has no routes")]
    Empty,

    #[error("duplicate route pattern: '{0}'")]
    DuplicatePattern(String),

    #[error("public route '{0}' carries a role restriction")]
    RolesOnPublicRoute(String),

    #[error("default public landing '{0}' matches no route")]
    LandingUnresolved(String),

    #[error("default public landing '{0}' is not a public route")]
    LandingNotPublic(String),

    #[error("home for role '{role}' ('{path}') matches no route")]
    HomeUnresolved { role: Role, path: String },

    #[error("home for role '{role}' ('{path}') is not permitted for that role")]
    HomeNotPermitted { role: Role, path: String },
}

/// Validated, immutable route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RoutePolicy>,
    landing: String,
    homes: RoleHomes,
    unmatched: UnmatchedPolicy,
}

impl RouteTable {
    /// Validate a configuration into a usable table.
    ///
    /// Checks, in order: the table is non-empty, patterns are unique,
    /// role restrictions only appear on RequiresAuth routes, the landing
    /// resolves to a public route, and every role's home resolves to a
    /// route that role may view.
    pub fn new(config: RouteTableConfig) -> Result<Self, RouteTableError> {
        let RouteTableConfig {
            routes,
            default_public_landing,
            role_homes,
            unmatched,
        } = config;

        if routes.is_empty() {
            return Err(RouteTableError::Empty);
        }

        let mut seen = BTreeSet::<String>::new();
        for route in &routes {
            if !seen.insert(route.path.as_str().to_string()) {
                return Err(RouteTableError::DuplicatePattern(
                    route.path.as_str().to_string(),
                ));
            }
            if route.visibility == Visibility::Public && !route.allowed_roles.is_empty() {
                return Err(RouteTableError::RolesOnPublicRoute(route.name.clone()));
            }
        }

        let table = Self {
            routes,
            landing: default_public_landing,
            homes: role_homes,
            unmatched,
        };

        let (landing_policy, _) = table
            .resolve(&table.landing)
            .ok_or_else(|| RouteTableError::LandingUnresolved(table.landing.clone()))?;
        if landing_policy.visibility != Visibility::Public {
            return Err(RouteTableError::LandingNotPublic(table.landing.clone()));
        }

        for role in Role::ALL {
            let path = table.homes.home(role).to_string();
            let (policy, _) = table
                .resolve(&path)
                .ok_or_else(|| RouteTableError::HomeUnresolved {
                    role,
                    path: path.clone(),
                })?;
            if !policy.permits(role) {
                return Err(RouteTableError::HomeNotPermitted { role, path });
            }
        }

        Ok(table)
    }

    /// Resolve a concrete path to its policy, first declared match wins.
    pub fn resolve(&self, path: &str) -> Option<(&RoutePolicy, PathParams)> {
        self.routes
            .iter()
            .find_map(|route| route.path.matches(path).map(|params| (route, params)))
    }

    pub fn default_public_landing(&self) -> &str {
        &self.landing
    }

    pub fn home_for_role(&self, role: Role) -> &str {
        self.homes.home(role)
    }

    pub fn unmatched(&self) -> UnmatchedPolicy {
        self.unmatched
    }

    pub fn routes(&self) -> &[RoutePolicy] {
        &self.routes
    }
}
