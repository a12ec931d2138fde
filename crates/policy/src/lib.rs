//! `navguard-policy` — the navigation policy engine.
//!
//! Route policies are plain immutable data, loaded once at startup and
//! validated before any navigation is processed. Evaluation is a single
//! pure function over that data plus the current identity: every input
//! yields exactly one [`Decision`], and a produced redirect never evaluates
//! to another redirect under the same identity.

pub mod decision;
pub mod engine;
pub mod request;
pub mod route;
pub mod table;

pub use decision::Decision;
pub use engine::PolicyEngine;
pub use request::NavigationRequest;
pub use route::{PathParams, PathPattern, PatternError, RoutePolicy, Visibility};
pub use table::{RoleHomes, RouteTable, RouteTableConfig, RouteTableError, UnmatchedPolicy};
