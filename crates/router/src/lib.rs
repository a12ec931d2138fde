//! `navguard-router` — the router-host harness.
//!
//! The engine only returns decisions; something has to execute them. This
//! crate owns that loop: it feeds navigation requests to the policy engine,
//! performs the resulting transition or redirect, and re-evaluates the
//! current location whenever the session changes.

pub mod config;
pub mod router;

pub use config::{ConfigError, config_from_json, default_table, table_from_json, table_from_path};
pub use router::{Outcome, Router};
