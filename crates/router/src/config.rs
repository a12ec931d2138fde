//! Route table loading.
//!
//! The route table is configuration data the host loads once at startup;
//! the core never persists or mutates it. Any fault (unreadable file,
//! malformed JSON, a table violating the policy invariants) is reported
//! here, before the first navigation request is processed.

use std::path::Path;

use thiserror::Error;

use navguard_policy::{RouteTable, RouteTableConfig, RouteTableError};

/// The deployed route table for the application, embedded so the demo and
/// the tests exercise the same configuration the host ships.
pub const DEFAULT_ROUTES_JSON: &str = include_str!("../config/routes.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read route table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse route table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Table(#[from] RouteTableError),
}

/// Parse a route table configuration without validating it into a table.
pub fn config_from_json(json: &str) -> Result<RouteTableConfig, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse and validate a route table from JSON.
pub fn table_from_json(json: &str) -> Result<RouteTable, ConfigError> {
    Ok(RouteTable::new(config_from_json(json)?)?)
}

/// Parse and validate a route table from a file.
pub fn table_from_path(path: impl AsRef<Path>) -> Result<RouteTable, ConfigError> {
    let json = std::fs::read_to_string(path)?;
    table_from_json(&json)
}

/// The embedded default route table, validated.
pub fn default_table() -> Result<RouteTable, ConfigError> {
    table_from_json(DEFAULT_ROUTES_JSON)
}
