//! `navguard-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no session state, no
//! policy evaluation, no infrastructure concerns).

pub mod error;
pub mod id;
pub mod roles;

pub use error::{DomainError, DomainResult};
pub use id::SubjectId;
pub use roles::Role;
