//! `navguard-session` — session state and the identity-provider boundary.
//!
//! This crate owns the single source of truth for "who is signed in and with
//! what role": the [`SessionState`] singleton, the event feed that tells
//! observers to re-evaluate, and the fail-closed path from provider tokens
//! to a valid [`Identity`].

pub mod events;
pub mod feed;
pub mod identity;
pub mod provider;
pub mod state;

pub use events::SessionEvent;
pub use feed::{SessionFeed, Subscription};
pub use identity::Identity;
pub use provider::{
    AuthError, Credentials, IdentityProvider, IdentityResolutionError, ProviderToken,
    RoleLookupError, RoleStore, TokenValidationError, resolve_identity, validate_token,
};
pub use state::SessionState;
