use std::sync::RwLock;

use tracing::info;

use crate::events::SessionEvent;
use crate::feed::{SessionFeed, Subscription};
use crate::identity::Identity;

/// Single source of truth for the current signed-in identity.
///
/// Owned explicitly and passed by reference to whatever evaluates policy;
/// there is no ambient global. Mutation is atomic with respect to reads: a
/// reader always observes either the previous identity or the new one,
/// never a half-updated value.
///
/// Every mutation publishes a [`SessionEvent`] so observers can re-evaluate
/// previously computed decisions.
#[derive(Debug, Default)]
pub struct SessionState {
    current: RwLock<Option<Identity>>,
    feed: SessionFeed,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current identity.
    ///
    /// Driven by the identity provider's successful authentication outcome;
    /// this operation itself cannot fail.
    pub fn sign_in(&self, identity: Identity) {
        info!(subject = %identity.id, role = %identity.role, "session sign-in");
        self.replace(Some(identity.clone()));
        self.feed.publish(&SessionEvent::SignedIn(identity));
    }

    /// Clear the current identity.
    pub fn sign_out(&self) {
        info!("session sign-out");
        self.replace(None);
        self.feed.publish(&SessionEvent::SignedOut);
    }

    /// Clear the current identity because the provider reported expiry.
    ///
    /// State-wise identical to [`sign_out`](Self::sign_out); the distinct
    /// event lets observers tell the two apart.
    pub fn expire(&self) {
        info!("session expired");
        self.replace(None);
        self.feed.publish(&SessionEvent::Expired);
    }

    /// Apply a provider-originated session event.
    ///
    /// This is the consuming end of the identity provider's callback feed.
    pub fn apply(&self, event: SessionEvent) {
        match event {
            SessionEvent::SignedIn(identity) => self.sign_in(identity),
            SessionEvent::SignedOut => self.sign_out(),
            SessionEvent::Expired => self.expire(),
        }
    }

    /// Snapshot of the current identity, or `None` when signed out.
    ///
    /// Pure read; the snapshot does not change under later mutations.
    pub fn current(&self) -> Option<Identity> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            // Writers never panic while holding the lock, so poisoning is
            // unreachable; treat it as signed-out rather than propagate.
            Err(_) => None,
        }
    }

    /// Subscribe to session-change notifications.
    pub fn subscribe(&self) -> Subscription {
        self.feed.subscribe()
    }

    fn replace(&self, identity: Option<Identity>) {
        if let Ok(mut guard) = self.current.write() {
            *guard = identity;
        }
    }
}
