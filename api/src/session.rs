//! Session hub: the client's cached copy of the identity session.
//!
//! DESIGN
//! ======
//! One `SessionHub` is created at app start and handed down explicitly (the
//! UI puts it in context). Components read the current session and subscribe
//! to changes; the returned [`Subscription`] unsubscribes when dropped, so a
//! disposed component can never be called back.
//!
//! Listeners are cloned out of the lock before they run, so a listener may
//! read the hub or subscribe/unsubscribe without deadlocking.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::types::Session;

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// Session restored at startup (possibly `None`).
    InitialSession,
    SignedIn,
    SignedOut,
}

type Listener = dyn Fn(AuthEvent, Option<&Session>) + Send + Sync;

#[derive(Default)]
struct HubInner {
    session: Option<Session>,
    listeners: Vec<(u64, Arc<Listener>)>,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct SessionHub {
    inner: Arc<Mutex<HubInner>>,
}

impl std::fmt::Debug for SessionHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("SessionHub")
            .field("signed_in", &inner.session.is_some())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl SessionHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).session.clone()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.current().map(|s| s.access_token)
    }

    /// Replace the cached session and notify every listener.
    pub fn set(&self, event: AuthEvent, session: Option<Session>) {
        let listeners: Vec<Arc<Listener>> = {
            let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.session.clone_from(&session);
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        tracing::debug!(?event, signed_in = session.is_some(), listeners = listeners.len(), "session changed");
        for listener in listeners {
            listener(event, session.as_ref());
        }
    }

    pub fn subscribe(&self, listener: impl Fn(AuthEvent, Option<&Session>) + Send + Sync + 'static) -> Subscription {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.next_id += 1;
        let id = inner.next_id;
        inner.listeners.push((id, Arc::new(listener)));
        Subscription { hub: Arc::downgrade(&self.inner), id }
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn listener_count(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).listeners.len()
    }
}

/// Handle returned by [`SessionHub::subscribe`]; unsubscribes on drop.
#[derive(Debug)]
pub struct Subscription {
    hub: Weak<Mutex<HubInner>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.lock().unwrap_or_else(PoisonError::into_inner).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
