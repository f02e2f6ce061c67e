//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard, the header, and every page that needs a bearer
//! token. `App` mirrors the `SessionHub` into this struct and loads the
//! profile once per session change.
//!
//! DESIGN
//! ======
//! Every session change bumps `generation`. A profile fetch remembers the
//! generation it started under and is discarded by [`AuthState::apply_profile`]
//! if the session changed meanwhile, so a slow fetch for a previous user can
//! never overwrite the current profile.
//!
//! A persisted session past its expiry is never published as-is: startup
//! either refreshes it or publishes a signed-out state.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use api::types::{Profile, Role, Session, display_name};

/// What startup does with the session found in storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Restore {
    /// Publish this value directly.
    Publish(Option<Session>),
    /// Exchange this refresh token first; publish the result or `None`.
    Refresh(String),
}

/// Decide how a stored session is restored at `now_secs`.
pub fn restore_plan(stored: Option<Session>, now_secs: i64) -> Restore {
    match stored {
        Some(session) if session.is_expired(now_secs) => match session.refresh_token {
            Some(token) if !token.is_empty() => Restore::Refresh(token),
            _ => Restore::Publish(None),
        },
        other => Restore::Publish(other),
    }
}

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub session: Option<Session>,
    /// Set once the persisted session has been restored at startup.
    pub initialized: bool,
    pub profile: Option<Profile>,
    pub loading_profile: bool,
    pub generation: u64,
}

impl AuthState {
    /// Replace the session and drop the previous profile. Returns the new
    /// generation to key the profile fetch with.
    pub fn apply_session(&mut self, session: Option<Session>) -> u64 {
        self.generation += 1;
        self.initialized = true;
        self.loading_profile = session.is_some();
        self.profile = None;
        self.session = session;
        self.generation
    }

    /// Store a fetched profile if `generation` is still current.
    pub fn apply_profile(&mut self, generation: u64, profile: Option<Profile>) -> bool {
        if generation != self.generation || self.session.is_none() {
            return false;
        }
        self.profile = profile;
        self.loading_profile = false;
        true
    }

    pub fn signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn access_token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.access_token.clone())
    }

    /// Role with the `user` default applied.
    pub fn role(&self) -> Role {
        self.profile.as_ref().map(Profile::role).unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    pub fn display_name(&self) -> String {
        display_name(self.profile.as_ref(), self.session.as_ref())
    }
}
