//! Route access decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ProtectedRoute` and the root redirect both consult these pure functions
//! so that every gated page applies identical rules.
//!
//! DESIGN
//! ======
//! Checks run in a fixed order: auth initialization, session presence,
//! profile loading, then role. A missing session therefore always redirects
//! once auth is initialized, whatever the profile state.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use api::types::Role;

use crate::state::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const USER_PATH: &str = "/user";
pub const ADMIN_PATH: &str = "/admin";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    AuthPending,
    RedirectToLogin,
    ProfileLoading,
    Unauthorized,
    Render,
}

pub fn decide_route(auth: &AuthState, required_role: Option<Role>) -> RouteDecision {
    if !auth.initialized {
        return RouteDecision::AuthPending;
    }
    if auth.session.is_none() {
        return RouteDecision::RedirectToLogin;
    }
    if auth.loading_profile {
        return RouteDecision::ProfileLoading;
    }
    match required_role {
        Some(role) if auth.role() != role => RouteDecision::Unauthorized,
        _ => RouteDecision::Render,
    }
}

/// Home page for a signed-in user of `role`.
pub fn home_path(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_PATH,
        Role::User => USER_PATH,
    }
}

/// Where `/` should send the visitor, or `None` while that is not yet known.
pub fn landing_path(auth: &AuthState) -> Option<&'static str> {
    if !auth.initialized {
        return None;
    }
    if auth.session.is_none() {
        return Some(LOGIN_PATH);
    }
    if auth.loading_profile {
        return None;
    }
    Some(home_path(auth.role()))
}
