//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod admin;
pub mod home;
pub mod login;
pub mod not_found;
pub mod register;
pub mod speech;
pub mod user;
