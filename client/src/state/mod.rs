//! Reactive application state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each struct here is plain data wrapped in an `RwSignal` by the component
//! that owns it (or by `App` for shared state). Transition methods are pure
//! so they can be unit tested without a reactive runtime.

pub mod auth;
pub mod chat;
pub mod documents;
pub mod history;
pub mod sources;
pub mod speech;
