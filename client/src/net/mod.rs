//! Networking modules for the backend and identity service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` implements the shared `api::Transport` seam for the browser, and
//! `api` builds the typed clients (chat, documents, identity) from the
//! build-time configuration.

pub mod api;
pub mod http;
