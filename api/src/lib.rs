//! Client library for the Tutor Cerdas backend and identity service.
//!
//! This crate owns everything the web client and host server share that is not
//! UI: wire DTOs, the URL builder, the [`http::Transport`] seam, the chat and
//! document-admin transports, the identity/profile/history client, the session
//! hub, and the bounded poll utility. It compiles for both `wasm32` and native
//! targets; concrete HTTP stacks live behind `Transport` implementations in the
//! crates that use it.

pub mod chat;
pub mod documents;
pub mod error;
pub mod http;
pub mod identity;
pub mod poll;
pub mod session;
pub mod types;
pub mod url;

#[cfg(test)]
mod testing;

pub use error::{ApiError, TransportError, UploadError};
pub use http::{HttpRequest, HttpResponse, Transport};
