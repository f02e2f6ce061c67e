//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the page chrome, the chat and document surfaces, and
//! the voice page avatar while reading/writing shared state from Leptos
//! context providers.

pub mod avatar_stage;
pub mod chat_box;
pub mod chunks_modal;
pub mod document_manager;
pub mod header;
pub mod history_modal;
pub mod loading_screen;
pub mod protected_route;
pub mod top_k_panel;
