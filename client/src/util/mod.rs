//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, clipboard, speech,
//! canvas) and pure formatting or routing rules from page and component
//! logic to improve reuse and testability.

pub mod avatar;
pub mod avatar_canvas;
pub mod browser;
pub mod color;
pub mod format;
pub mod markdown;
pub mod route_guard;
pub mod speech_api;
pub mod storage;
