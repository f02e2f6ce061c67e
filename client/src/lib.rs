//! # client
//!
//! Leptos + WASM frontend for Tutor Cerdas, the personalized tutoring
//! assistant.
//!
//! This crate contains pages, components, reactive application state, the
//! browser HTTP transport used by the shared `api` crate, and the browser
//! speech and avatar glue used by the voice page.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
