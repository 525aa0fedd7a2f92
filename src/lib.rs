//! # chachacatch-client
//!
//! Leptos + WASM frontend for 차차캐치, a university notice and scholarship
//! aggregation service.
//!
//! This crate contains pages, components, application state, and the network
//! layer. The network layer owns the session lifecycle: token persistence,
//! startup verification, the Google OAuth redirect handshake, and transparent
//! single-flight token refresh for expired access tokens.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;

/// WASM entry point: set up logging and mount the application.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(crate::app::App);
}
