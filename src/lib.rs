//! # innova-storefront
//!
//! Leptos + WASM storefront: a login screen and an authenticated product
//! catalog backed by the Innova Dinâmica HTTP API.
//!
//! The crate holds the session store, the keyed fetch cache, the typed API
//! client, and the pages and components that render on top of them. With the
//! `ssr` feature it also builds the axum host that serves the pages.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
#[cfg(feature = "ssr")]
pub mod server;
pub mod state;
pub mod util;

/// WASM entry point: attach the client runtime to the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
