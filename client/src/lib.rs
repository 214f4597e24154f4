//! TutorDesk web client.
//!
//! Built twice: as WASM with `hydrate` for the browser and as an rlib with
//! `ssr` for the server host.

pub mod app;
pub mod components;
pub mod hooks;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
