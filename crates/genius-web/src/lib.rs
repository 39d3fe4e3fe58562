mod app;
mod components;
mod pages;

// The relay and the browser transport only exist on their own side of the wire.
#[cfg(feature = "ssr")]
pub mod server;
#[cfg(feature = "hydrate")]
pub mod transport;

pub use app::App;
pub use components::refresh::PageRefresh;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
