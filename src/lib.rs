/// Tab Tree - Chrome extension popup listing open tabs as a live, sortable list or tree
/// Built with Rust + WASM + Yew

pub mod chrome;
pub mod error;
pub mod operations;
pub mod preferences;
pub mod render;
pub mod router;
pub mod scheduler;
pub mod search;
pub mod site;
pub mod storage;
pub mod tab_data;
pub mod theme;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook and logging for the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
}

// Re-export site extraction for JavaScript access
#[wasm_bindgen]
pub fn extract_site(url: &str) -> String {
    site::extract_site(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
