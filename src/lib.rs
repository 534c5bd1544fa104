/// Side Stash - save text, links and images into a side panel
/// Built with Rust + WASM + Yew

pub mod background;
pub mod capture;
pub mod chrome;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod i18n;
pub mod item;
pub mod panel;
pub mod probe;
pub mod render;
pub mod store;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Background service worker: context menus and captures
#[wasm_bindgen]
pub fn start_background() {
    background::install();
    log::info!("Side Stash background started");
}

// Content script: track the last right-click target
#[wasm_bindgen]
pub fn start_probe() -> Result<(), JsValue> {
    probe::install()
}

// Start the Yew app for the side panel
#[wasm_bindgen]
pub fn start_side_panel() {
    yew::Renderer::<ui::side_panel::SidePanel>::new().render();
}
