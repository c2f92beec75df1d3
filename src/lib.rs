/// Find Tab - browser extension that opens its popup from a keyboard shortcut
/// Built with Rust + WASM + Yew

pub mod background;
pub mod command;
pub mod error;
mod host;
pub mod keybinding;
pub mod manifest;
pub mod match_pattern;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start listening for the toggle shortcut in the background context
#[wasm_bindgen]
pub fn start_background() -> Result<(), JsValue> {
    background::start().map_err(|e| JsValue::from_str(&e.to_string()))
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Re-export the command identifier for JavaScript access
#[wasm_bindgen]
pub fn toggle_command() -> String {
    command::TOGGLE_POPUP.to_string()
}
