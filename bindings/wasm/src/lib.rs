use wasm_bindgen::prelude::*;

mod common;
mod fetch;
mod log;
mod viewer;

pub use viewer::WasmViewer;

/// Called automatically when the WASM module is instantiated.
/// Routes panics and tracing output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    log::init();
}
