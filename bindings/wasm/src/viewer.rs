use std::rc::Rc;

use censomap_core::{Command, Viewer, ViewerConfig, Vocabulary};
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use crate::{common::*, fetch::FetchSource};

#[wasm_bindgen]
pub struct WasmViewer {
    inner: Rc<Viewer<FetchSource>>,
}

#[wasm_bindgen]
impl WasmViewer {
    /// Construct a viewer from an optional JSON config; missing fields take defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<WasmViewer, JsValue> {
        let config = match config {
            Some(json) => ViewerConfig::from_json(&json).map_err(js_err)?,
            None => ViewerConfig::default(),
        };
        let source = FetchSource::new(config.data_url.clone());
        Ok(WasmViewer { inner: Rc::new(Viewer::new(config, source)) })
    }

    /// The effective configuration: layers, basemaps, ramp and home view.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.session().config()).map_err(js_err)
    }

    /// Labelled choices for the popup attribute checkboxes and the thematic dropdown.
    pub fn vocabulary(&self) -> Result<JsValue, JsValue> {
        to_js(&Vocabulary::default()).map_err(js_err)
    }

    /// Render updates that set up the initial map.
    pub fn start(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.start()).map_err(js_err)
    }

    /// Handle one user action, e.g. `{ type: "show_layer", layer: "setores" }`.
    /// Resolves to the array of render updates to apply.
    pub fn dispatch(&self, command: JsValue) -> Result<js_sys::Promise, JsValue> {
        let command: Command = serde_wasm_bindgen::from_value(command)?;
        let viewer = Rc::clone(&self.inner);

        Ok(wasm_bindgen_futures::future_to_promise(async move {
            let updates = viewer.dispatch(command).await;
            to_js(&updates).map_err(js_err)
        }))
    }
}
