use anyhow::{anyhow, Result};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Hand a value to JS as plain objects.
///
/// Goes through a JSON string since `serde_wasm_bindgen` would turn embedded
/// GeoJSON objects into `Map`s.
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    let json = serde_json::to_string(value)
        .map_err(|e| anyhow!("Failed to serialize value to JSON: {e}"))?;
    js_sys::JSON::parse(&json)
        .map_err(|e| anyhow!("Failed to parse JSON string: {e:?}"))
}
