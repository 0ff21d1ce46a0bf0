use censomap_core::{FetchError, LayerSource};
use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Retrieves layer documents with `window.fetch`, relative to a base URL.
pub(crate) struct FetchSource {
    base_url: String,
}

impl FetchSource {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    fn url(&self, path: &str) -> String {
        if self.base_url.is_empty() { return path.to_string() }
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

fn transport(path: &str, e: JsValue) -> FetchError {
    let message = e.as_string().unwrap_or_else(|| format!("{e:?}"));
    FetchError::Transport { path: path.to_string(), message }
}

impl LayerSource for FetchSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.url(path);
        let window = web_sys::window()
            .ok_or_else(|| FetchError::Transport { path: url.clone(), message: "no window".into() })?;

        let response: Response = JsFuture::from(window.fetch_with_str(&url)).await
            .and_then(|value| value.dyn_into())
            .map_err(|e| transport(&url, e))?;

        if !response.ok() {
            return Err(FetchError::Status { path: url, status: response.status() })
        }

        let buffer = JsFuture::from(response.array_buffer().map_err(|e| transport(&url, e))?).await
            .map_err(|e| transport(&url, e))?;

        Ok(Uint8Array::new(&buffer).to_vec())
    }
}
