use std::path::PathBuf;

use crate::common::FetchError;

/// Transport for raw layer documents.
///
/// Hosts provide one implementation per environment: the browser binding
/// uses `fetch`, native hosts read from disk or HTTP.
#[allow(async_fn_in_trait)]
pub trait LayerSource {
    /// Fetch the document at `path`, failing on transport errors and non-success statuses.
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError>;
}

/// Reads layer documents relative to a local directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LayerSource for DirSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let full = self.root.join(path);
        std::fs::read(&full).map_err(|e| FetchError::Transport {
            path: full.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Fetches layer documents from a base URL.
#[cfg(feature = "download")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "download")]
impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into() }
    }
}

#[cfg(feature = "download")]
impl LayerSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'));
        let transport = |e: reqwest::Error| FetchError::Transport { path: url.clone(), message: e.to_string() };

        let resp = self.client.get(&url).send().await.map_err(transport)?;
        if !resp.status().is_success() {
            return Err(FetchError::Status { path: url.clone(), status: resp.status().as_u16() })
        }

        Ok(resp.bytes().await.map_err(transport)?.to_vec())
    }
}
