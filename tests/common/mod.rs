//! Shared fixtures: an in-memory layer source that counts fetches.
#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use censomap::{FetchError, LayerSource};

/// Serves canned documents by path; unknown paths answer 404.
#[derive(Default)]
pub struct MemSource {
    docs: RefCell<HashMap<String, Result<Vec<u8>, u16>>>,
    fetches: RefCell<HashMap<String, usize>>,
    yield_once: Cell<bool>,
}

impl MemSource {
    pub fn new() -> Self { Self::default() }

    pub fn with_doc(self, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.set_doc(path, body);
        self
    }

    pub fn set_doc(&self, path: &str, body: impl Into<Vec<u8>>) {
        self.docs.borrow_mut().insert(path.to_string(), Ok(body.into()));
    }

    pub fn set_status(&self, path: &str, status: u16) {
        self.docs.borrow_mut().insert(path.to_string(), Err(status));
    }

    /// Make every fetch suspend once before answering.
    pub fn yielding(self) -> Self {
        self.yield_once.set(true);
        self
    }

    pub fn fetches(&self, path: &str) -> usize {
        self.fetches.borrow().get(path).copied().unwrap_or(0)
    }
}

impl LayerSource for MemSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        *self.fetches.borrow_mut().entry(path.to_string()).or_default() += 1;
        if self.yield_once.get() {
            YieldNow(false).await;
        }

        match self.docs.borrow().get(path) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status { path: path.to_string(), status: *status }),
            None => Err(FetchError::Status { path: path.to_string(), status: 404 }),
        }
    }
}

/// Returns `Pending` once, waking itself immediately.
struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 { return Poll::Ready(()) }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

/// Census sectors with residents 1..=12, sector 0 carrying the popup fixture values.
pub fn setores_geojson() -> String {
    let features: Vec<String> = (1..=12).map(|i| {
        let x = -43.66 + f64::from(i) * 0.001;
        let extra = if i == 1 {
            r#", "AREA_KM2": 2.34567, "v0005": null, "OBJECTID": 501"#
        } else {
            r#", "AREA_KM2": 0.5, "v0005": 3.1"#
        };
        format!(
            r#"{{"type": "Feature",
                "geometry": {{"type": "Polygon", "coordinates": [[[{x}, -22.64], [{x2}, -22.64], [{x2}, -22.63], [{x}, -22.64]]]}},
                "properties": {{"CD_SETOR": "3302270050000{i:02}", "v0001": {i}{extra}}}}}"#,
            x2 = x + 0.001,
        )
    }).collect();

    format!(r#"{{"type": "FeatureCollection", "features": [{}]}}"#, features.join(","))
}

/// Housing deficit zones in UTM 23S meters.
pub fn deficit_utm_geojson() -> &'static str {
    r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature",
         "geometry": {"type": "MultiPolygon", "coordinates": [[[
            [638000.0, 7496000.0], [639000.0, 7496000.0], [639000.0, 7497000.0], [638000.0, 7496000.0]
         ]]]},
         "properties": {"DEFICIT": 120}}
    ]}"#
}

/// Projected document whose second feature slipped in with lon/lat coordinates.
pub fn deficit_mixed_geojson() -> &'static str {
    r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature",
         "geometry": {"type": "Polygon", "coordinates": [[
            [638000.0, 7496000.0], [639000.0, 7496000.0], [639000.0, 7497000.0], [638000.0, 7496000.0]
         ]]},
         "properties": {"DEFICIT": 120}},
        {"type": "Feature",
         "geometry": {"type": "Polygon", "coordinates": [[
            [-43.65, -22.64], [-43.64, -22.64], [-43.64, -22.63], [-43.65, -22.64]
         ]]},
         "properties": {"DEFICIT": 45}}
    ]}"#
}

/// Residence points already in lon/lat.
pub fn residencias_geojson() -> &'static str {
    r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-43.65, -22.64]}, "properties": {"ENDERECO": "Rua A, 10"}},
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-43.64, -22.65]}, "properties": {"ENDERECO": "Rua B, 22"}}
    ]}"#
}
