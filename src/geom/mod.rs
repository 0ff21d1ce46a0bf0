mod reproject;

use geo::Coord;

pub use reproject::{Reprojector, SOURCE_PROJ4, TARGET_PROJ4};

/// Largest first-axis magnitude of a geographic longitude.
pub const MAX_LONGITUDE: f64 = 180.0;

/// A collection whose sampled coordinate falls outside geographic range is
/// assumed to be in UTM 23S.
#[inline]
pub fn needs_reprojection(sample: Coord<f64>) -> bool {
    sample.x.abs() > MAX_LONGITUDE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_uses_first_axis_magnitude() {
        assert!(!needs_reprojection(Coord { x: -43.65, y: -22.64 }));
        assert!(!needs_reprojection(Coord { x: 180.0, y: 0.0 }));
        assert!(needs_reprojection(Coord { x: -180.5, y: 0.0 }));
        assert!(needs_reprojection(Coord { x: 610_000.0, y: 7_800_000.0 }));
    }
}
