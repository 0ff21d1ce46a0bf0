use geo::{Coord, Geometry, MapCoords};
use proj4rs::{proj::Proj as Proj4, transform::transform};

use crate::common::ReprojectError;

/// SIRGAS 2000 / UTM zone 23S: GRS80 ellipsoid, zero datum shift.
pub const SOURCE_PROJ4: &str =
    "+proj=utm +zone=23 +south +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs +type=crs";

/// Geographic lon/lat (degrees at the API, radians inside proj4rs).
pub const TARGET_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";

/// Valid UTM easting span, in meters.
const EASTING_RANGE: std::ops::RangeInclusive<f64> = 0.0..=1_000_000.0;
/// Southern-hemisphere northings run from the pole up to the false northing at the equator.
const NORTHING_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10_000_000.0;

/// Converts UTM 23S easting/northing to lon/lat degrees.
pub struct Reprojector {
    from: Proj4,
    to: Proj4,
}

impl Reprojector {
    pub fn new() -> Result<Self, ReprojectError> {
        Ok(Self { from: build(SOURCE_PROJ4)?, to: build(TARGET_PROJ4)? })
    }

    /// Reproject a single `(x, y)` in meters to `(longitude, latitude)` in degrees.
    ///
    /// Non-finite values and values outside the UTM south easting/northing
    /// span (e.g. a lon/lat pair mixed into a projected layer) are malformed.
    pub fn reproject(&self, coord: Coord<f64>) -> Result<Coord<f64>, ReprojectError> {
        let Coord { x, y } = coord;
        if !EASTING_RANGE.contains(&x) || !NORTHING_RANGE.contains(&y) {
            return Err(ReprojectError::Malformed { x, y })
        }

        // Meters in, radians out.
        let mut point = (x, y, 0.0);
        transform(&self.from, &self.to, &mut point)
            .map_err(|e| ReprojectError::Transform { x, y, reason: e.to_string() })?;

        Ok(Coord { x: point.0.to_degrees(), y: point.1.to_degrees() })
    }

    /// Reproject every coordinate of every ring of a geometry.
    pub fn reproject_geometry(&self, geometry: &Geometry<f64>) -> Result<Geometry<f64>, ReprojectError> {
        geometry.try_map_coords(|coord| self.reproject(coord))
    }
}

fn build(definition: &'static str) -> Result<Proj4, ReprojectError> {
    Proj4::from_proj_string(definition)
        .map_err(|e| ReprojectError::Definition { definition, reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Polygon};

    use super::*;

    const TOLERANCE: f64 = 1e-6;

    #[test]
    fn central_meridian_on_equator() {
        let reprojector = Reprojector::new().unwrap();
        let out = reprojector.reproject(Coord { x: 500_000.0, y: 10_000_000.0 }).unwrap();
        assert!((out.x - -45.0).abs() < TOLERANCE, "lon = {}", out.x);
        assert!(out.y.abs() < TOLERANCE, "lat = {}", out.y);
    }

    #[test]
    fn southern_points_stay_in_zone() {
        let reprojector = Reprojector::new().unwrap();
        let out = reprojector.reproject(Coord { x: 610_000.0, y: 7_800_000.0 }).unwrap();
        assert!((-48.0..=-42.0).contains(&out.x), "lon = {}", out.x);
        assert!((-21.0..=-19.0).contains(&out.y), "lat = {}", out.y);

        let on_meridian = reprojector.reproject(Coord { x: 500_000.0, y: 7_800_000.0 }).unwrap();
        assert!((on_meridian.x - -45.0).abs() < TOLERANCE);
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let reprojector = Reprojector::new().unwrap();
        let err = reprojector.reproject(Coord { x: f64::NAN, y: 7_800_000.0 }).unwrap_err();
        assert!(matches!(err, ReprojectError::Malformed { .. }));
    }

    #[test]
    fn rejects_geographic_pairs() {
        let reprojector = Reprojector::new().unwrap();
        let err = reprojector.reproject(Coord { x: -43.65, y: -22.64 }).unwrap_err();
        assert!(matches!(err, ReprojectError::Malformed { x, .. } if x == -43.65));
    }

    #[test]
    fn maps_every_ring() {
        let reprojector = Reprojector::new().unwrap();
        let square: Polygon<f64> = polygon![
            (x: 600_000.0, y: 7_790_000.0),
            (x: 601_000.0, y: 7_790_000.0),
            (x: 601_000.0, y: 7_791_000.0),
            (x: 600_000.0, y: 7_790_000.0),
        ];
        let Geometry::Polygon(out) = reprojector.reproject_geometry(&Geometry::Polygon(square)).unwrap()
        else { panic!("expected polygon") };

        assert_eq!(out.exterior().0.len(), 4);
        assert!(out.exterior().coords().all(|c| c.x.abs() <= 180.0 && c.y.abs() <= 90.0));
    }
}
