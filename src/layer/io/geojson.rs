use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, Geometry, LineString, MultiPolygon, Point, Polygon};
use serde_json::{json, Map, Value};

use crate::layer::{AttrKey, AttrValue, Feature, FeatureCollection, Properties};

/// Export a collection as a GeoJSON FeatureCollection for the map surface.
/// Each feature's `id` is its index in the collection.
pub(crate) fn write_feature_collection(collection: &FeatureCollection) -> Value {
    let features: Vec<Value> = collection.features().iter().enumerate()
        .map(|(idx, feature)| {
            let properties: Map<String, Value> = feature.properties.iter()
                .map(|(key, value)| (key.as_str().to_string(), value_to_json(value)))
                .collect();

            json!({
                "type": "Feature",
                "id": idx,
                "geometry": geometry_to_geojson(&feature.geometry),
                "properties": properties,
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn value_to_json(value: &AttrValue) -> Value {
    match value {
        AttrValue::Number(n) => serde_json::Number::from_f64(*n).map(Value::Number).unwrap_or(Value::Null),
        AttrValue::Text(text) => Value::String(text.to_string()),
        AttrValue::Absent => Value::Null,
    }
}

/// Helper to convert a geometry to a serde_json::Value representing GeoJSON Geometry.
fn geometry_to_geojson(geometry: &Geometry<f64>) -> Value {
    fn ring(ls: &LineString<f64>) -> Vec<[f64; 2]> {
        ls.coords().map(|c| [c.x, c.y]).collect()
    }
    fn rings(polygon: &Polygon<f64>) -> Vec<Vec<[f64; 2]>> {
        std::iter::once(polygon.exterior()).chain(polygon.interiors()).map(ring).collect()
    }

    match geometry {
        Geometry::Point(p) => json!({ "type": "Point", "coordinates": [p.x(), p.y()] }),
        Geometry::Polygon(polygon) => json!({ "type": "Polygon", "coordinates": rings(polygon) }),
        Geometry::MultiPolygon(mp) => json!({
            "type": "MultiPolygon",
            "coordinates": mp.0.iter().map(rings).collect::<Vec<_>>(),
        }),
        _ => Value::Null,
    }
}

/// Read the features of a GeoJSON FeatureCollection document.
pub(crate) fn read_features(bytes: &[u8]) -> Result<Vec<Feature>> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;

    let features = value.get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("document has no 'features' array"))?;

    features.iter().enumerate()
        .map(|(idx, feature)| parse_feature(feature).with_context(|| format!("feature {idx}")))
        .collect()
}

fn parse_feature(feature: &Value) -> Result<Feature> {
    let geometry = feature.get("geometry")
        .filter(|g| !g.is_null())
        .ok_or_else(|| anyhow!("missing geometry"))?;

    let properties = match feature.get("properties") {
        Some(Value::Object(map)) => map.iter()
            .map(|(key, value)| (AttrKey::parse(key), parse_value(value)))
            .collect(),
        _ => Properties::new(),
    };

    Ok(Feature::new(parse_geometry(geometry)?, properties))
}

fn parse_value(value: &Value) -> AttrValue {
    match value {
        Value::Null => AttrValue::Absent,
        Value::Number(n) => n.as_f64().map(AttrValue::Number).unwrap_or(AttrValue::Absent),
        Value::String(s) => AttrValue::Text(Arc::from(s.as_str())),
        Value::Bool(b) => AttrValue::Text(Arc::from(b.to_string())),
        other => AttrValue::Text(Arc::from(other.to_string())),
    }
}

/// Parse a GeoJSON geometry object (Point, Polygon or MultiPolygon).
fn parse_geometry(geometry: &Value) -> Result<Geometry<f64>> {
    let ty = geometry.get("type").and_then(Value::as_str)
        .ok_or_else(|| anyhow!("geometry has no type"))?;
    let coords = geometry.get("coordinates").and_then(Value::as_array)
        .ok_or_else(|| anyhow!("{ty} geometry has no coordinates array"))?;

    Ok(match ty {
        "Point" => Geometry::Point(Point(parse_coord(coords)?)),
        "Polygon" => Geometry::Polygon(parse_polygon_coords(coords)?),
        "MultiPolygon" => Geometry::MultiPolygon(MultiPolygon(
            coords.iter()
                .map(|polygon| {
                    let rings = polygon.as_array()
                        .ok_or_else(|| anyhow!("MultiPolygon member is not an array"))?;
                    parse_polygon_coords(rings)
                })
                .collect::<Result<_>>()?
        )),
        other => bail!("unsupported geometry type '{other}'"),
    })
}

/// Parse polygon rings: `[exterior, hole, hole, ...]`.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        let ring = ring.as_array().ok_or_else(|| anyhow!("polygon ring is not an array"))?;
        parse_ring_coords(ring)
    });

    let exterior = rings.next().ok_or_else(|| anyhow!("polygon has no exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring (exterior or interior). Format: `[[x, y], [x, y], ...]`.
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = coords.iter()
        .map(|pair| pair.as_array()
            .ok_or_else(|| anyhow!("coordinate is not an array"))
            .and_then(|pair| parse_coord(pair)))
        .collect::<Result<Vec<_>>>()?;

    // Ensure ring is closed (first point == last point)
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}

fn parse_coord(pair: &[Value]) -> Result<Coord<f64>> {
    match pair {
        [x, y, ..] => Ok(Coord {
            x: x.as_f64().ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?,
            y: y.as_f64().ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?,
        }),
        _ => bail!("Invalid coordinate: expected at least two numbers, got {}", pair.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Attribute;

    #[test]
    fn reads_polygons_points_and_properties() {
        let doc = br#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature",
                 "geometry": {"type": "Polygon", "coordinates": [[[-43.7, -22.7], [-43.6, -22.7], [-43.6, -22.6]]]},
                 "properties": {"CD_SETOR": "330227005000001", "v0001": 812, "v0005": null, "OBJECTID": 7}},
                {"type": "Feature",
                 "geometry": {"type": "Point", "coordinates": [-43.65, -22.65, 812.0]},
                 "properties": null}
            ]
        }"#;

        let features = read_features(doc).unwrap();
        assert_eq!(features.len(), 2);

        let Geometry::Polygon(polygon) = &features[0].geometry else { panic!("expected polygon") };
        assert_eq!(polygon.exterior().0.len(), 4, "open ring gets closed");

        let props = &features[0].properties;
        assert_eq!(props.get(Attribute::Residents), &AttrValue::Number(812.0));
        assert!(props.get(Attribute::ResidentsPerHousehold).is_absent());
        assert_eq!(props.len(), 4);

        assert!(features[1].is_point());
        assert!(features[1].properties.is_empty());
    }

    #[test]
    fn reads_multipolygons_with_holes() {
        let doc = br#"{"features": [{"geometry": {"type": "MultiPolygon", "coordinates": [
            [[[0,0],[4,0],[4,4],[0,4],[0,0]], [[1,1],[2,1],[2,2],[1,1]]],
            [[[5,5],[6,5],[6,6],[5,5]]]
        ]}, "properties": {}}]}"#;

        let features = read_features(doc).unwrap();
        let Geometry::MultiPolygon(mp) = &features[0].geometry else { panic!("expected multipolygon") };
        assert_eq!(mp.0.len(), 2);
        assert_eq!(mp.0[0].interiors().len(), 1);
    }

    #[test]
    fn written_collection_reads_back() {
        let doc = br#"{"features": [
            {"geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]},
             "properties": {"v0001": 5, "NM_BAIRRO": "Centro", "v0005": null}},
            {"geometry": {"type": "Point", "coordinates": [-43.65, -22.64]}, "properties": {}}
        ]}"#;
        let features = read_features(doc).unwrap();
        let collection = FeatureCollection::new(crate::layer::LayerId::Setores, features.clone());

        let value = write_feature_collection(&collection);
        assert_eq!(value["features"][1]["id"], 1);
        assert_eq!(value["features"][0]["properties"]["NM_BAIRRO"], "Centro");
        assert!(value["features"][0]["properties"]["v0005"].is_null());

        let bytes = serde_json::to_vec(&value).unwrap();
        assert_eq!(read_features(&bytes).unwrap(), features);
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(read_features(b"not json").is_err());
        assert!(read_features(br#"{"type": "Feature"}"#).is_err());
        assert!(read_features(br#"{"features": [{"geometry": null}]}"#).is_err());
        assert!(read_features(br#"{"features": [{"geometry": {"type": "Point", "coordinates": [1]}}]}"#).is_err());
        assert!(read_features(br#"{"features": [{"geometry": {"type": "LineString", "coordinates": [[0,0],[1,1]]}}]}"#).is_err());
    }
}
