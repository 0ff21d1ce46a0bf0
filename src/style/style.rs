use serde::Serialize;

use crate::layer::{Feature, LayerDescriptor, LayerId};

use super::{classify::Classification, color::Rgb};

const BASE_STROKE_WEIGHT: f64 = 2.0;
const BASE_FILL_OPACITY: f64 = 0.3;
const STROKE_OPACITY: f64 = 1.0;

const POINT_RADIUS: f64 = 6.0;
const POINT_STROKE_WEIGHT: f64 = 1.0;
const POINT_FILL_OPACITY: f64 = 0.7;

const THEMATIC_STROKE_WEIGHT: f64 = 1.0;
const THEMATIC_FILL_OPACITY: f64 = 0.7;

const HOVER_STROKE_WEIGHT: f64 = 3.0;
const HOVER_POINT_STROKE_WEIGHT: f64 = 2.0;
const HOVER_POINT_RADIUS: f64 = 8.0;

/// Concrete paint for one rendered feature. Field names follow the map
/// surface's path options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Style {
    #[serde(rename = "fillColor")]
    pub fill_color: Rgb,
    #[serde(rename = "color")]
    pub stroke_color: Rgb,
    #[serde(rename = "weight")]
    pub stroke_weight: f64,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
    #[serde(rename = "opacity")]
    pub stroke_opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Style {
    /// Base paint of a polygon of `layer`.
    pub fn base(layer: &LayerDescriptor) -> Self {
        Style {
            fill_color: layer.color,
            stroke_color: layer.stroke_color(),
            stroke_weight: BASE_STROKE_WEIGHT,
            fill_opacity: BASE_FILL_OPACITY,
            stroke_opacity: STROKE_OPACITY,
            radius: None,
        }
    }

    /// Circle marker paint, identical for every layer but the fill color.
    pub fn point(layer: &LayerDescriptor) -> Self {
        Style {
            fill_color: layer.color,
            stroke_color: Rgb::WHITE,
            stroke_weight: POINT_STROKE_WEIGHT,
            fill_opacity: POINT_FILL_OPACITY,
            stroke_opacity: STROKE_OPACITY,
            radius: Some(POINT_RADIUS),
        }
    }

    /// Choropleth paint with the class color as fill.
    pub fn thematic(fill_color: Rgb, is_point: bool) -> Self {
        Style {
            fill_color,
            stroke_color: Rgb::BLACK,
            stroke_weight: THEMATIC_STROKE_WEIGHT,
            fill_opacity: THEMATIC_FILL_OPACITY,
            stroke_opacity: STROKE_OPACITY,
            radius: is_point.then_some(POINT_RADIUS),
        }
    }

    /// Hover emphasis: white, wider stroke (larger radius for points); fill untouched.
    pub fn highlighted(self) -> Self {
        match self.radius {
            Some(_) => Style {
                stroke_color: Rgb::WHITE,
                stroke_weight: HOVER_POINT_STROKE_WEIGHT,
                radius: Some(HOVER_POINT_RADIUS),
                ..self
            },
            None => Style {
                stroke_color: Rgb::WHITE,
                stroke_weight: HOVER_STROKE_WEIGHT,
                ..self
            },
        }
    }
}

/// Resolve the paint of `feature` in `layer`.
///
/// Hover only changes stroke emphasis on top of whatever the thematic or base
/// rule produces. The thematic rule applies to census sectors only.
pub fn style_for(
    feature: &Feature,
    layer: &LayerDescriptor,
    classification: Option<&Classification>,
    hovered: bool,
) -> Style {
    let style = match classification {
        Some(classification) if layer.id == LayerId::Setores => {
            let fill = classification.color_for(feature.properties.get(classification.attribute));
            Style::thematic(fill, feature.is_point())
        }
        _ if feature.is_point() => Style::point(layer),
        _ => Style::base(layer),
    };

    if hovered { style.highlighted() } else { style }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Geometry, Point};

    use super::*;
    use crate::layer::{AttrKey, AttrValue, Attribute, Properties};
    use crate::style::color::DEFAULT_RAMP;

    fn descriptor(id: LayerId) -> LayerDescriptor {
        LayerDescriptor::defaults().into_iter().find(|d| d.id == id).unwrap()
    }

    fn sector(residents: Option<f64>) -> Feature {
        let square = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)];
        let value = residents.map(AttrValue::Number).unwrap_or(AttrValue::Absent);
        let props: Properties = [(AttrKey::Known(Attribute::Residents), value)].into_iter().collect();
        Feature::new(Geometry::Polygon(square), props)
    }

    fn classification() -> Classification {
        Classification {
            attribute: Attribute::Residents,
            breaks: vec![1.0, 3.0, 5.0, 7.0, 9.0, 12.0],
            colors: DEFAULT_RAMP.to_vec(),
        }
    }

    #[test]
    fn base_polygon_style() {
        let setores = descriptor(LayerId::Setores);
        let style = style_for(&sector(Some(4.0)), &setores, None, false);
        assert_eq!(style, Style {
            fill_color: setores.color,
            stroke_color: setores.color,
            stroke_weight: 2.0,
            fill_opacity: 0.3,
            stroke_opacity: 1.0,
            radius: None,
        });
    }

    #[test]
    fn neighborhoods_are_outlined_in_black() {
        let bairros = descriptor(LayerId::Bairros);
        let style = style_for(&sector(None), &bairros, None, false);
        assert_eq!(style.stroke_color, Rgb::BLACK);
        assert_eq!(style.fill_color, bairros.color);
    }

    #[test]
    fn points_use_fixed_marker() {
        let residencias = descriptor(LayerId::Residencias);
        let point = Feature::new(Geometry::Point(Point::new(-43.65, -22.64)), Properties::new());
        let style = style_for(&point, &residencias, None, false);
        assert_eq!(style.radius, Some(6.0));
        assert_eq!(style.stroke_color, Rgb::WHITE);
        assert_eq!(style.fill_opacity, 0.7);

        let hovered = style_for(&point, &residencias, None, true);
        assert_eq!(hovered.radius, Some(8.0));
        assert_eq!(hovered.fill_color, style.fill_color);
    }

    #[test]
    fn thematic_applies_to_sectors_only() {
        let classification = classification();
        let style = style_for(&sector(Some(4.0)), &descriptor(LayerId::Setores), Some(&classification), false);
        assert_eq!(style.fill_color, DEFAULT_RAMP[1]);
        assert_eq!(style.stroke_color, Rgb::BLACK);
        assert_eq!(style.stroke_weight, 1.0);
        assert_eq!(style.fill_opacity, 0.7);

        let deficit = descriptor(LayerId::DeficitHab);
        let other = style_for(&sector(Some(4.0)), &deficit, Some(&classification), false);
        assert_eq!(other, Style::base(&deficit));
    }

    #[test]
    fn missing_value_is_gray() {
        let classification = classification();
        let style = style_for(&sector(None), &descriptor(LayerId::Setores), Some(&classification), false);
        assert_eq!(style.fill_color, Rgb::MISSING_GRAY);
    }

    #[test]
    fn hover_keeps_fill() {
        let setores = descriptor(LayerId::Setores);
        let active = classification();
        for classification in [None, Some(&active)] {
            let plain = style_for(&sector(Some(10.0)), &setores, classification, false);
            let hovered = style_for(&sector(Some(10.0)), &setores, classification, true);
            assert_eq!(hovered.fill_color, plain.fill_color);
            assert_eq!(hovered.fill_opacity, plain.fill_opacity);
            assert_eq!(hovered.stroke_color, Rgb::WHITE);
            assert!(hovered.stroke_weight > plain.stroke_weight);
        }
    }

    #[test]
    fn serializes_with_path_option_names() {
        let json = serde_json::to_value(Style::base(&descriptor(LayerId::Setores))).unwrap();
        assert_eq!(json["fillColor"], "#1f78b4");
        assert_eq!(json["weight"], 2.0);
        assert!(json.get("radius").is_none());
    }
}
