//! Equal-count (quantile-like) classification of numeric attribute values.

use crate::layer::{Attribute, AttrValue, FeatureCollection};

use super::color::Rgb;

/// Compute `num_classes + 1` breakpoints spanning `[min, max]` of the finite values.
///
/// Breaks are taken at sorted indices `i * floor(count / num_classes)` for
/// `i` in `1..num_classes`, clamped to the last index. This is not a true
/// quantile method: small or skewed inputs yield repeated breaks, and that
/// is returned as is. Input order does not matter. Returns an empty vector
/// when no finite value remains.
pub fn classify(values: impl IntoIterator<Item = f64>, num_classes: usize) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() || num_classes == 0 { return Vec::new() }
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let step = count / num_classes;

    let mut breaks = Vec::with_capacity(num_classes + 1);
    breaks.push(sorted[0]);
    breaks.extend((1..num_classes).map(|i| sorted[(i * step).min(count - 1)]));
    breaks.push(sorted[count - 1]);
    breaks
}

/// Color for a value given ascending breaks and one color per interval.
///
/// Intervals `[breaks[i], breaks[i + 1]]` are closed on both ends and scanned
/// in ascending order, so a value sitting on an internal break belongs to the
/// lower class. Missing values get [`Rgb::MISSING_GRAY`]; a numeric value no
/// interval contains gets the last color.
pub fn color_for_value(value: Option<f64>, breaks: &[f64], colors: &[Rgb]) -> Rgb {
    let Some(value) = value else { return Rgb::MISSING_GRAY };
    let Some(&last) = colors.last() else { return Rgb::MISSING_GRAY };

    breaks.windows(2)
        .position(|pair| pair[0] <= value && value <= pair[1])
        .map(|class| colors[class.min(colors.len() - 1)])
        .unwrap_or(last)
}

/// The active thematic classification of the census-sector layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub attribute: Attribute,
    pub breaks: Vec<f64>,
    pub colors: Vec<Rgb>,
}

impl Classification {
    /// Classify `attribute` over the features of a loaded collection, one class per ramp color.
    pub fn compute(collection: &FeatureCollection, attribute: Attribute, ramp: &[Rgb]) -> Self {
        let values = collection.features().iter()
            .filter_map(|feature| feature.properties.get(attribute).as_number());

        Self { attribute, breaks: classify(values, ramp.len()), colors: ramp.to_vec() }
    }

    #[inline]
    pub fn color_for(&self, value: &AttrValue) -> Rgb {
        color_for_value(value.as_number(), &self.breaks, &self.colors)
    }

    /// `[min, max]` bounds of each class, in ascending order.
    pub fn intervals(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.breaks.windows(2).map(|pair| (pair[0], pair[1]))
    }
}
