use std::fmt::Write;

use serde::Serialize;

use crate::{
    common::NumberLocale,
    layer::{AttrKey, Feature},
};

use super::{escape_html, vocab::{format_value, table_label}};

/// Placeholder for attributes present on the feature without a value.
pub const MISSING_VALUE: &str = "-";

/// Full attribute listing of a census sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeTable {
    pub rows: Vec<(String, String)>,
}

impl AttributeTable {
    /// Every property of the feature in document order, except the geometry field.
    /// Keys outside the vocabulary are labelled with the raw key.
    pub fn build(feature: &Feature, locale: &NumberLocale) -> Self {
        let rows = feature.properties.iter()
            .filter(|(key, _)| !key.as_str().eq_ignore_ascii_case("geometry"))
            .map(|(key, value)| {
                let (label, attr) = match key {
                    AttrKey::Known(attr) => (table_label(*attr).to_string(), Some(*attr)),
                    AttrKey::Raw(raw) => (raw.to_string(), None),
                };
                let text = format_value(attr, value, locale).unwrap_or_else(|| MISSING_VALUE.to_string());
                (label, text)
            })
            .collect();

        AttributeTable { rows }
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows.iter().find(|(l, _)| l == label).map(|(_, v)| v.as_str())
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from("<table class=\"attr-table\"><tbody>");
        for (label, value) in &self.rows {
            let _ = write!(out, "<tr><th>{}</th><td>{}</td></tr>", escape_html(label), escape_html(value));
        }
        out.push_str("</tbody></table>");
        out
    }
}
