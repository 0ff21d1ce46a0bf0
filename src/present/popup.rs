use std::fmt::Write;

use serde::Serialize;

use crate::{
    common::NumberLocale,
    layer::{Feature, LayerDescriptor, LayerId},
};

use super::{escape_html, selection::Selection, vocab::{format_value, popup_label, POPUP_ATTRIBUTES}};

/// Label/value rows shown when a feature is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub rows: Vec<(String, String)>,
}

impl Popup {
    /// Build the popup for `feature`. Census sectors honour the attribute
    /// selection; other layers use the whole popup vocabulary. Absent values
    /// are left out.
    pub fn build(feature: &Feature, layer: &LayerDescriptor, selection: &Selection, locale: &NumberLocale) -> Self {
        let rows = POPUP_ATTRIBUTES.into_iter()
            .filter(|&attr| layer.id != LayerId::Setores || selection.contains(attr))
            .filter_map(|attr| {
                let label = popup_label(attr)?;
                let value = format_value(Some(attr), feature.properties.get(attr), locale)?;
                Some((label.to_string(), value))
            })
            .collect();

        Popup { title: layer.name.clone(), rows }
    }

    /// Value of the row with `label`, if shown.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows.iter().find(|(l, _)| l == label).map(|(_, v)| v.as_str())
    }

    pub fn to_html(&self) -> String {
        let mut out = format!("<strong>{}</strong>", escape_html(&self.title));
        for (label, value) in &self.rows {
            let _ = write!(out, "<br><b>{}:</b> {}", escape_html(label), escape_html(value));
        }
        out
    }
}
