use std::fmt::Write;

use serde::Serialize;

use crate::{
    common::{format_grouped, NumberLocale},
    style::{Classification, Rgb},
};

use super::{escape_html, vocab::table_label};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: Rgb,
    pub label: String,
}

/// Color swatches of the active classification, one per class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn build(classification: &Classification, locale: &NumberLocale) -> Self {
        let entries = classification.intervals()
            .zip(&classification.colors)
            .map(|((min, max), &color)| {
                let label = if min == max {
                    format_grouped(min, locale)
                } else {
                    format!("{} – {}", format_grouped(min, locale), format_grouped(max, locale))
                };
                LegendEntry { color, label }
            })
            .collect();

        Legend { title: table_label(classification.attribute).to_string(), entries }
    }

    pub fn to_html(&self) -> String {
        let mut out = format!("<h4>{}</h4>", escape_html(&self.title));
        for entry in &self.entries {
            let _ = write!(
                out,
                "<div><i style=\"background:{}\"></i> {}</div>",
                entry.color,
                escape_html(&entry.label),
            );
        }
        out
    }
}
