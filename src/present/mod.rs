//! Text and markup renderings of session state: popup, attribute table, legend.

mod legend;
mod popup;
mod selection;
mod table;
mod vocab;

pub use legend::{Legend, LegendEntry};
pub use popup::Popup;
pub use selection::Selection;
pub use table::{AttributeTable, MISSING_VALUE};
pub use vocab::{format_value, popup_label, table_label, Vocabulary, VocabularyEntry, POPUP_ATTRIBUTES};

/// Escape text for inclusion in HTML element content or attribute values.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
