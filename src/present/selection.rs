use std::collections::BTreeSet;

use crate::layer::Attribute;

use super::vocab::POPUP_ATTRIBUTES;

/// Attributes chosen for display in census-sector popups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    attributes: BTreeSet<Attribute>,
}

impl Default for Selection {
    /// Everything in the popup vocabulary.
    fn default() -> Self {
        Self { attributes: POPUP_ATTRIBUTES.into_iter().collect() }
    }
}

impl Selection {
    /// Add or remove an attribute. Returns false for attributes outside the popup vocabulary.
    pub fn set(&mut self, attr: Attribute, selected: bool) -> bool {
        if !POPUP_ATTRIBUTES.contains(&attr) { return false }
        if selected { self.attributes.insert(attr); } else { self.attributes.remove(&attr); }
        true
    }

    #[inline]
    pub fn contains(&self, attr: Attribute) -> bool {
        self.attributes.contains(&attr)
    }
}
