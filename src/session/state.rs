use std::{collections::BTreeSet, sync::Arc};

use anyhow::{anyhow, bail, Result};
use tracing::debug;

use crate::{
    config::ViewerConfig,
    layer::{Attribute, FeatureCollection, LayerDescriptor, LayerId, Registry},
    present::{AttributeTable, Legend, Popup, Selection},
    style::{style_for, Classification, Style},
};

use super::command::{Command, RenderUpdate, ZoomStep};

/// All UI state of one viewing session.
///
/// [`Session::handle`] is the only mutation entry point: one call per user
/// action, returning the render updates the host must apply.
#[derive(Debug)]
pub struct Session {
    config: ViewerConfig,
    visible: BTreeSet<LayerId>,
    basemap: String,
    thematic_choice: Option<Attribute>,
    classification: Option<Classification>,
    selection: Selection,
    hovered: Option<(LayerId, usize)>,
    info_open: bool,
    table_open: bool,
}

impl Session {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            basemap: config.initial_basemap.clone(),
            config,
            visible: BTreeSet::new(),
            thematic_choice: None,
            classification: None,
            selection: Selection::default(),
            hovered: None,
            info_open: false,
            table_open: false,
        }
    }

    #[inline] pub fn config(&self) -> &ViewerConfig { &self.config }

    #[inline] pub fn is_visible(&self, layer: LayerId) -> bool { self.visible.contains(&layer) }

    #[inline] pub fn basemap(&self) -> &str { &self.basemap }

    #[inline] pub fn thematic_choice(&self) -> Option<Attribute> { self.thematic_choice }

    #[inline] pub fn classification(&self) -> Option<&Classification> { self.classification.as_ref() }

    #[inline] pub fn selection(&self) -> &Selection { &self.selection }

    #[inline] pub fn hovered(&self) -> Option<(LayerId, usize)> { self.hovered }

    #[inline] pub fn info_open(&self) -> bool { self.info_open }

    #[inline] pub fn table_open(&self) -> bool { self.table_open }

    /// Updates that bring a fresh map surface to the initial state.
    pub fn start(&self) -> Vec<RenderUpdate> {
        let mut updates = Vec::new();
        if let Some(basemap) = self.config.basemap(&self.basemap) {
            updates.push(RenderUpdate::SetBasemap { basemap: basemap.clone() });
        }
        updates.push(self.home_view());
        updates.push(RenderUpdate::SetApplyEnabled { enabled: false });
        updates
    }

    /// Apply one user action.
    ///
    /// `ShowLayer` expects the layer to be in `registry` already; loading is
    /// the caller's job (see [`Viewer`](super::Viewer)).
    pub fn handle(&mut self, registry: &Registry, command: Command) -> Result<Vec<RenderUpdate>> {
        debug!(?command, "handling command");
        match command {
            Command::ShowLayer { layer } => self.show_layer(registry, layer),
            Command::HideLayer { layer } => Ok(self.hide_layer(layer)),
            Command::SelectBasemap { basemap } => self.select_basemap(basemap),
            Command::ToggleAttribute { attribute, selected } => {
                if !self.selection.set(attribute, selected) {
                    bail!("attribute '{attribute}' cannot be shown in popups");
                }
                Ok(Vec::new())
            }
            Command::ChooseThematic { attribute } => self.choose_thematic(attribute),
            Command::ApplyClassification => self.apply_classification(registry),
            Command::ResetClassification => self.reset_classification(registry),
            Command::PointerEnter { layer, feature } => self.pointer_enter(registry, layer, feature),
            Command::PointerLeave { layer, feature } => self.pointer_leave(registry, layer, feature),
            Command::Click { layer, feature } => self.click(registry, layer, feature),
            Command::ZoomIn => Ok(vec![RenderUpdate::Zoom { step: ZoomStep::In }]),
            Command::ZoomOut => Ok(vec![RenderUpdate::Zoom { step: ZoomStep::Out }]),
            Command::Home => Ok(vec![self.home_view()]),
            Command::OpenInfo => {
                self.info_open = true;
                Ok(vec![RenderUpdate::ShowInfo])
            }
            Command::CloseInfo => {
                self.info_open = false;
                Ok(vec![RenderUpdate::HideInfo])
            }
            Command::CloseTable => {
                self.table_open = false;
                Ok(vec![RenderUpdate::HideTable])
            }
            Command::Escape => Ok(self.escape()),
        }
    }

    /// Current paint of every feature of `collection`.
    pub fn styles(&self, collection: &FeatureCollection) -> Result<Vec<Style>> {
        let layer = self.descriptor(collection.layer())?;
        Ok(collection.features().iter().enumerate()
            .map(|(idx, feature)| {
                let hovered = self.hovered == Some((collection.layer(), idx));
                style_for(feature, layer, self.classification.as_ref(), hovered)
            })
            .collect())
    }

    fn descriptor(&self, layer: LayerId) -> Result<&LayerDescriptor> {
        self.config.layer(layer).ok_or_else(|| anyhow!("layer '{layer}' is not configured"))
    }

    fn feature_style(&self, collection: &FeatureCollection, index: usize) -> Result<Style> {
        let feature = collection.get(index)
            .ok_or_else(|| anyhow!("feature {index} out of bounds for layer '{}'", collection.layer()))?;
        let layer = self.descriptor(collection.layer())?;
        let hovered = self.hovered == Some((collection.layer(), index));
        Ok(style_for(feature, layer, self.classification.as_ref(), hovered))
    }

    fn loaded(registry: &Registry, layer: LayerId) -> Result<Arc<FeatureCollection>> {
        registry.get(layer).ok_or_else(|| anyhow!("layer '{layer}' is not loaded"))
    }

    fn show_layer(&mut self, registry: &Registry, layer: LayerId) -> Result<Vec<RenderUpdate>> {
        let collection = Self::loaded(registry, layer)?;
        if self.is_visible(layer) { return Ok(Vec::new()) }

        let styles = self.styles(&collection)?;
        self.visible.insert(layer);

        Ok(vec![
            RenderUpdate::AddLayer { layer, geojson: collection.to_geojson(), styles },
            RenderUpdate::SetLayerChecked { layer, checked: true },
        ])
    }

    fn hide_layer(&mut self, layer: LayerId) -> Vec<RenderUpdate> {
        if !self.visible.remove(&layer) { return Vec::new() }
        if matches!(self.hovered, Some((hovered, _)) if hovered == layer) {
            self.hovered = None;
        }

        let mut updates = vec![
            RenderUpdate::RemoveLayer { layer },
            RenderUpdate::SetLayerChecked { layer, checked: false },
        ];

        // Hiding census sectors drops the thematic map entirely.
        if layer == LayerId::Setores {
            self.classification = None;
            self.thematic_choice = None;
            updates.extend([
                RenderUpdate::ClearLegend,
                RenderUpdate::ResetThematicControls,
                RenderUpdate::SetApplyEnabled { enabled: false },
            ]);
            if self.table_open {
                self.table_open = false;
                updates.push(RenderUpdate::HideTable);
            }
        }

        updates
    }

    fn select_basemap(&mut self, id: String) -> Result<Vec<RenderUpdate>> {
        let basemap = self.config.basemap(&id)
            .ok_or_else(|| anyhow!("unknown basemap '{id}'"))?
            .clone();
        self.basemap = id;
        Ok(vec![RenderUpdate::SetBasemap { basemap }])
    }

    fn choose_thematic(&mut self, attribute: Option<Attribute>) -> Result<Vec<RenderUpdate>> {
        if let Some(attr) = attribute {
            if !attr.is_numeric() {
                bail!("attribute '{attr}' is not numeric and cannot be classified");
            }
        }
        self.thematic_choice = attribute;
        Ok(vec![RenderUpdate::SetApplyEnabled { enabled: attribute.is_some() }])
    }

    fn apply_classification(&mut self, registry: &Registry) -> Result<Vec<RenderUpdate>> {
        let attribute = self.thematic_choice
            .ok_or_else(|| anyhow!("choose an attribute before applying a classification"))?;
        if !self.is_visible(LayerId::Setores) {
            bail!("show the census sectors layer before applying a classification");
        }
        let collection = Self::loaded(registry, LayerId::Setores)?;

        let classification = Classification::compute(&collection, attribute, &self.config.ramp);
        let legend = Legend::build(&classification, &self.config.locale);
        self.classification = Some(classification);

        let styles = self.styles(&collection)?;
        let html = legend.to_html();
        Ok(vec![
            RenderUpdate::Restyle { layer: LayerId::Setores, styles },
            RenderUpdate::ShowLegend { legend, html },
        ])
    }

    fn reset_classification(&mut self, registry: &Registry) -> Result<Vec<RenderUpdate>> {
        self.classification = None;
        self.thematic_choice = None;

        let mut updates = Vec::new();
        if self.is_visible(LayerId::Setores) {
            let collection = Self::loaded(registry, LayerId::Setores)?;
            updates.push(RenderUpdate::Restyle { layer: LayerId::Setores, styles: self.styles(&collection)? });
        }
        updates.extend([
            RenderUpdate::ClearLegend,
            RenderUpdate::ResetThematicControls,
            RenderUpdate::SetApplyEnabled { enabled: false },
        ]);
        Ok(updates)
    }

    fn visible_collection(&self, registry: &Registry, layer: LayerId) -> Result<Arc<FeatureCollection>> {
        if !self.is_visible(layer) {
            bail!("layer '{layer}' is not visible");
        }
        Self::loaded(registry, layer)
    }

    fn pointer_enter(&mut self, registry: &Registry, layer: LayerId, feature: usize) -> Result<Vec<RenderUpdate>> {
        let collection = self.visible_collection(registry, layer)?;
        if feature >= collection.len() {
            bail!("feature {feature} out of bounds for layer '{layer}'");
        }

        let mut updates = Vec::new();
        if let Some((prev_layer, prev)) = self.hovered.replace((layer, feature)) {
            if (prev_layer, prev) != (layer, feature) {
                if let Some(prev_collection) = registry.get(prev_layer).filter(|_| self.is_visible(prev_layer)) {
                    updates.push(RenderUpdate::SetFeatureStyle {
                        layer: prev_layer,
                        feature: prev,
                        style: self.feature_style(&prev_collection, prev)?,
                    });
                }
            }
        }

        updates.push(RenderUpdate::SetFeatureStyle { layer, feature, style: self.feature_style(&collection, feature)? });
        Ok(updates)
    }

    fn pointer_leave(&mut self, registry: &Registry, layer: LayerId, feature: usize) -> Result<Vec<RenderUpdate>> {
        if self.hovered == Some((layer, feature)) {
            self.hovered = None;
        }
        let collection = self.visible_collection(registry, layer)?;
        Ok(vec![RenderUpdate::SetFeatureStyle { layer, feature, style: self.feature_style(&collection, feature)? }])
    }

    fn click(&mut self, registry: &Registry, layer: LayerId, index: usize) -> Result<Vec<RenderUpdate>> {
        let collection = self.visible_collection(registry, layer)?;
        let feature = collection.get(index)
            .ok_or_else(|| anyhow!("feature {index} out of bounds for layer '{layer}'"))?;

        let popup = Popup::build(feature, self.descriptor(layer)?, &self.selection, &self.config.locale);
        let html = popup.to_html();
        let mut updates = vec![RenderUpdate::ShowPopup { layer, feature: index, popup, html }];

        if layer == LayerId::Setores {
            let table = AttributeTable::build(feature, &self.config.locale);
            let html = table.to_html();
            self.table_open = true;
            updates.push(RenderUpdate::ShowTable { table, html });
        }

        Ok(updates)
    }

    fn escape(&mut self) -> Vec<RenderUpdate> {
        let mut updates = Vec::new();
        if std::mem::take(&mut self.info_open) {
            updates.push(RenderUpdate::HideInfo);
        }
        if std::mem::take(&mut self.table_open) {
            updates.push(RenderUpdate::HideTable);
        }
        updates
    }

    fn home_view(&self) -> RenderUpdate {
        let home = self.config.home;
        RenderUpdate::SetView { lat: home.lat, lon: home.lon, zoom: home.zoom }
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Geometry};

    use super::*;
    use crate::layer::{AttrKey, AttrValue, Feature, Properties};

    fn registry_with_sectors() -> Registry {
        let square = polygon![(x: -43.66, y: -22.64), (x: -43.65, y: -22.64), (x: -43.65, y: -22.63), (x: -43.66, y: -22.64)];
        let props: Properties = [(AttrKey::Known(Attribute::Residents), AttrValue::Number(120.0))].into_iter().collect();
        let mut registry = Registry::default();
        registry.insert(Arc::new(FeatureCollection::new(
            LayerId::Setores,
            vec![Feature::new(Geometry::Polygon(square), props)],
        )));
        registry
    }

    #[test]
    fn reset_reports_missing_sector_collection() {
        let mut session = Session::new(ViewerConfig::default());
        session.handle(&registry_with_sectors(), Command::ShowLayer { layer: LayerId::Setores }).unwrap();

        let err = session.handle(&Registry::default(), Command::ResetClassification).unwrap_err();
        assert!(err.to_string().contains("not loaded"), "{err}");
        assert!(session.classification().is_none());
    }

    #[test]
    fn apply_requires_visible_sectors() {
        let registry = registry_with_sectors();
        let mut session = Session::new(ViewerConfig::default());
        session.handle(&registry, Command::ChooseThematic { attribute: Some(Attribute::Residents) }).unwrap();

        assert!(session.handle(&registry, Command::ApplyClassification).is_err());
        assert!(session.classification().is_none());

        session.handle(&registry, Command::ShowLayer { layer: LayerId::Setores }).unwrap();
        let updates = session.handle(&registry, Command::ApplyClassification).unwrap();
        assert!(matches!(updates[0], RenderUpdate::Restyle { layer: LayerId::Setores, .. }));
        assert!(session.classification().is_some());
    }
}
