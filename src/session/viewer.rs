use std::cell::{Ref, RefCell};

use tracing::{debug, error};

use crate::{
    common::LoadError,
    config::ViewerConfig,
    layer::{LayerId, LayerLoader, LayerSource},
};

use super::{command::{Command, RenderUpdate}, state::Session};

/// A session paired with the loader that feeds it.
///
/// This is the top level of event handling: every failure, whether a load
/// error or a command error, is logged and turned into a notification plus
/// a hidden loading indicator. Nothing is retried.
pub struct Viewer<S> {
    session: RefCell<Session>,
    loader: LayerLoader<S>,
}

impl<S: LayerSource> Viewer<S> {
    pub fn new(config: ViewerConfig, source: S) -> Self {
        let loader = LayerLoader::new(source, &config.layers);
        Self { session: RefCell::new(Session::new(config)), loader }
    }

    #[inline] pub fn session(&self) -> Ref<'_, Session> { self.session.borrow() }

    #[inline] pub fn loader(&self) -> &LayerLoader<S> { &self.loader }

    /// Initial basemap and view.
    pub fn start(&self) -> Vec<RenderUpdate> {
        self.session.borrow().start()
    }

    /// Process one user action. Showing a layer awaits its load first; all
    /// other commands complete synchronously.
    pub async fn dispatch(&self, command: Command) -> Vec<RenderUpdate> {
        match command {
            Command::ShowLayer { layer } => self.show_layer(layer).await,
            other => self.run(other),
        }
    }

    async fn show_layer(&self, layer: LayerId) -> Vec<RenderUpdate> {
        let mut updates = vec![RenderUpdate::SetLoading { visible: true }];

        match self.loader.load(layer).await {
            Ok(_) => updates.extend(self.run(Command::ShowLayer { layer })),
            Err(LoadError::InProgress { .. }) => {
                debug!(layer = %layer, "layer already loading, ignoring repeated request");
                return Vec::new();
            }
            Err(e) => {
                error!(layer = %layer, error = %e, "layer load failed");
                updates.push(RenderUpdate::Notify { message: e.to_string() });
                updates.push(RenderUpdate::SetLayerChecked { layer, checked: false });
            }
        }

        updates.push(RenderUpdate::SetLoading { visible: false });
        updates
    }

    fn run(&self, command: Command) -> Vec<RenderUpdate> {
        let registry = self.loader.registry();
        match self.session.borrow_mut().handle(&registry, command) {
            Ok(updates) => updates,
            Err(e) => {
                error!(error = %format!("{e:#}"), "command failed");
                vec![
                    RenderUpdate::Notify { message: format!("{e:#}") },
                    RenderUpdate::SetLoading { visible: false },
                ]
            }
        }
    }
}
