mod command;
mod state;
mod viewer;

pub use command::{Command, RenderUpdate, ZoomStep};
pub use state::Session;
pub use viewer::Viewer;
