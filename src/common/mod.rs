mod error;
mod format;

pub use error::{FetchError, LoadError, ReprojectError};
pub use format::{format_fixed, format_grouped, NumberLocale};
