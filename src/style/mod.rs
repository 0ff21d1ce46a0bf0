mod classify;
mod color;
mod style;

pub use classify::{classify, color_for_value, Classification};
pub use color::{Rgb, DEFAULT_RAMP};
pub use style::{style_for, Style};
