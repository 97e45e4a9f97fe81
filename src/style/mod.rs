//! Turning classified tokens into colours on a surface.

mod span;
mod surface;
mod terminal;
mod theme;

pub use span::{style_spans, StyleSpan};
pub use surface::{restyle, StyleSurface};
pub use terminal::TerminalSurface;
pub use theme::{Color, Theme};
