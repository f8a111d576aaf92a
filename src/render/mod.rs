//! Event rendering

pub mod color;
pub mod pattern;

pub use color::ColorRenderer;
pub use pattern::{PatternRenderer, DEFAULT_PATTERN};

use crate::core::Event;

/// Formats an [`Event`] into the text a listener writes out.
pub trait Render: Send + Sync {
    fn render(&self, event: &Event) -> String;
}
