//! ANSI-colored variant of the pattern renderer

use super::pattern::{render_cause, PatternRenderer, DEFAULT_PATTERN};
use super::Render;
use crate::core::Event;
use colored::Colorize;

/// Like [`PatternRenderer`], but the `%l` level token is colored per level.
pub struct ColorRenderer {
    inner: PatternRenderer,
}

impl ColorRenderer {
    pub fn new() -> Self {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        Self {
            inner: PatternRenderer::with_pattern(pattern),
        }
    }
}

impl Default for ColorRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for ColorRenderer {
    fn render(&self, event: &Event) -> String {
        let level = event.level();
        let level_text = level.to_str().color(level.color_code()).to_string();

        let mut out = String::new();
        self.inner.expand(event, &level_text, &mut out);
        render_cause(event, &mut out);
        out
    }
}
