//! Pattern-based text renderer

use super::Render;
use crate::core::Event;

/// Default pattern, producing lines like `[ERROR] com.example - boom`.
pub const DEFAULT_PATTERN: &str = "[%l] %c - %m%n";

/// Renders events through a printf-style pattern.
///
/// Tokens: `%d` timestamp, `%l` level, `%c` logger name, `%C` short
/// (last-segment) logger name, `%t` thread name, `%m` message, `%n`
/// newline, `%%` literal percent. Unknown tokens render verbatim. A cause,
/// when present, is rendered on continuation lines after the main line,
/// one per error in the source chain.
pub struct PatternRenderer {
    pattern: String,
}

impl PatternRenderer {
    pub fn new() -> Self {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        Self { pattern: pattern.into() }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Expand the pattern with `level_text` substituted for `%l`; the color
    /// renderer passes an ANSI-wrapped level through here.
    pub(crate) fn expand(&self, event: &Event, level_text: &str, out: &mut String) {
        let mut chars = self.pattern.chars();
        while let Some(ch) = chars.next() {
            if ch != '%' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('d') => out.push_str(&event.timestamp().format("%Y-%m-%d %H:%M:%S%.3f").to_string()),
                Some('l') => out.push_str(level_text),
                Some('c') => out.push_str(event.logger_name()),
                Some('C') => out.push_str(short_name(event.logger_name())),
                Some('t') => out.push_str(event.thread_name().unwrap_or("main")),
                Some('m') => out.push_str(event.message()),
                Some('n') => out.push('\n'),
                Some('%') => out.push('%'),
                Some(other) => {
                    out.push('%');
                    out.push(other);
                }
                None => out.push('%'),
            }
        }
    }
}

impl Default for PatternRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for PatternRenderer {
    fn render(&self, event: &Event) -> String {
        let mut out = String::new();
        self.expand(event, event.level().to_str(), &mut out);
        render_cause(event, &mut out);
        out
    }
}

fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Append the cause chain, one `Caused by:` line per source link.
pub(crate) fn render_cause(event: &Event, out: &mut String) {
    let mut cause = event.cause().map(|c| c as &dyn std::error::Error);
    while let Some(error) = cause {
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("Caused by: ");
        out.push_str(&error.to_string());
        out.push('\n');
        cause = error.source();
    }
}
