//! Console listener implementation

use super::{below_threshold, Listener};
use crate::core::error::Result;
use crate::core::{Event, Level};
use crate::render::{PatternRenderer, Render};
use parking_lot::Mutex;
use std::io::Write;

/// Which console stream the listener writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
}

enum Output {
    Stdout,
    Stderr,
    Writer(Box<dyn Write + Send>),
}

/// Writes rendered events to stdout or stderr.
///
/// The output handle is behind one mutex so lines from concurrent loggers
/// never interleave. Writes are flushed per event: bootstrap logging must
/// not lose lines when the process dies early.
pub struct ConsoleListener {
    output: Mutex<Output>,
    renderer: Box<dyn Render>,
    threshold: Option<Level>,
}

impl ConsoleListener {
    pub fn new(target: ConsoleTarget) -> Self {
        let output = match target {
            ConsoleTarget::Stdout => Output::Stdout,
            ConsoleTarget::Stderr => Output::Stderr,
        };
        Self {
            output: Mutex::new(output),
            renderer: Box::new(PatternRenderer::new()),
            threshold: None,
        }
    }

    /// Redirect output to an arbitrary writer. Used by tests and by hosts
    /// embedding the facade behind their own stream.
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(Output::Writer(writer)),
            renderer: Box::new(PatternRenderer::new()),
            threshold: None,
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Render>) -> Self {
        self.renderer = renderer;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: Option<Level>) -> Self {
        self.threshold = threshold;
        self
    }
}

impl Default for ConsoleListener {
    fn default() -> Self {
        Self::new(ConsoleTarget::Stdout)
    }
}

impl Listener for ConsoleListener {
    fn on_event(&self, event: &Event) -> Result<()> {
        if below_threshold(self.threshold, event) {
            return Ok(());
        }

        let rendered = self.renderer.render(event);

        let mut output = self.output.lock();
        match &mut *output {
            Output::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(rendered.as_bytes())?;
                handle.flush()?;
            }
            Output::Stderr => {
                let stderr = std::io::stderr();
                let mut handle = stderr.lock();
                handle.write_all(rendered.as_bytes())?;
                handle.flush()?;
            }
            Output::Writer(writer) => {
                writer.write_all(rendered.as_bytes())?;
                writer.flush()?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
