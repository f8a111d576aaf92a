//! File listener implementation

use super::{below_threshold, Listener};
use crate::core::error::Result;
use crate::core::{Event, Level};
use crate::render::{PatternRenderer, Render};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends rendered events to a file. No rotation; one mutex around the
/// writer serializes concurrent loggers, and every event is flushed so a
/// crash cannot lose buffered lines.
pub struct FileListener {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    renderer: Box<dyn Render>,
    threshold: Option<Level>,
}

impl FileListener {
    pub fn new(path: impl Into<PathBuf>, append: bool) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(append)
            .write(true)
            .truncate(!append)
            .open(&path)?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
            renderer: Box::new(PatternRenderer::new()),
            threshold: None,
        })
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

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Listener for FileListener {
    fn on_event(&self, event: &Event) -> Result<()> {
        if below_threshold(self.threshold, event) {
            return Ok(());
        }

        let rendered = self.renderer.render(event);

        let mut writer = self.writer.lock();
        writer.write_all(rendered.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileListener {
    fn drop(&mut self) {
        let _ = self.writer.lock().flush();
    }
}
