//! Configuration sources.
//!
//! A source fetches one [`Model`]; the configurator tolerates individual
//! source failures (a missing optional config file is the common case) by
//! logging and skipping them.

use crate::core::error::{GossipError, Result};
use crate::core::internal::internal_trace;
use crate::model::{reader, Model};
use std::path::PathBuf;

pub trait Source {
    fn load(&self) -> Result<Model>;
}

/// Loads a model from a fixed file path.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for FileSource {
    fn load(&self) -> Result<Model> {
        internal_trace!("Loading: {}", self.path.display());
        reader::read_file(&self.path)
    }
}

/// Loads a model from a path relative to the user's home directory.
pub struct HomeSource {
    path: PathBuf,
}

impl HomeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for HomeSource {
    fn load(&self) -> Result<Model> {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| GossipError::config("HOME is not set"))?;
        let path = home.join(&self.path);
        internal_trace!("Loading: {}", path.display());
        reader::read_file(&path)
    }
}

/// Loads a model from the file path named by an environment variable.
pub struct EnvSource {
    name: String,
}

impl EnvSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Source for EnvSource {
    fn load(&self) -> Result<Model> {
        let path = std::env::var(&self.name).map_err(|_| {
            GossipError::config(format!("Environment variable not set: {}", self.name))
        })?;
        internal_trace!("Loading: {path}");
        reader::read_file(path.as_ref())
    }
}
