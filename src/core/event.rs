//! Log event structure

use crate::core::level::Level;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::sync::Arc;

/// Immutable snapshot of one log call, handed to every listener.
#[derive(Debug, Clone)]
pub struct Event {
    logger_name: String,
    level: Level,
    message: String,
    cause: Option<Arc<dyn Error + Send + Sync>>,
    timestamp: DateTime<Utc>,
    thread_name: Option<String>,
    location: Option<Location>,
}

/// Call-site of a log statement, captured by the logging macros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
}

impl Event {
    pub fn new(logger_name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            logger_name: logger_name.into(),
            level,
            message: message.into(),
            cause: None,
            timestamp: Utc::now(),
            thread_name: std::thread::current().name().map(String::from),
            location: None,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: Arc<dyn Error + Send + Sync>) -> Self {
        self.cause = Some(cause);
        self
    }

    #[must_use]
    pub fn with_location(mut self, file: &'static str, line: u32) -> Self {
        self.location = Some(Location { file, line });
        self
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync)> {
        self.cause.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn thread_name(&self) -> Option<&str> {
        self.thread_name.as_deref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}
