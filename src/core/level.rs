//! Logging severity levels.

use crate::core::error::GossipError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of an event, or the verbosity threshold of a logger.
///
/// `All` and `Off` are threshold sentinels: a logger at `All` enables every
/// level, one at `Off` enables none. Events themselves only carry the five
/// nameable levels in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    All,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl Level {
    /// Numeric id used for threshold comparison. Gaps leave room for
    /// intermediate levels without renumbering.
    pub fn id(self) -> i32 {
        match self {
            Level::All => -1000,
            Level::Trace => 0,
            Level::Debug => 10,
            Level::Info => 20,
            Level::Warn => 30,
            Level::Error => 40,
            Level::Off => 1000,
        }
    }

    /// Does a logger at this threshold emit an event at `level`?
    pub fn enables(self, level: Level) -> bool {
        self.id() <= level.id()
    }

    pub fn to_str(self) -> &'static str {
        match self {
            Level::All => "ALL",
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    /// Terminal color used when rendering this level.
    pub fn color_code(self) -> colored::Color {
        match self {
            Level::Trace => colored::Color::Magenta,
            Level::Debug => colored::Color::Cyan,
            Level::Info => colored::Color::Green,
            Level::Warn => colored::Color::Yellow,
            Level::Error => colored::Color::Red,
            Level::All | Level::Off => colored::Color::White,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Level {
    type Err = GossipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ALL" => Ok(Level::All),
            "TRACE" => Ok(Level::Trace),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            "OFF" => Ok(Level::Off),
            _ => Err(GossipError::UnknownLevel { name: s.to_string() }),
        }
    }
}
