//! Self-diagnostics for the facade itself.
//!
//! Gossip configures the process's logging, so its own failures cannot go
//! through the hierarchy being configured. Diagnostics are single lines on
//! stderr, gated by a threshold read once from the
//! `GOSSIP_INTERNAL_THRESHOLD` environment variable (default WARN).

use crate::core::level::Level;
use std::fmt;
use std::sync::OnceLock;

const THRESHOLD_VAR: &str = "GOSSIP_INTERNAL_THRESHOLD";

static THRESHOLD: OnceLock<Level> = OnceLock::new();

pub(crate) fn threshold() -> Level {
    *THRESHOLD.get_or_init(|| {
        std::env::var(THRESHOLD_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(Level::Warn)
    })
}

pub(crate) fn emit(level: Level, args: fmt::Arguments<'_>) {
    if threshold().enables(level) {
        eprintln!("[gossip] {:5} {}", level.to_str(), args);
    }
}

macro_rules! internal_trace {
    ($($arg:tt)+) => {
        $crate::core::internal::emit($crate::core::level::Level::Trace, format_args!($($arg)+))
    };
}

macro_rules! internal_debug {
    ($($arg:tt)+) => {
        $crate::core::internal::emit($crate::core::level::Level::Debug, format_args!($($arg)+))
    };
}

macro_rules! internal_warn {
    ($($arg:tt)+) => {
        $crate::core::internal::emit($crate::core::level::Level::Warn, format_args!($($arg)+))
    };
}

macro_rules! internal_error {
    ($($arg:tt)+) => {
        $crate::core::internal::emit($crate::core::level::Level::Error, format_args!($($arg)+))
    };
}

pub(crate) use {internal_debug, internal_error, internal_trace, internal_warn};
