//! # Gossip
//!
//! A small bootstrap logging facade with a named logger hierarchy,
//! profile-based configuration, and pluggable listeners.
//!
//! ## Features
//!
//! - **Logger Hierarchy**: Dotted names inherit verbosity from the closest
//!   configured ancestor, with cached effective-level resolution
//! - **Profile Configuration**: Properties or JSON files resolved from the
//!   environment, home directory, or working directory at startup
//! - **Never Fails**: Configuration errors degrade to a console fall-back
//!   profile; listener failures never reach the logging call site
//! - **Thread Safe**: Designed for concurrent registration and logging
//!
//! ## Quick start
//!
//! ```
//! use gossip::prelude::*;
//!
//! let hierarchy = Hierarchy::new();
//! let log = hierarchy.get_logger("com.example.app");
//!
//! log.warn("something worth noting");
//! assert_eq!(log.effective_level(), Level::Warn);
//! ```
//!
//! A process-wide instance is available through [`instance`] and [`logger`]
//! for code that does not want to thread a [`Hierarchy`] around.

pub mod core;
pub mod listeners;
pub mod macros;
pub mod model;
pub mod render;
pub mod sources;
pub mod triggers;

pub mod prelude {
    pub use crate::core::{
        Configurator, EffectiveProfile, Event, GossipError, Hierarchy, Level, Logger, Result,
        ROOT_NAME, ROOT_TOKEN,
    };
    pub use crate::listeners::{ConsoleListener, FileListener, Listener};
    pub use crate::render::{ColorRenderer, PatternRenderer, Render};
}

pub use crate::core::{
    Configurator, EffectiveProfile, Event, GossipError, Hierarchy, Level, Location, Logger,
    Result, ROOT_NAME, ROOT_TOKEN,
};
pub use crate::listeners::{ConsoleListener, FileListener, Listener};
pub use crate::render::{ColorRenderer, PatternRenderer, Render};

use std::sync::OnceLock;

static INSTANCE: OnceLock<Hierarchy> = OnceLock::new();

/// The process-wide hierarchy, configured on first access.
pub fn instance() -> &'static Hierarchy {
    INSTANCE.get_or_init(Hierarchy::new)
}

/// Get a logger from the process-wide hierarchy.
pub fn logger(name: &str) -> Logger {
    instance().get_logger(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_instance_is_stable() {
        let a = logger("lib.test");
        let b = logger("lib.test");
        assert!(a.same_logger(&b));
        assert!(std::ptr::eq(instance(), instance()));
    }
}
