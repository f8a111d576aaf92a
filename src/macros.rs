//! Logging macros with `format!`-style message formatting.
//!
//! The macros check enablement before formatting, so a disabled call site
//! never pays for building its message. They also capture the source
//! location of the call.
//!
//! # Examples
//!
//! ```
//! use gossip::prelude::*;
//! use gossip::{info, warn};
//!
//! let hierarchy = Hierarchy::new();
//! let log = hierarchy.get_logger("demo");
//!
//! info!(log, "Server started");
//!
//! let port = 8080;
//! warn!(log, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use gossip::prelude::*;
/// # let hierarchy = Hierarchy::new();
/// # let log = hierarchy.get_logger("demo");
/// use gossip::log;
/// log!(log, Level::Warn, "Simple message");
/// log!(log, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let level = $level;
        if $logger.is_enabled(level) {
            $logger.log_located(level, format!($($arg)+), file!(), line!());
        }
    }};
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use gossip::prelude::*;
/// # let hierarchy = Hierarchy::new();
/// # hierarchy.set_level("demo", Some(Level::Trace));
/// # let log = hierarchy.get_logger("demo");
/// use gossip::trace;
/// trace!(log, "Entering resolve()");
/// trace!(log, "Candidate: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use gossip::prelude::*;
/// # let hierarchy = Hierarchy::new();
/// # let log = hierarchy.get_logger("demo");
/// use gossip::debug;
/// debug!(log, "Debug information");
/// debug!(log, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use gossip::prelude::*;
/// # let hierarchy = Hierarchy::new();
/// # let log = hierarchy.get_logger("demo");
/// use gossip::info;
/// info!(log, "Application started");
/// info!(log, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use gossip::prelude::*;
/// # let hierarchy = Hierarchy::new();
/// # let log = hierarchy.get_logger("demo");
/// use gossip::warn;
/// warn!(log, "Low disk space");
/// warn!(log, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use gossip::prelude::*;
/// # let hierarchy = Hierarchy::new();
/// # let log = hierarchy.get_logger("demo");
/// use gossip::error;
/// error!(log, "Failed to load configuration");
/// error!(log, "Error code: {}, message: {}", 500, "internal");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}
