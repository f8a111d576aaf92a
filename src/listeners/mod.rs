//! Output listeners for dispatched events

pub mod console;
pub mod file;

pub use console::{ConsoleListener, ConsoleTarget};
pub use file::FileListener;

use crate::core::error::Result;
use crate::core::{Event, Level};

/// An output sink receiving every dispatched event.
///
/// Listeners are invoked synchronously on the logging thread and must
/// serialize their own writes so concurrent loggers never interleave
/// partial lines. Errors are caught by the dispatcher, never propagated
/// to the logging call site.
pub trait Listener: Send + Sync {
    fn on_event(&self, event: &Event) -> Result<()>;
    fn name(&self) -> &str;
}

impl std::fmt::Debug for dyn Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dyn Listener({})", self.name())
    }
}

/// Shared threshold check: a listener with a threshold drops events below it.
pub(crate) fn below_threshold(threshold: Option<Level>, event: &Event) -> bool {
    threshold.is_some_and(|t| !t.enables(event.level()))
}
