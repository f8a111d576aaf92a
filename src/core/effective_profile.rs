//! Effective profile: what configuration resolved to and event dispatch.

use crate::core::internal::{internal_error, internal_trace};
use crate::core::Event;
use crate::listeners::Listener;
use crate::model::{LoggerNode, ProfileNode};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::OnceLock;

/// The set of profiles configuration activated, in activation order.
///
/// The logger table and the listener dispatch array are built lazily on
/// first access and are immutable afterwards; there is no re-configuration
/// during the life of the process.
pub struct EffectiveProfile {
    profiles: Vec<ProfileNode>,
    loggers: OnceLock<HashMap<String, LoggerNode>>,
    listeners: OnceLock<Vec<Box<dyn Listener>>>,
}

impl EffectiveProfile {
    pub fn new() -> Self {
        Self {
            profiles: Vec::new(),
            loggers: OnceLock::new(),
            listeners: OnceLock::new(),
        }
    }

    pub fn profiles(&self) -> &[ProfileNode] {
        &self.profiles
    }

    /// Add an activated profile. Only meaningful before the first
    /// `loggers()`/`listeners()` access freezes the dispatch tables.
    pub fn add_profile(&mut self, node: ProfileNode) {
        self.profiles.push(node);
    }

    /// Flattened logger-name table across the active profiles.
    ///
    /// Earlier profiles win on a name collision; later profiles never
    /// override. This is deliberately different from the model merge,
    /// where the dominant side replaces.
    pub fn loggers(&self) -> &HashMap<String, LoggerNode> {
        self.loggers.get_or_init(|| {
            internal_trace!("Loading effective logger table");

            let mut map = HashMap::new();
            for profile in &self.profiles {
                for node in &profile.loggers {
                    map.entry(node.name.clone()).or_insert_with(|| node.clone());
                }
            }
            map
        })
    }

    /// Flat listener dispatch array: profile order, then listener order
    /// within each profile. A listener that fails to construct is logged
    /// and omitted.
    pub fn listeners(&self) -> &[Box<dyn Listener>] {
        self.listeners.get_or_init(|| {
            internal_trace!("Building listener dispatch table");

            let mut listeners = Vec::new();
            for profile in &self.profiles {
                for node in &profile.listeners {
                    match node.create() {
                        Ok(listener) => {
                            internal_trace!("Adding listener: {}", node.kind);
                            listeners.push(listener);
                        }
                        Err(e) => {
                            internal_error!("Failed to create listener '{}': {e}", node.kind)
                        }
                    }
                }
            }
            listeners
        })
    }

    /// Fan one event out to every listener. A failing or panicking listener
    /// is logged and skipped; the remaining listeners still run, and nothing
    /// ever propagates to the logging call site.
    pub fn dispatch(&self, event: &Event) {
        for listener in self.listeners() {
            match catch_unwind(AssertUnwindSafe(|| listener.on_event(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    internal_error!("Listener '{}' failed; ignoring: {e}", listener.name());
                }
                Err(panic) => {
                    let detail = if let Some(s) = panic.downcast_ref::<&str>() {
                        (*s).to_string()
                    } else if let Some(s) = panic.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "unknown panic".to_string()
                    };
                    internal_error!("Listener '{}' panicked; ignoring: {detail}", listener.name());
                }
            }
        }
    }
}

impl Default for EffectiveProfile {
    fn default() -> Self {
        Self::new()
    }
}
