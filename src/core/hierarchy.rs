//! Logger hierarchy: the per-name registry, parent linking, and
//! effective-level resolution.
//!
//! Loggers are keyed by dotted name and linked to their closest registered
//! ancestor. Registering `a.b.c` before `a.b` exists leaves provision
//! placeholders at the missing ancestor keys; when `a.b` is later created
//! it replaces its placeholder and splices itself into the parent chain of
//! every waiting descendant.

use crate::core::configurator::Configurator;
use crate::core::effective_profile::EffectiveProfile;
use crate::core::event::Event;
use crate::core::internal::{internal_error, internal_trace};
use crate::core::level::Level;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Name of the always-present root logger.
pub const ROOT_NAME: &str = "ROOT";

/// Token naming the root logger in configuration files.
pub const ROOT_TOKEN: &str = "*";

/// Root's level when configuration does not assign one. Root must always
/// carry an explicit level; this is the invariant that makes the `Off`
/// fallback in effective-level resolution unreachable in practice.
const ROOT_DEFAULT_LEVEL: Level = Level::Warn;

/// Shared per-logger state. The explicit level is `None` for "inherit from
/// parent"; the cached effective level is an intentional memoization,
/// invalidated by [`Hierarchy::set_level`]. Cached reads are racy with
/// respect to concurrent level changes: verbosity is eventually consistent,
/// not linearizable.
struct LoggerState {
    name: String,
    level: RwLock<Option<Level>>,
    cached_level: RwLock<Option<Level>>,
    parent: RwLock<Option<Arc<LoggerState>>>,
}

impl LoggerState {
    fn new(name: &str) -> Self {
        Self::with_level(name, None)
    }

    fn with_level(name: &str, level: Option<Level>) -> Self {
        Self {
            name: name.to_string(),
            level: RwLock::new(level),
            cached_level: RwLock::new(None),
            parent: RwLock::new(None),
        }
    }

    /// Walk self, then ancestors, returning the first explicit level.
    /// Only a malformed hierarchy (root without a level) reaches `Off`.
    fn find_effective_level(&self) -> Level {
        if let Some(level) = *self.level.read() {
            return level;
        }
        let mut current = self.parent.read().clone();
        while let Some(state) = current {
            if let Some(level) = *state.level.read() {
                return level;
            }
            current = state.parent.read().clone();
        }
        Level::Off
    }

    fn effective_level(&self) -> Level {
        if let Some(cached) = *self.cached_level.read() {
            return cached;
        }
        let found = self.find_effective_level();
        *self.cached_level.write() = Some(found);
        found
    }
}

/// Registry slot for a dotted name: either a real logger, or a provision
/// placeholder holding the descendants waiting for this ancestor to exist.
enum RegistryEntry {
    Logger(Arc<LoggerState>),
    Pending(Vec<Arc<LoggerState>>),
}

/// The logger registry. Explicitly constructed and injectable; a
/// process-wide convenience instance lives behind [`crate::instance`].
///
/// All multi-key registry mutations (insert, placeholder replacement,
/// relinking) happen under one coarse mutex so concurrent registrations of
/// related names can never observe a half-linked chain.
pub struct Hierarchy {
    registry: Mutex<HashMap<String, RegistryEntry>>,
    root: Arc<LoggerState>,
    effective_profile: Arc<EffectiveProfile>,
}

impl Hierarchy {
    /// Build a hierarchy by running full configuration resolution.
    pub fn new() -> Self {
        Self::with_profile(Configurator::new().configure())
    }

    /// Build a hierarchy around an already-resolved profile.
    pub fn with_profile(profile: EffectiveProfile) -> Self {
        let root = Arc::new(LoggerState::with_level(ROOT_NAME, Some(ROOT_DEFAULT_LEVEL)));

        let mut map = HashMap::new();
        map.insert(ROOT_NAME.to_string(), RegistryEntry::Logger(Arc::clone(&root)));

        let hierarchy = Self {
            registry: Mutex::new(map),
            root,
            effective_profile: Arc::new(profile),
        };
        hierarchy.prime();
        hierarchy
    }

    pub fn root(&self) -> Logger {
        Logger {
            state: Arc::clone(&self.root),
            profile: Arc::clone(&self.effective_profile),
        }
    }

    pub fn effective_profile(&self) -> &Arc<EffectiveProfile> {
        &self.effective_profile
    }

    /// Apply the configured logger table to the hierarchy. An assignment
    /// with an unparseable level is logged and skipped.
    fn prime(&self) {
        internal_trace!("Priming");

        for (name, node) in self.effective_profile.loggers() {
            match node.as_level() {
                Ok(level) => self.set_level(name, Some(level)),
                Err(e) => internal_error!("Ignoring level for '{name}': {e}"),
            }
        }
    }

    /// Look up or create the logger for `name`. Idempotent: the same name
    /// always yields a handle to the same underlying logger.
    pub fn get_logger(&self, name: &str) -> Logger {
        let state = {
            let mut map = self.registry.lock();
            self.get_or_create(&mut map, name)
        };
        Logger {
            state,
            profile: Arc::clone(&self.effective_profile),
        }
    }

    /// Names of all real loggers currently registered.
    pub fn logger_names(&self) -> Vec<String> {
        let map = self.registry.lock();
        map.iter()
            .filter(|(_, entry)| matches!(entry, RegistryEntry::Logger(_)))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Set (or with `None`, reset to inherited) a logger's explicit level,
    /// creating the logger if needed. Root cannot be reset: clearing its
    /// level reinstates the default.
    ///
    /// Invalidation scans every registered logger under `name.` (all of
    /// them, for root) and clears the cached level of those without an
    /// explicit level of their own. O(registry size) per call; accepted
    /// because level changes are startup-rare.
    pub fn set_level(&self, name: &str, level: Option<Level>) {
        let mut map = self.registry.lock();

        let is_root = name == ROOT_NAME || name == ROOT_TOKEN;
        let state = if is_root {
            Arc::clone(&self.root)
        } else {
            self.get_or_create(&mut map, name)
        };

        let level = if is_root && level.is_none() {
            Some(ROOT_DEFAULT_LEVEL)
        } else {
            level
        };

        *state.level.write() = level;
        *state.cached_level.write() = level;

        let prefix = format!("{}.", state.name);
        for (key, entry) in map.iter() {
            if let RegistryEntry::Logger(other) = entry {
                if Arc::ptr_eq(other, &state) {
                    continue;
                }
                if (is_root || key.starts_with(&prefix)) && other.level.read().is_none() {
                    *other.cached_level.write() = None;
                }
            }
        }
    }

    fn get_or_create(
        &self,
        map: &mut HashMap<String, RegistryEntry>,
        name: &str,
    ) -> Arc<LoggerState> {
        match map.get(name) {
            Some(RegistryEntry::Logger(state)) => {
                internal_trace!("Using cached logger: {name}");
                Arc::clone(state)
            }
            Some(RegistryEntry::Pending(_)) => {
                let state = Arc::new(LoggerState::new(name));
                let replaced =
                    map.insert(name.to_string(), RegistryEntry::Logger(Arc::clone(&state)));
                internal_trace!("Replaced provision node with logger: {name}");
                if let Some(RegistryEntry::Pending(waiting)) = replaced {
                    update_children(&waiting, &state);
                }
                self.update_parents(map, &state);
                state
            }
            None => {
                let state = Arc::new(LoggerState::new(name));
                map.insert(name.to_string(), RegistryEntry::Logger(Arc::clone(&state)));
                internal_trace!("Created logger: {name}");
                self.update_parents(map, &state);
                state
            }
        }
    }

    /// Link a new logger to its closest registered ancestor, leaving a
    /// provision placeholder at every missing ancestor key on the way.
    ///
    /// For `w.x.y.z` the candidate keys are `w.x.y`, `w.x`, `w`, never the
    /// leaf itself. The walk stops at the first real logger: there is no
    /// need to update the ancestors of the closest ancestor.
    fn update_parents(&self, map: &mut HashMap<String, RegistryEntry>, logger: &Arc<LoggerState>) {
        let name = logger.name.clone();
        let mut parent_found = false;

        let mut cut = name.rfind('.');
        while let Some(i) = cut {
            let key = &name[..i];
            match map.get_mut(key) {
                None => {
                    map.insert(
                        key.to_string(),
                        RegistryEntry::Pending(vec![Arc::clone(logger)]),
                    );
                }
                Some(RegistryEntry::Logger(ancestor)) => {
                    *logger.parent.write() = Some(Arc::clone(ancestor));
                    parent_found = true;
                    break;
                }
                Some(RegistryEntry::Pending(waiting)) => {
                    waiting.push(Arc::clone(logger));
                }
            }
            cut = name[..i].rfind('.');
        }

        if !parent_found {
            *logger.parent.write() = Some(Arc::clone(&self.root));
        }
    }
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::new()
    }
}

/// Splice a newly created logger into the parent chain of every descendant
/// that was waiting on its provision placeholder, unless the descendant's
/// current parent is already the new logger or somewhere below it.
///
/// The "already below" check compares dotted segments, not raw string
/// prefixes: `a.bc` is not under `a.b`.
fn update_children(waiting: &[Arc<LoggerState>], logger: &Arc<LoggerState>) {
    for child in waiting {
        let current = child.parent.read().clone();
        // Waiting loggers were fully registered, so a parent is always set.
        if let Some(current) = current {
            if !is_under(&current.name, &logger.name) {
                *logger.parent.write() = Some(current);
                *child.parent.write() = Some(Arc::clone(logger));
            }
        }
    }
}

/// True when `name` is `ancestor` itself or a dotted descendant of it.
fn is_under(name: &str, ancestor: &str) -> bool {
    name == ancestor
        || (name.len() > ancestor.len()
            && name.starts_with(ancestor)
            && name.as_bytes()[ancestor.len()] == b'.')
}

/// A named logger handle. Cheap to clone; all clones for the same name
/// share the same underlying state.
///
/// The handle is the facade surface: level mutation stays on
/// [`Hierarchy::set_level`].
#[derive(Clone)]
pub struct Logger {
    state: Arc<LoggerState>,
    profile: Arc<EffectiveProfile>,
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// The explicit level, `None` when inheriting.
    pub fn level(&self) -> Option<Level> {
        *self.state.level.read()
    }

    /// The level governing emission, resolved through the parent chain and
    /// cached.
    pub fn effective_level(&self) -> Level {
        self.state.effective_level()
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        self.state.effective_level().enables(level)
    }

    pub fn is_trace_enabled(&self) -> bool {
        self.is_enabled(Level::Trace)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled(Level::Debug)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled(Level::Info)
    }

    pub fn is_warn_enabled(&self) -> bool {
        self.is_enabled(Level::Warn)
    }

    pub fn is_error_enabled(&self) -> bool {
        self.is_enabled(Level::Error)
    }

    pub fn log(&self, level: Level, message: impl Into<String>) {
        if self.is_enabled(level) {
            self.dispatch(Event::new(self.name(), level, message));
        }
    }

    pub fn log_with_cause(
        &self,
        level: Level,
        message: impl Into<String>,
        cause: Arc<dyn Error + Send + Sync>,
    ) {
        if self.is_enabled(level) {
            self.dispatch(Event::new(self.name(), level, message).with_cause(cause));
        }
    }

    /// Macro entry point: the enablement check already happened at the call
    /// site, so this dispatches without re-checking (no re-check races are
    /// corrected; level changes during logging are eventually consistent).
    #[doc(hidden)]
    pub fn log_located(&self, level: Level, message: String, file: &'static str, line: u32) {
        self.dispatch(Event::new(self.name(), level, message).with_location(file, line));
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.log(Level::Trace, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    fn dispatch(&self, event: Event) {
        self.profile.dispatch(&event);
    }

    /// Identity check: do two handles share the same underlying logger?
    pub fn same_logger(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level())
            .finish()
    }
}
