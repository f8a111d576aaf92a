//! Startup configuration resolution.
//!
//! Runs once, when a [`Hierarchy`](crate::core::Hierarchy) is constructed:
//! load the bootstrap model, resolve its declared sources, merge, resolve
//! profile includes, evaluate triggers, and fall back to a hardcoded
//! console-only profile if nothing activated or anything went wrong.
//! Configuration never fails; the process always ends up with a working,
//! if minimal, logging setup.

use crate::core::effective_profile::EffectiveProfile;
use crate::core::error::Result;
use crate::core::internal::{internal_debug, internal_error, internal_trace, internal_warn};
use crate::model::{merge, reader, ListenerNode, Model, ProfileNode, TriggerNode};

const BOOTSTRAP: &str = include_str!("bootstrap.properties");

/// Name of the profile used when no configured profile activates and the
/// merged model has none either.
pub const FALLBACK_PROFILE_NAME: &str = "fall-back";

/// Name of the profile used when triggers activate nothing but the model
/// defines one explicitly.
pub const DEFAULT_PROFILE_NAME: &str = "default";

pub struct Configurator {
    bootstrap: Option<Model>,
}

impl Configurator {
    /// Configure from the embedded bootstrap resource.
    pub fn new() -> Self {
        Self { bootstrap: None }
    }

    /// Configure from an explicit bootstrap model instead of the embedded
    /// resource. Used by tests and embedding hosts.
    pub fn with_bootstrap(bootstrap: Model) -> Self {
        Self { bootstrap: Some(bootstrap) }
    }

    pub fn configure(&self) -> EffectiveProfile {
        internal_debug!("Configuring");

        let mut profile = EffectiveProfile::new();

        match self.resolve_active_profiles() {
            Ok(active) => {
                for node in active {
                    profile.add_profile(node);
                }
            }
            Err(e) => internal_error!("Failed to configure; using fall-back profile: {e}"),
        }

        if profile.profiles().is_empty() {
            internal_debug!("No profiles were activated; using fall-back");
            profile.add_profile(fallback_profile());
        }

        profile
    }

    fn resolve_active_profiles(&self) -> Result<Vec<ProfileNode>> {
        let bootstrap = match &self.bootstrap {
            Some(model) => model.clone(),
            None => reader::read_properties(BOOTSTRAP)?,
        };

        let mut config = resolve_sources(&bootstrap);
        resolve_includes(&mut config);
        Ok(active_profiles(&config))
    }
}

impl Default for Configurator {
    fn default() -> Self {
        Self::new()
    }
}

/// Load every declared source and merge the results, source-dominant.
/// A source that fails to construct or load is logged and skipped.
fn resolve_sources(bootstrap: &Model) -> Model {
    let mut config = Model::new();

    for node in &bootstrap.sources {
        let loaded = node.create().and_then(|source| source.load());
        match loaded {
            Ok(model) => merge::merge(&mut config, model, true),
            Err(e) => internal_error!("Failed to resolve source '{}': {e}", node.kind),
        }
    }

    config
}

/// Resolve profile includes: append the included profile's properties,
/// loggers, listeners and triggers that are not already present by
/// identity. Never overwrites anything the including profile defines.
fn resolve_includes(model: &mut Model) {
    let snapshot = model.profiles.clone();

    for profile in &mut model.profiles {
        for include in profile.includes.clone() {
            let Some(included) = snapshot.iter().find(|p| p.name.trim() == include) else {
                internal_warn!("Unable to include non-existent profile: {include}");
                continue;
            };

            internal_debug!("Including '{include}' profile into: {}", profile.name);

            for (key, value) in &included.properties {
                if !profile.properties.contains_key(key) {
                    profile.properties.insert(key.clone(), value.clone());
                }
            }
            for logger in &included.loggers {
                if !profile.loggers.iter().any(|l| l.name == logger.name) {
                    profile.loggers.push(logger.clone());
                }
            }
            for listener in &included.listeners {
                if !profile.listeners.iter().any(|l| l.kind == listener.kind) {
                    profile.listeners.push(listener.clone());
                }
            }
            for trigger in &included.triggers {
                if !profile.triggers.iter().any(|t| t.kind == trigger.kind) {
                    profile.triggers.push(trigger.clone());
                }
            }
        }
    }
}

/// Every profile with at least one trigger evaluating to true, in model
/// order; falls back to the `default` profile when nothing activated.
fn active_profiles(model: &Model) -> Vec<ProfileNode> {
    internal_debug!("Activating profiles");

    let mut active: Vec<ProfileNode> = model
        .profiles
        .iter()
        .filter(|node| is_profile_active(node))
        .cloned()
        .collect();

    if active.is_empty() {
        if let Some(node) = model.find_profile(DEFAULT_PROFILE_NAME) {
            internal_debug!("Using default profile: {}", node.name);
            active.push(node.clone());
        }
    }

    active
}

/// A profile is active if ANY trigger evaluates true. Trigger construction
/// or evaluation failures are logged and treated as inactive, without
/// short-circuiting the remaining triggers.
fn is_profile_active(profile: &ProfileNode) -> bool {
    internal_trace!("Checking if profile is active: {}", profile.name);

    for node in &profile.triggers {
        match node.create() {
            Ok(trigger) => {
                if evaluate_trigger(&node.kind, trigger.as_ref()) {
                    return true;
                }
            }
            Err(e) => internal_error!("Failed to create trigger '{}': {e}", node.kind),
        }
    }

    false
}

/// True only on a clean `Ok(true)`; an evaluation error is logged and
/// counts as inactive.
fn evaluate_trigger(kind: &str, trigger: &dyn crate::triggers::Trigger) -> bool {
    match trigger.is_active() {
        Ok(true) => {
            internal_debug!("Active trigger: {kind}");
            true
        }
        Ok(false) => false,
        Err(e) => {
            internal_error!("Failed to evaluate trigger '{kind}': {e}");
            false
        }
    }
}

/// The hardcoded last-resort profile: always active, console output with
/// default pattern rendering.
pub fn fallback_profile() -> ProfileNode {
    let mut profile = ProfileNode::named(FALLBACK_PROFILE_NAME);
    profile.triggers.push(TriggerNode::of_kind("always"));
    profile.listeners.push(ListenerNode::of_kind("console"));
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LoggerNode, SourceNode};

    fn bootstrap_with_sources(sources: Vec<SourceNode>) -> Model {
        let mut model = Model::new();
        model.sources = sources;
        model
    }

    #[test]
    fn test_no_sources_yields_fallback() {
        let effective = Configurator::with_bootstrap(Model::new()).configure();

        assert_eq!(effective.profiles().len(), 1);
        assert_eq!(effective.profiles()[0].name, FALLBACK_PROFILE_NAME);
        assert_eq!(effective.listeners().len(), 1);
        assert_eq!(effective.listeners()[0].name(), "console");
    }

    #[test]
    fn test_all_sources_failing_yields_fallback() {
        let mut missing_file = SourceNode::of_kind("file");
        missing_file
            .configuration
            .insert("path".into(), "/definitely/not/here.properties".into());
        let unconstructible = SourceNode::of_kind("file"); // no path setting

        let bootstrap = bootstrap_with_sources(vec![missing_file, unconstructible]);
        let effective = Configurator::with_bootstrap(bootstrap).configure();

        assert_eq!(effective.profiles().len(), 1);
        assert_eq!(effective.profiles()[0].name, FALLBACK_PROFILE_NAME);
    }

    #[test]
    fn test_trigger_error_does_not_block_other_triggers() {
        let mut profile = ProfileNode::named("p");
        // Unknown kind fails at construction; the always trigger still fires.
        profile.triggers.push(TriggerNode::of_kind("moon-phase"));
        profile.triggers.push(TriggerNode::of_kind("always"));

        assert!(is_profile_active(&profile));
    }

    #[test]
    fn test_trigger_evaluation_error_is_inactive_and_non_blocking() {
        use crate::core::error::GossipError;
        use crate::triggers::{AlwaysTrigger, Trigger};

        struct FailingTrigger;

        impl Trigger for FailingTrigger {
            fn is_active(&self) -> Result<bool> {
                Err(GossipError::other("evaluation failed"))
            }
        }

        // One trigger throwing at evaluation time, one returning true: the
        // error counts as inactive and does not block the other trigger.
        assert!(!evaluate_trigger("failing", &FailingTrigger));
        assert!(evaluate_trigger("always", &AlwaysTrigger));
    }

    #[test]
    fn test_profile_without_triggers_is_inactive() {
        assert!(!is_profile_active(&ProfileNode::named("p")));
    }

    #[test]
    fn test_default_profile_used_when_nothing_activates() {
        let mut model = Model::new();
        model.profiles.push(ProfileNode::named("inactive"));
        model.profiles.push(ProfileNode::named(DEFAULT_PROFILE_NAME));

        let active = active_profiles(&model);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, DEFAULT_PROFILE_NAME);
    }

    #[test]
    fn test_include_resolution_appends_without_overwrite() {
        // B includes A; B keeps its own x=WARN and gains y=DEBUG.
        let mut a = ProfileNode::named("A");
        a.loggers.push(LoggerNode::new("x", "INFO"));
        a.loggers.push(LoggerNode::new("y", "DEBUG"));
        a.properties.insert("shared".into(), "from-a".into());

        let mut b = ProfileNode::named("B");
        b.includes.push("A".into());
        b.loggers.push(LoggerNode::new("x", "WARN"));
        b.properties.insert("shared".into(), "from-b".into());

        let mut model = Model::new();
        model.profiles.push(a);
        model.profiles.push(b);

        resolve_includes(&mut model);

        let b = model.find_profile("B").unwrap();
        assert!(b.loggers.contains(&LoggerNode::new("x", "WARN")));
        assert!(!b.loggers.contains(&LoggerNode::new("x", "INFO")));
        assert!(b.loggers.contains(&LoggerNode::new("y", "DEBUG")));
        assert_eq!(b.properties["shared"], "from-b");
    }

    #[test]
    fn test_missing_include_is_skipped() {
        let mut b = ProfileNode::named("B");
        b.includes.push("missing".into());
        b.loggers.push(LoggerNode::new("x", "WARN"));

        let mut model = Model::new();
        model.profiles.push(b);

        resolve_includes(&mut model);

        let b = model.find_profile("B").unwrap();
        assert_eq!(b.loggers.len(), 1);
    }

    #[test]
    fn test_embedded_bootstrap_parses() {
        let model = reader::read_properties(BOOTSTRAP).unwrap();
        assert_eq!(model.sources.len(), 3);
        assert!(model.profiles.is_empty());
    }
}
