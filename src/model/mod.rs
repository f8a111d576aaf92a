//! Declarative configuration model.
//!
//! A [`Model`] is what a configuration source produces: named profiles, each
//! bundling logger-level assignments, activation triggers, output listeners
//! and includes. Component nodes carry a `kind` string plus a flat settings
//! map and are turned into concrete components through a closed, compile-time
//! factory (`create()`), never by reflective lookup.

pub mod merge;
pub mod reader;

use crate::core::error::{GossipError, Result};
use crate::core::level::Level;
use crate::listeners::{ConsoleListener, ConsoleTarget, FileListener, Listener};
use crate::render::{ColorRenderer, PatternRenderer, Render};
use crate::sources::{EnvSource, FileSource, HomeSource, Source};
use crate::triggers::{AlwaysTrigger, EnvTrigger, Trigger};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings attached to a component node, keyed by setting name.
pub type Configuration = BTreeMap<String, String>;

/// The configuration format version this library understands.
pub const EXPECTED_VERSION: &str = "1.0.0";

fn default_version() -> String {
    EXPECTED_VERSION.to_string()
}

/// Root of the configuration tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    #[serde(default = "default_version")]
    pub version: String,
    pub properties: BTreeMap<String, String>,
    pub sources: Vec<SourceNode>,
    pub profiles: Vec<ProfileNode>,
}

impl Model {
    pub fn new() -> Self {
        Self {
            version: default_version(),
            ..Self::default()
        }
    }

    pub fn find_profile(&self, name: &str) -> Option<&ProfileNode> {
        self.profiles.iter().find(|p| p.name.trim() == name)
    }
}

/// A named bundle of logger levels, triggers, listeners and includes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileNode {
    pub name: String,
    pub properties: BTreeMap<String, String>,
    pub includes: Vec<String>,
    pub loggers: Vec<LoggerNode>,
    pub triggers: Vec<TriggerNode>,
    pub listeners: Vec<ListenerNode>,
}

impl ProfileNode {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One logger-level assignment inside a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerNode {
    pub name: String,
    pub level: String,
}

impl LoggerNode {
    pub fn new(name: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: level.into(),
        }
    }

    pub fn as_level(&self) -> Result<Level> {
        self.level.parse()
    }
}

/// Declares an activation predicate; identity is the `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerNode {
    pub kind: String,
    pub configuration: Configuration,
}

impl TriggerNode {
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            configuration: Configuration::new(),
        }
    }

    pub fn create(&self) -> Result<Box<dyn Trigger>> {
        match self.kind.as_str() {
            "always" => Ok(Box::new(AlwaysTrigger)),
            "env" => Ok(Box::new(EnvTrigger::from_configuration(&self.configuration)?)),
            other => Err(GossipError::config(format!("Unknown trigger kind: '{other}'"))),
        }
    }
}

/// Declares an output sink; identity is the `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerNode {
    pub kind: String,
    pub configuration: Configuration,
}

impl ListenerNode {
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            configuration: Configuration::new(),
        }
    }

    pub fn create(&self) -> Result<Box<dyn Listener>> {
        let threshold = optional_level(&self.configuration, "threshold")?;
        let renderer = create_renderer(&self.configuration)?;

        match self.kind.as_str() {
            "console" => {
                let target = match self.configuration.get("target").map(String::as_str) {
                    None | Some("stdout") => ConsoleTarget::Stdout,
                    Some("stderr") => ConsoleTarget::Stderr,
                    Some(other) => {
                        return Err(GossipError::config(format!(
                            "Unknown console target: '{other}'"
                        )))
                    }
                };
                Ok(Box::new(
                    ConsoleListener::new(target)
                        .with_renderer(renderer)
                        .with_threshold(threshold),
                ))
            }
            "file" => {
                let path = require(&self.configuration, "file")?;
                let append = parse_flag(&self.configuration, "append", true)?;
                Ok(Box::new(
                    FileListener::new(path, append)?
                        .with_renderer(renderer)
                        .with_threshold(threshold),
                ))
            }
            other => Err(GossipError::config(format!("Unknown listener kind: '{other}'"))),
        }
    }
}

/// Declares an external configuration fetcher; identity is the `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceNode {
    pub kind: String,
    pub configuration: Configuration,
}

impl SourceNode {
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            configuration: Configuration::new(),
        }
    }

    pub fn create(&self) -> Result<Box<dyn Source>> {
        match self.kind.as_str() {
            "file" => Ok(Box::new(FileSource::new(require(&self.configuration, "path")?))),
            "home" => Ok(Box::new(HomeSource::new(require(&self.configuration, "path")?))),
            "env" => Ok(Box::new(EnvSource::new(require(&self.configuration, "name")?))),
            other => Err(GossipError::config(format!("Unknown source kind: '{other}'"))),
        }
    }
}

fn create_renderer(configuration: &Configuration) -> Result<Box<dyn Render>> {
    let pattern = configuration.get("pattern").map(String::as_str);
    if parse_flag(configuration, "color", false)? {
        Ok(Box::new(match pattern {
            Some(p) => ColorRenderer::with_pattern(p),
            None => ColorRenderer::new(),
        }))
    } else {
        Ok(Box::new(match pattern {
            Some(p) => PatternRenderer::with_pattern(p),
            None => PatternRenderer::new(),
        }))
    }
}

fn require<'a>(configuration: &'a Configuration, name: &str) -> Result<&'a str> {
    configuration
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| GossipError::missing_property(name))
}

fn optional_level(configuration: &Configuration, name: &str) -> Result<Option<Level>> {
    configuration.get(name).map(|value| value.parse()).transpose()
}

fn parse_flag(configuration: &Configuration, name: &str, default: bool) -> Result<bool> {
    match configuration.get(name).map(String::as_str) {
        None => Ok(default),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(GossipError::config(format!(
            "Invalid boolean for '{name}': '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_profile() {
        let mut model = Model::new();
        model.profiles.push(ProfileNode::named("default"));
        model.profiles.push(ProfileNode::named("verbose"));

        assert_eq!(model.find_profile("verbose").unwrap().name, "verbose");
        assert!(model.find_profile("missing").is_none());
    }

    #[test]
    fn test_logger_node_as_level() {
        assert_eq!(LoggerNode::new("a.b", "debug").as_level().unwrap(), Level::Debug);
        assert!(matches!(
            LoggerNode::new("a.b", "nope").as_level(),
            Err(GossipError::UnknownLevel { .. })
        ));
    }

    #[test]
    fn test_trigger_factory() {
        assert!(TriggerNode::of_kind("always").create().is_ok());

        let err = TriggerNode::of_kind("moon-phase").create().unwrap_err();
        assert!(matches!(err, GossipError::Configuration { .. }));

        // env trigger requires a name setting
        let err = TriggerNode::of_kind("env").create().unwrap_err();
        assert!(matches!(err, GossipError::MissingProperty { .. }));
    }

    #[test]
    fn test_listener_factory() {
        assert!(ListenerNode::of_kind("console").create().is_ok());

        let mut node = ListenerNode::of_kind("console");
        node.configuration.insert("target".into(), "stderr".into());
        node.configuration.insert("threshold".into(), "error".into());
        assert!(node.create().is_ok());

        // file listener requires a path
        let err = ListenerNode::of_kind("file").create().unwrap_err();
        assert!(matches!(err, GossipError::MissingProperty { .. }));

        let err = ListenerNode::of_kind("smoke-signal").create().unwrap_err();
        assert!(matches!(err, GossipError::Configuration { .. }));
    }

    #[test]
    fn test_source_factory() {
        let mut node = SourceNode::of_kind("file");
        node.configuration.insert("path".into(), "/tmp/gossip.properties".into());
        assert!(node.create().is_ok());

        assert!(matches!(
            SourceNode::of_kind("file").create(),
            Err(GossipError::MissingProperty { .. })
        ));
    }

    #[test]
    fn test_model_json_roundtrip() {
        let mut model = Model::new();
        let mut profile = ProfileNode::named("default");
        profile.loggers.push(LoggerNode::new("a.b", "DEBUG"));
        profile.triggers.push(TriggerNode::of_kind("always"));
        model.profiles.push(profile);

        let json = serde_json::to_string(&model).unwrap();
        let parsed: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.version, EXPECTED_VERSION);
        assert_eq!(parsed.profiles[0].loggers[0], LoggerNode::new("a.b", "DEBUG"));
    }
}
