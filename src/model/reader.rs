//! Reads a configuration [`Model`] from its file formats.
//!
//! The primary format is a flat properties file (`key = value`, `#`/`!`
//! comments) with the schema:
//!
//! ```properties
//! version = 1.0.0
//! properties.foo = bar
//! sources = local
//! source.local = file
//! source.local.path = /etc/gossip.properties
//! profiles = default
//! profile.default.includes = common
//! profile.default.logger.com.example = DEBUG
//! profile.default.triggers = go
//! profile.default.trigger.go = always
//! profile.default.listeners = out
//! profile.default.listener.out = console
//! profile.default.listener.out.pattern = [%l] %c - %m%n
//! ```
//!
//! Files ending in `.json` deserialize straight into [`Model`] instead.

use super::{
    Configuration, ListenerNode, LoggerNode, Model, ProfileNode, SourceNode, TriggerNode,
    EXPECTED_VERSION,
};
use crate::core::error::{GossipError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Read a model from a file, selecting the format by extension.
pub fn read_file(path: &Path) -> Result<Model> {
    let text = std::fs::read_to_string(path)?;
    if path.extension().is_some_and(|ext| ext == "json") {
        read_json(&text)
    } else {
        read_properties(&text)
    }
}

/// Read a model from JSON text.
pub fn read_json(text: &str) -> Result<Model> {
    let model: Model = serde_json::from_str(text)?;
    validate_version(&model.version)?;
    Ok(model)
}

/// Read a model from properties text.
pub fn read_properties(text: &str) -> Result<Model> {
    let ctx = Context::parse(text)?;

    validate_version(ctx.get("version").unwrap_or(""))?;

    let mut model = Model::new();
    model.properties = ctx.child("properties").into_map();

    for name in ctx.split("sources") {
        if name.is_empty() {
            return Err(GossipError::config("Source name is blank"));
        }
        let key = format!("source.{name}");
        let kind = ctx
            .get(&key)
            .ok_or_else(|| GossipError::missing_property(&key))?;
        model.sources.push(SourceNode {
            kind: kind.to_string(),
            configuration: ctx.child(&key).into_map(),
        });
    }

    for name in ctx.split("profiles") {
        if name.is_empty() {
            return Err(GossipError::config("Profile name is blank"));
        }
        model
            .profiles
            .push(read_profile(&name, &ctx.child(&format!("profile.{name}")))?);
    }

    Ok(model)
}

fn validate_version(version: &str) -> Result<()> {
    if version != EXPECTED_VERSION {
        return Err(GossipError::config(format!(
            "Invalid configuration version: '{version}', expected: {EXPECTED_VERSION}"
        )));
    }
    Ok(())
}

fn read_profile(name: &str, ctx: &Context) -> Result<ProfileNode> {
    let mut profile = ProfileNode::named(name);
    profile.properties = ctx.child("properties").into_map();
    profile.includes = ctx.split("includes");

    for (logger_name, level) in ctx.child("logger").into_map() {
        profile.loggers.push(LoggerNode::new(logger_name, level));
    }

    for trigger_name in ctx.split("triggers") {
        let (kind, configuration) = read_component(ctx, "trigger", &trigger_name)?;
        profile.triggers.push(TriggerNode { kind, configuration });
    }

    for listener_name in ctx.split("listeners") {
        let (kind, configuration) = read_component(ctx, "listener", &listener_name)?;
        profile.listeners.push(ListenerNode { kind, configuration });
    }

    Ok(profile)
}

fn read_component(ctx: &Context, group: &str, name: &str) -> Result<(String, Configuration)> {
    let key = format!("{group}.{name}");
    let kind = ctx
        .get(&key)
        .ok_or_else(|| GossipError::missing_property(&key))?;
    Ok((kind.to_string(), ctx.child(&key).into_map()))
}

/// Flat key/value view over parsed properties, with dotted-prefix sub-views.
struct Context {
    values: BTreeMap<String, String>,
}

impl Context {
    fn parse(text: &str) -> Result<Self> {
        let mut values = BTreeMap::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let split = line
                .find(['=', ':'])
                .ok_or_else(|| GossipError::config(format!("Malformed line {}: '{raw}'", index + 1)))?;
            let key = line[..split].trim();
            let value = line[split + 1..].trim();
            if key.is_empty() {
                return Err(GossipError::config(format!("Blank key on line {}", index + 1)));
            }
            values.insert(key.to_string(), value.to_string());
        }

        Ok(Self { values })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Comma-split list value, entries trimmed; missing key yields an empty list.
    fn split(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(value) if !value.trim().is_empty() => {
                value.split(',').map(|item| item.trim().to_string()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Sub-view of every key under `prefix.`, with the prefix stripped.
    fn child(&self, prefix: &str) -> Context {
        let dotted = format!("{prefix}.");
        let values = self
            .values
            .range(dotted.clone()..)
            .take_while(|(key, _)| key.starts_with(&dotted))
            .map(|(key, value)| (key[dotted.len()..].to_string(), value.clone()))
            .collect();
        Context { values }
    }

    fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }
}
