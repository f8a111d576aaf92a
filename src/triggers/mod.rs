//! Profile activation triggers

use crate::core::error::{GossipError, Result};
use crate::model::Configuration;

/// Predicate deciding whether a profile becomes active. Evaluated once,
/// during configuration; an `Err` is treated by the configurator as
/// "inactive" without blocking the profile's other triggers.
pub trait Trigger {
    fn is_active(&self) -> Result<bool>;
}

impl std::fmt::Debug for dyn Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Trigger")
    }
}

/// Always active; backs the hardcoded fallback profile.
pub struct AlwaysTrigger;

impl Trigger for AlwaysTrigger {
    fn is_active(&self) -> Result<bool> {
        Ok(true)
    }
}

/// Active when an environment variable is set, optionally requiring an
/// exact value.
#[derive(Debug)]
pub struct EnvTrigger {
    name: String,
    value: Option<String>,
}

impl EnvTrigger {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn from_configuration(configuration: &Configuration) -> Result<Self> {
        let name = configuration
            .get("name")
            .ok_or_else(|| GossipError::missing_property("name"))?;
        Ok(Self::new(name, configuration.get("value").cloned()))
    }
}

impl Trigger for EnvTrigger {
    fn is_active(&self) -> Result<bool> {
        match std::env::var(&self.name) {
            Ok(actual) => Ok(match &self.value {
                Some(expected) => &actual == expected,
                None => true,
            }),
            Err(_) => Ok(false),
        }
    }
}
