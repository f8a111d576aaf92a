//! Core types: levels, events, errors, the logger hierarchy, and the
//! configuration pipeline that feeds it.

pub mod configurator;
pub mod effective_profile;
pub mod error;
pub mod event;
pub mod hierarchy;
pub(crate) mod internal;
pub mod level;

pub use configurator::Configurator;
pub use effective_profile::EffectiveProfile;
pub use error::{GossipError, Result};
pub use event::{Event, Location};
pub use hierarchy::{Hierarchy, Logger, ROOT_NAME, ROOT_TOKEN};
pub use level::Level;
