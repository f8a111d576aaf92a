//! Error types for the gossip facade

pub type Result<T> = std::result::Result<T, GossipError>;

#[derive(Debug, thiserror::Error)]
pub enum GossipError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A required configuration setting is absent
    #[error("Missing required property: {name}")]
    MissingProperty { name: String },

    /// An unparseable level name in configuration
    #[error("Unknown level: '{name}'")]
    UnknownLevel { name: String },

    /// IO error (file sources, file listeners)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON configuration parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl GossipError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        GossipError::Configuration { message: message.into() }
    }

    /// Create a missing-property error
    pub fn missing_property(name: impl Into<String>) -> Self {
        GossipError::MissingProperty { name: name.into() }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        GossipError::Other(message.into())
    }
}
