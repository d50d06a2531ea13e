//! Application error type.
//!
//! One message-carrying error struct with an optional boxed source, used by
//! the CLI, configuration and logging layers. The resolver core itself never
//! fails at runtime; malformed inputs degrade to "not approved" results
//! instead of errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct Error {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            source: None,
        }
    }

    pub fn with_source(
        message: &str,
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    ) -> Self {
        Self {
            message: message.to_string(),
            source: Some(source),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::with_source("IO error", Box::new(error))
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::with_source("Serialization error", Box::new(error))
    }
}

impl From<config::ConfigError> for Error {
    fn from(error: config::ConfigError) -> Self {
        Self::with_source("Configuration error", Box::new(error))
    }
}
