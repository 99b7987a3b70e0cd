//! Error handling for the hostinfo crate.

use std::path::PathBuf;

/// A specialized `Result` type for hostinfo operations.
pub type Result<T> = std::result::Result<T, HostInfoError>;

/// The main error type for hostinfo operations.
#[derive(Debug, thiserror::Error)]
pub enum HostInfoError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An OS information source could not be read
    #[error("Can't open {}: {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// System information parsing failed
    #[error("Failed to parse system information: {0}")]
    ParseError(String),

    /// CPU counters gave nothing to compute a load from
    #[error("Failed to retrieve CPU load: {0}")]
    NoSample(String),

    /// Listening socket could not be set up
    #[error("Failed to set up server socket: {0}")]
    Bind(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HostInfoError {
    /// Create a new source error for `path`
    pub fn source_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Source {
            path: path.into(),
            source,
        }
    }

    /// Create a new parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a new missing-sample error
    pub fn no_sample(msg: impl Into<String>) -> Self {
        Self::NoSample(msg.into())
    }

    /// Create a new bind error
    pub fn bind_error(msg: impl Into<String>) -> Self {
        Self::Bind(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
