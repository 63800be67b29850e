/// Result alias that carries the custom [`ToolgunError`] type.
pub type Result<T> = std::result::Result<T, ToolgunError>;

/// Common error type for the core crate.
///
/// Everything here is fatal at startup: the per-tick path performs no I/O and
/// cannot fail, so no variant models a recoverable runtime condition.
#[derive(Debug, thiserror::Error)]
pub enum ToolgunError {
    /// A configuration file was structurally valid but semantically wrong
    /// (no tools, non-positive tick rate, negative replay interval, ...).
    #[error("configuration error: {0}")]
    Config(String),
    /// Tool or cue content could not be produced by the content loader.
    #[error("content error: {0}")]
    Content(String),
    /// Wrapper around standard IO errors (config file reads).
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// A configuration file could not be parsed as JSON.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ToolgunError {
    /// Creates a configuration error from the provided message.
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a content error from the provided message.
    pub fn content<T: Into<String>>(msg: T) -> Self {
        Self::Content(msg.into())
    }
}
