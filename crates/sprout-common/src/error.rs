//! Common error types used throughout sprout-assets.
//!
//! Library code returns [`Error`]; the binary wraps it in `anyhow` with
//! additional context.

/// Common error type for sprout-assets.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required file or directory was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An image could not be decoded, encoded or written.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// An external tool (python, pip, rembg) failed or is missing.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Tool error.
    pub fn tool<T: Into<String>, M: Into<String>>(tool: T, message: M) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
