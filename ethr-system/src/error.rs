use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy shared by every command. None of these are retried.
#[derive(Error, Debug)]
pub enum SystemError {
    /// Missing, invalid, or policy-violating target path.
    #[error("{0}")]
    Path(String),

    /// Malformed input document, or a document that could not be serialized.
    #[error("{context}: {message}")]
    Format { context: String, message: String },

    #[error("cryptographic failure: {0}")]
    Crypto(String),

    #[error("random source unavailable: {0}")]
    RandomSource(String),

    /// A caller-supplied value outside the accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SystemError {
    pub fn path(message: impl Into<String>) -> Self {
        SystemError::Path(message.into())
    }

    pub fn format(context: impl Into<String>, message: impl ToString) -> Self {
        SystemError::Format {
            context: context.into(),
            message: message.to_string(),
        }
    }

    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SystemError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
