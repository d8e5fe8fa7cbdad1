use thiserror::Error;

use crate::cpinfo::CpInfoError;
use crate::signature::SignatureError;

/// Result type for jclass operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the jclass crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Signature error: {0}")]
    Signature(#[from] SignatureError),

    #[error("Constant pool error: {0}")]
    CpInfo(#[from] CpInfoError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Whether this error came from malformed signature text
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Error::Signature(SignatureError::MalformedInput { .. })
                | Error::Signature(SignatureError::TrailingInput { .. })
        )
    }
}
