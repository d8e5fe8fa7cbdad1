use thiserror::Error;

use super::scanner::TextScanner;

/// Errors raised while building or parsing signatures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The committed parser met text that does not fit the production
    #[error("malformed {production} at offset {offset}: remaining input '{remainder}'")]
    MalformedInput {
        production: &'static str,
        offset: usize,
        remainder: String,
    },

    /// A complete production was parsed but input is left over
    #[error("trailing input after {production} at offset {offset}: '{remainder}'")]
    TrailingInput {
        production: &'static str,
        offset: usize,
        remainder: String,
    },

    /// A list production was constructed with no elements
    #[error("{production} requires at least one element")]
    EmptyList { production: &'static str },

    #[error("array type signature has {dimensions} dimensions (limit {max})")]
    ArrayTooDeep { dimensions: usize, max: usize },

    #[error("type arguments nested {depth} levels deep (limit {max})")]
    NestingTooDeep { depth: usize, max: usize },
}

impl SignatureError {
    /// Malformed-input error positioned at the scanner's cursor
    pub fn malformed(production: &'static str, scanner: &TextScanner<'_>) -> Self {
        SignatureError::MalformedInput {
            production,
            offset: scanner.offset(),
            remainder: scanner.remainder().to_string(),
        }
    }

    pub fn trailing(production: &'static str, scanner: &TextScanner<'_>) -> Self {
        SignatureError::TrailingInput {
            production,
            offset: scanner.offset(),
            remainder: scanner.remainder().to_string(),
        }
    }

    /// Name of the grammar production involved, when there is one
    pub fn production(&self) -> Option<&'static str> {
        match self {
            SignatureError::MalformedInput { production, .. }
            | SignatureError::TrailingInput { production, .. }
            | SignatureError::EmptyList { production } => Some(production),
            SignatureError::ArrayTooDeep { .. } | SignatureError::NestingTooDeep { .. } => None,
        }
    }

    /// Byte offset into the original text, when known
    pub fn offset(&self) -> Option<usize> {
        match self {
            SignatureError::MalformedInput { offset, .. }
            | SignatureError::TrailingInput { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// Result type for signature operations
pub type SignatureResult<T> = Result<T, SignatureError>;
