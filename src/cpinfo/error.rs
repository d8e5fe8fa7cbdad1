//! Errors raised while reading, building or checking a constant pool

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpInfoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown constant pool tag {0}")]
    UnknownTag(u8),
    /// A numeric field is outside its legal range, e.g. an index of 0
    #[error("Constraint violation: {field} = {value}")]
    ConstraintViolation { field: &'static str, value: i64 },
    #[error("Unknown method handle reference kind {0}")]
    UnknownReferenceKind(u8),
    #[error("Invalid constant pool index {0}")]
    InvalidIndex(u16),
    #[error("Constant pool entry #{index} is {found}, expected {expected}")]
    WrongEntryType {
        index: u16,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Invalid modified UTF-8 at byte {offset}")]
    InvalidModifiedUtf8 { offset: usize },
    #[error("String encodes to {0} bytes, more than a CONSTANT_Utf8 entry can hold")]
    StringTooLong(usize),
    #[error("Not a class file: magic is {0:#010x}")]
    BadMagic(u32),
    #[error("Constant pool is out of space")]
    OutOfSpace,
}

impl CpInfoError {
    pub fn constraint(field: &'static str, value: impl Into<i64>) -> Self {
        CpInfoError::ConstraintViolation { field, value: value.into() }
    }
}

pub type CpInfoResult<T> = Result<T, CpInfoError>;
