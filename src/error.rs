use thiserror::Error;

use crate::domain::tlv::Tag;

/// Errors raised while validating input or assembling a payload.
///
/// None of these are retryable: the same input always fails the same way.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Please provide a valid phone number, tax ID, or e-wallet ID")]
    EmptyIdentifier,
    #[error("Target must be at least 10 digits (got {length})")]
    IdentifierTooShort { length: usize },
    #[error("Amount cannot be negative")]
    AmountNegative,
    #[error("Amount cannot exceed 1,000,000 THB")]
    AmountTooLarge,
    #[error("Value of field {tag} is {length} characters long, the limit is 99")]
    FieldValueTooLong { tag: Tag, length: usize },
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PayloadError>;
