use thiserror::Error;

use crate::contact::models::ContactId;
use crate::user::errors::EmailError;

/// Error for ContactName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactNameError {
    #[error("Contact name must not be empty")]
    Empty,

    #[error("Contact name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all contact-related operations
#[derive(Debug, Clone, Error)]
pub enum ContactError {
    #[error("Invalid name: {0}")]
    InvalidName(#[from] ContactNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Unknown contact field: {0}")]
    InvalidField(String),

    #[error("Invalid birthday, expected YYYY-MM-DD: {0}")]
    InvalidBirthday(String),

    #[error("Not found")]
    NotFound(ContactId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for ContactError {
    fn from(err: anyhow::Error) -> Self {
        ContactError::Unknown(err.to_string())
    }
}
