use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Error for email dispatch operations
#[derive(Debug, Clone, Error)]
pub enum EmailDispatchError {
    #[error("Failed to serialize email message: {0}")]
    SerializationFailed(String),

    #[error("Failed to publish email message to broker: {0}")]
    PublishFailed(String),
}

/// Errors raised by the account authentication flows.
///
/// Display strings of the credential variants are returned verbatim to
/// clients.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Account already exist")]
    AccountAlreadyExists,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Email not confirmed")]
    EmailNotConfirmed,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Invalid scope for token")]
    InvalidScope,

    #[error("Could not validate credentials")]
    InvalidCredentials,

    #[error("Invalid token for email verification")]
    InvalidVerificationToken,

    #[error("Verification error")]
    VerificationFailed,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error(transparent)]
    User(#[from] UserError),
}
