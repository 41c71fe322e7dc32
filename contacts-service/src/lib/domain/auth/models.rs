use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;

/// Token type reported alongside every issued pair.
pub const TOKEN_TYPE: &str = "bearer";

/// Command to register a new account
#[derive(Debug)]
pub struct SignupCommand {
    pub email: EmailAddress,
    pub password: String,
    pub name: Option<String>,
}

impl SignupCommand {
    /// Construct a new signup command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    /// * `name` - Optional display name
    pub fn new(email: EmailAddress, password: String, name: Option<String>) -> Self {
        Self {
            email,
            password,
            name,
        }
    }
}

/// Access and refresh tokens issued together at login or refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE,
        }
    }
}

/// Refresh token that matched the one on record, with its owner.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub email: EmailAddress,
    pub user: User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailConfirmation {
    Confirmed,
    AlreadyConfirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailRequest {
    Sent,
    AlreadyConfirmed,
}

/// Verification email handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub email: EmailAddress,
    pub name: Option<String>,
    pub token: String,
}
