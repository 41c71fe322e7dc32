use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::EmailDispatchError;
use crate::domain::auth::models::EmailConfirmation;
use crate::domain::auth::models::EmailRequest;
use crate::domain::auth::models::Session;
use crate::domain::auth::models::SignupCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::VerificationEmail;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;

/// Port for account authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new, unconfirmed account and send its verification email.
    ///
    /// # Arguments
    /// * `command` - Validated email, plain password and optional name
    ///
    /// # Returns
    /// Created account
    ///
    /// # Errors
    /// * `AccountAlreadyExists` - Email is already registered
    /// * `User` - Directory operation failed
    async fn signup(&self, command: SignupCommand) -> Result<User, AuthError>;

    /// Exchange credentials for a new token pair.
    ///
    /// The issued refresh token replaces whatever was stored before.
    ///
    /// # Arguments
    /// * `email` - Login name, expected to be an email address
    /// * `password` - Plain text password
    ///
    /// # Errors
    /// * `InvalidEmail` - No such account
    /// * `EmailNotConfirmed` - Account email is not confirmed yet
    /// * `InvalidPassword` - Password does not match
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Rotate the token pair of an authorized session.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Another refresh consumed the token first;
    ///   the stored token is revoked
    async fn refresh(&self, session: &Session) -> Result<TokenPair, AuthError>;

    /// Confirm an account from its email-verification token.
    ///
    /// # Errors
    /// * `InvalidVerificationToken` - Token does not decode
    /// * `VerificationFailed` - Token subject has no account
    async fn confirm_email(&self, token: &str) -> Result<EmailConfirmation, AuthError>;

    /// Send a fresh verification email.
    ///
    /// Unknown addresses report `Sent` without dispatching anything.
    async fn request_email(&self, email: &EmailAddress) -> Result<EmailRequest, AuthError>;

    /// Resolve the account behind an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Token is invalid, not an access token, or its
    ///   account is gone
    async fn current_user(&self, access_token: &str) -> Result<User, AuthError>;

    /// Validate a refresh token against the one on record.
    ///
    /// A well-formed token that differs from the stored one revokes the
    /// stored token before failing.
    ///
    /// # Errors
    /// * `InvalidScope` - Token is not a refresh token
    /// * `InvalidCredentials` - Signature or expiry check failed
    /// * `InvalidRefreshToken` - No account, or token is not the current one
    async fn authorize(&self, refresh_token: &str) -> Result<Session, AuthError>;
}

/// Outbound delivery of verification emails.
#[async_trait]
pub trait EmailDispatcher: Send + Sync + 'static {
    /// Hand a verification email over for delivery.
    ///
    /// # Errors
    /// * `SerializationFailed` - Message serialization failed
    /// * `PublishFailed` - Failed to publish to broker
    async fn send_verification(&self, email: &VerificationEmail)
        -> Result<(), EmailDispatchError>;
}
