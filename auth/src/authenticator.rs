use chrono::Duration;
use jsonwebtoken::Algorithm;
use uuid::Uuid;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenScope;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Signing and lifetime settings for issued tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub email_token_ttl: Duration,
}

impl AuthConfig {
    /// Default lifetimes: access 15 minutes, refresh 7 days, email 7 days.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            access_token_ttl: Duration::minutes(15),
            refresh_token_ttl: Duration::days(7),
            email_token_ttl: Duration::days(7),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }

    pub fn with_email_token_ttl(mut self, ttl: Duration) -> Self {
        self.email_token_ttl = ttl;
        self
    }
}

/// Token decoding errors surfaced to services.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid scope for token")]
    InvalidScope,

    #[error("Token has no subject")]
    MissingSubject,

    #[error(transparent)]
    Jwt(#[from] JwtError),
}

/// Authentication context combining password hashing and token handling.
///
/// Holds the signing secret, algorithm and token lifetimes so that services
/// receive everything through one explicitly constructed value.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
    email_token_ttl: Duration,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Configured algorithm is not HMAC based
    pub fn new(config: AuthConfig) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::with_algorithm(config.secret.as_bytes(), config.algorithm)?,
            access_token_ttl: config.access_token_ttl,
            refresh_token_ttl: config.refresh_token_ttl,
            email_token_ttl: config.email_token_ttl,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn authenticate_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a short-lived access token for the given account.
    ///
    /// # Arguments
    /// * `email` - Token subject
    /// * `expires_in` - Lifetime override, configured default when `None`
    pub fn issue_access_token(
        &self,
        email: &str,
        expires_in: Option<Duration>,
    ) -> Result<String, JwtError> {
        self.issue(
            email,
            Some(TokenScope::AccessToken),
            expires_in.unwrap_or(self.access_token_ttl),
        )
    }

    /// Issue a refresh token for the given account.
    ///
    /// # Arguments
    /// * `email` - Token subject
    /// * `expires_in` - Lifetime override, configured default when `None`
    pub fn issue_refresh_token(
        &self,
        email: &str,
        expires_in: Option<Duration>,
    ) -> Result<String, JwtError> {
        self.issue(
            email,
            Some(TokenScope::RefreshToken),
            expires_in.unwrap_or(self.refresh_token_ttl),
        )
    }

    /// Issue an email-verification token.
    ///
    /// These tokens carry no scope claim and are only ever decoded by
    /// [`Authenticator::decode_email_token`].
    pub fn issue_email_token(&self, email: &str) -> Result<String, JwtError> {
        self.issue(email, None, self.email_token_ttl)
    }

    /// Decode an access token and return its subject.
    ///
    /// # Errors
    /// * `InvalidScope` - Token is not an access token
    /// * `MissingSubject` - Token has no subject
    /// * `Jwt` - Signature, expiry or format check failed
    pub fn decode_access(&self, token: &str) -> Result<String, TokenError> {
        self.decode_scoped(token, TokenScope::AccessToken)
    }

    /// Decode a refresh token and return its subject.
    ///
    /// # Errors
    /// * `InvalidScope` - Token is not a refresh token
    /// * `MissingSubject` - Token has no subject
    /// * `Jwt` - Signature, expiry or format check failed
    pub fn decode_refresh(&self, token: &str) -> Result<String, TokenError> {
        self.decode_scoped(token, TokenScope::RefreshToken)
    }

    /// Decode an email-verification token and return its subject.
    ///
    /// The scope claim is not checked.
    pub fn decode_email_token(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.jwt_handler.decode(token)?;
        claims.sub.ok_or(TokenError::MissingSubject)
    }

    fn issue(
        &self,
        email: &str,
        scope: Option<TokenScope>,
        expires_in: Duration,
    ) -> Result<String, JwtError> {
        let claims = Claims::new()
            .with_subject(email)
            .with_token_id(Uuid::new_v4());

        self.jwt_handler.encode(&claims, scope, expires_in)
    }

    fn decode_scoped(&self, token: &str, scope: TokenScope) -> Result<String, TokenError> {
        let claims = self.jwt_handler.decode(token)?;

        if !claims.has_scope(scope) {
            return Err(TokenError::InvalidScope);
        }

        claims.sub.ok_or(TokenError::MissingSubject)
    }
}
