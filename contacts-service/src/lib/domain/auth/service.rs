use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenError;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::EmailConfirmation;
use crate::domain::auth::models::EmailRequest;
use crate::domain::auth::models::Session;
use crate::domain::auth::models::SignupCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::VerificationEmail;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::EmailDispatcher;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Domain service implementation for account authentication.
///
/// Combines the password hasher and token codec held by the
/// [`Authenticator`] with the user directory. The directory is the single
/// source of truth for which refresh token is currently valid.
pub struct AuthService<UR, ED>
where
    UR: UserRepository,
    ED: EmailDispatcher,
{
    repository: Arc<UR>,
    email_dispatcher: Arc<ED>,
    authenticator: Arc<Authenticator>,
}

impl<UR, ED> AuthService<UR, ED>
where
    UR: UserRepository,
    ED: EmailDispatcher,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User directory implementation
    /// * `email_dispatcher` - Verification email delivery
    /// * `authenticator` - Password hashing and token context
    pub fn new(
        repository: Arc<UR>,
        email_dispatcher: Arc<ED>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            email_dispatcher,
            authenticator,
        }
    }

    fn issue_token_pair(&self, email: &EmailAddress) -> Result<TokenPair, AuthError> {
        let access_token = self.authenticator.issue_access_token(email.as_str(), None)?;
        let refresh_token = self.authenticator.issue_refresh_token(email.as_str(), None)?;

        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Issue an email token and hand it to the dispatcher.
    ///
    /// Dispatch failures are logged, never returned.
    async fn send_verification_email(&self, user: &User) -> Result<(), AuthError> {
        let token = self.authenticator.issue_email_token(user.email.as_str())?;
        let email = VerificationEmail {
            email: user.email.clone(),
            name: user.name.clone(),
            token,
        };

        if let Err(e) = self.email_dispatcher.send_verification(&email).await {
            tracing::error!(
                user_id = %user.id,
                error = %e,
                "Failed to dispatch verification email"
            );
        }

        Ok(())
    }

    async fn revoke_refresh_token(&self, user: &User) -> Result<(), AuthError> {
        tracing::warn!(user_id = %user.id, "Refresh token mismatch, revoking stored token");
        self.repository.update_refresh_token(user.id, None).await?;
        Ok(())
    }
}

fn refresh_token_error(err: TokenError) -> AuthError {
    match err {
        TokenError::InvalidScope => AuthError::InvalidScope,
        TokenError::MissingSubject | TokenError::Jwt(_) => AuthError::InvalidCredentials,
    }
}

#[async_trait]
impl<UR, ED> AuthServicePort for AuthService<UR, ED>
where
    UR: UserRepository,
    ED: EmailDispatcher,
{
    async fn signup(&self, command: SignupCommand) -> Result<User, AuthError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AuthError::AccountAlreadyExists);
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = self
            .repository
            .create(NewUser {
                email: command.email,
                name: command.name,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                UserError::EmailAlreadyExists(_) => AuthError::AccountAlreadyExists,
                other => AuthError::User(other),
            })?;

        tracing::info!(user_id = %user.id, "Account created, awaiting email confirmation");

        self.send_verification_email(&user).await?;

        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let email =
            EmailAddress::new(email.to_string()).map_err(|_| AuthError::InvalidEmail)?;

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidEmail)?;

        if !user.email_confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }

        if !self
            .authenticator
            .authenticate_password(password, &user.password_hash)
        {
            return Err(AuthError::InvalidPassword);
        }

        let pair = self.issue_token_pair(&user.email)?;
        self.repository
            .update_refresh_token(user.id, Some(pair.refresh_token.clone()))
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(pair)
    }

    async fn refresh(&self, session: &Session) -> Result<TokenPair, AuthError> {
        let pair = self.issue_token_pair(&session.email)?;

        let swapped = self
            .repository
            .replace_refresh_token(
                session.user.id,
                &session.token,
                Some(pair.refresh_token.clone()),
            )
            .await?;

        if !swapped {
            // A concurrent refresh consumed the token after authorization
            self.revoke_refresh_token(&session.user).await?;
            return Err(AuthError::InvalidRefreshToken);
        }

        tracing::debug!(user_id = %session.user.id, "Token pair rotated");

        Ok(pair)
    }

    async fn confirm_email(&self, token: &str) -> Result<EmailConfirmation, AuthError> {
        let subject = self.authenticator.decode_email_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Email verification token rejected");
            AuthError::InvalidVerificationToken
        })?;

        let email = EmailAddress::new(subject).map_err(|_| AuthError::VerificationFailed)?;

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::VerificationFailed)?;

        if user.email_confirmed {
            return Ok(EmailConfirmation::AlreadyConfirmed);
        }

        self.repository.confirm_email(user.id).await?;
        tracing::info!(user_id = %user.id, "Email confirmed");

        Ok(EmailConfirmation::Confirmed)
    }

    async fn request_email(&self, email: &EmailAddress) -> Result<EmailRequest, AuthError> {
        match self.repository.find_by_email(email).await? {
            Some(user) if user.email_confirmed => Ok(EmailRequest::AlreadyConfirmed),
            Some(user) => {
                self.send_verification_email(&user).await?;
                Ok(EmailRequest::Sent)
            }
            None => {
                tracing::debug!("Verification email requested for unknown address");
                Ok(EmailRequest::Sent)
            }
        }
    }

    async fn current_user(&self, access_token: &str) -> Result<User, AuthError> {
        let subject = self.authenticator.decode_access(access_token).map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            AuthError::InvalidCredentials
        })?;

        let email = EmailAddress::new(subject).map_err(|_| AuthError::InvalidCredentials)?;

        self.repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn authorize(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let subject = self
            .authenticator
            .decode_refresh(refresh_token)
            .map_err(refresh_token_error)?;

        let email = EmailAddress::new(subject).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            self.revoke_refresh_token(&user).await?;
            return Err(AuthError::InvalidRefreshToken);
        }

        Ok(Session {
            token: refresh_token.to_string(),
            email,
            user,
        })
    }
}
