use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Persistence operations for accounts (the user directory).
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Arguments
    /// * `user` - Account to create
    ///
    /// # Returns
    /// Created account with its assigned identifier
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve account by email address.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Overwrite the stored refresh token unconditionally.
    ///
    /// # Arguments
    /// * `id` - Account to update
    /// * `token` - New refresh token, `None` to revoke
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_refresh_token(&self, id: UserId, token: Option<String>)
        -> Result<(), UserError>;

    /// Replace the stored refresh token only if it still equals `expected`.
    ///
    /// Check and write happen in one statement so two concurrent callers
    /// presenting the same token cannot both succeed.
    ///
    /// # Returns
    /// `true` if the swap happened, `false` if the stored token differed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn replace_refresh_token(
        &self,
        id: UserId,
        expected: &str,
        replacement: Option<String>,
    ) -> Result<bool, UserError>;

    /// Mark the account's email address as confirmed.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn confirm_email(&self, id: UserId) -> Result<(), UserError>;
}
