//! Authentication utilities library
//!
//! Provides the account authentication building blocks used by the
//! contacts service:
//! - Password hashing (Argon2id)
//! - Signed, expiring JWT claims with an access/refresh scope
//! - An [`Authenticator`] context that issues and decodes the three token
//!   kinds (access, refresh, email verification)
//!
//! Storage concerns (which refresh token is current for a user, whether an
//! email is confirmed) belong to the service; everything here is pure.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler, TokenScope};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::new().with_subject("a@x.com");
//! let token = handler
//!     .encode(&claims, Some(TokenScope::AccessToken), Duration::minutes(15))
//!     .unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.scope, Some(TokenScope::AccessToken));
//! ```
//!
//! ## Token Lifecycle
//! ```
//! use auth::{AuthConfig, Authenticator};
//!
//! let auth = Authenticator::new(AuthConfig::new("secret_key_at_least_32_bytes_long!")).unwrap();
//!
//! let hash = auth.hash_password("password123").unwrap();
//! assert!(auth.authenticate_password("password123", &hash));
//!
//! let access = auth.issue_access_token("a@x.com", None).unwrap();
//! let refresh = auth.issue_refresh_token("a@x.com", None).unwrap();
//!
//! assert_eq!(auth.decode_access(&access).unwrap(), "a@x.com");
//! assert_eq!(auth.decode_refresh(&refresh).unwrap(), "a@x.com");
//! assert!(auth.decode_refresh(&access).is_err());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthConfig;
pub use authenticator::Authenticator;
pub use authenticator::TokenError;
pub use jsonwebtoken::Algorithm;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenScope;
pub use password::PasswordError;
pub use password::PasswordHasher;
