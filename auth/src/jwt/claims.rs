use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Intended use of a token, carried in the `scope` claim.
///
/// Email-verification tokens carry no scope at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    AccessToken,
    RefreshToken,
}

impl TokenScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenScope::AccessToken => "access_token",
            TokenScope::RefreshToken => "refresh_token",
        }
    }
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims structure.
///
/// `iat`, `exp` and `scope` are stamped by [`JwtHandler::encode`]; everything
/// else is set by the caller. Custom fields go into `extra` and are flattened
/// into the token payload.
///
/// [`JwtHandler::encode`]: crate::jwt::JwtHandler::encode
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (account email)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Token use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<TokenScope>,

    /// JWT ID (unique token identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set the unique token identifier.
    pub fn with_token_id(mut self, jti: impl ToString) -> Self {
        self.jti = Some(jti.to_string());
        self
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Check if token is expired at the given instant.
    ///
    /// A token is expired from its `exp` second onwards. Claims without `exp`
    /// never expire.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| current_timestamp >= exp)
    }

    /// Check whether the token was issued for the given use.
    pub fn has_scope(&self, scope: TokenScope) -> bool {
        self.scope == Some(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new().with_subject("a@x.com");
        assert_eq!(claims.sub, Some("a@x.com".to_string()));
        assert!(claims.exp.is_none());
        assert!(claims.scope.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let claims = Claims::new()
            .with_subject("a@x.com")
            .with_token_id("token-1")
            .with_extra("role", "admin");

        assert_eq!(claims.sub, Some("a@x.com".to_string()));
        assert_eq!(claims.jti, Some("token-1".to_string()));
        assert_eq!(claims.extra.get("role").unwrap().as_str(), Some("admin"));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            exp: Some(1000),
            ..Claims::default()
        };

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000)); // Expired at exactly exp
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_is_expired_no_exp_claim() {
        let claims = Claims::new();
        assert!(!claims.is_expired(9999999999));
    }

    #[test]
    fn test_scope_serialization() {
        let claims = Claims {
            scope: Some(TokenScope::RefreshToken),
            ..Claims::new().with_subject("a@x.com")
        };

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["scope"], "refresh_token");
        assert_eq!(value["sub"], "a@x.com");
        assert!(value.get("exp").is_none());

        let email_claims = Claims::new().with_subject("a@x.com");
        let value = serde_json::to_value(&email_claims).unwrap();
        assert!(value.get("scope").is_none());
    }

    #[test]
    fn test_has_scope() {
        let claims = Claims {
            scope: Some(TokenScope::AccessToken),
            ..Claims::default()
        };

        assert!(claims.has_scope(TokenScope::AccessToken));
        assert!(!claims.has_scope(TokenScope::RefreshToken));
        assert!(!Claims::new().has_scope(TokenScope::AccessToken));
    }
}
