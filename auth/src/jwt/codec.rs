use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenScope;
use super::errors::JwtError;

/// JWT token codec for encoding and decoding signed, expiring claims.
///
/// Only HMAC algorithms are supported since all tokens are signed and
/// verified with the same shared secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler using HS256.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Create a JWT handler for a specific HMAC algorithm.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret
    /// * `algorithm` - One of HS256, HS384, HS512
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Algorithm is not HMAC based
    pub fn with_algorithm(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(Self {
                algorithm,
                ..Self::new(secret)
            }),
            other => Err(JwtError::UnsupportedAlgorithm(format!("{:?}", other))),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Encode claims into a signed JWT token.
    ///
    /// Stamps `iat` (now), `exp` (now + `expires_in`) and `scope` onto a copy
    /// of the given claims. Any values already present for those three claims
    /// are replaced.
    ///
    /// # Arguments
    /// * `claims` - Caller claims (subject, token id, custom fields)
    /// * `scope` - Token use, `None` for unscoped tokens
    /// * `expires_in` - Lifetime of the token
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(
        &self,
        claims: &Claims,
        scope: Option<TokenScope>,
        expires_in: Duration,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let mut claims = claims.clone();
        claims.iat = Some(now.timestamp());
        claims.exp = Some((now + expires_in).timestamp());
        claims.scope = scope;

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and verify a JWT token.
    ///
    /// Pure verification: checks the signature and expiry, nothing else.
    /// Callers are responsible for checking `scope`.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not verify under the secret
    /// * `TokenExpired` - Current time is at or past `exp`
    /// * `MissingClaim` - Token has no `exp` claim
    /// * `DecodingFailed` - Token is malformed
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_aud = false;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
                    _ => JwtError::DecodingFailed(e.to_string()),
                }
            })?;

        // jsonwebtoken accepts a token during its `exp` second
        if token_data.claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Serialize;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);

        let claims = Claims::new()
            .with_subject("a@x.com")
            .with_extra("role", "admin")
            .with_extra("level", 3);

        let token = handler
            .encode(&claims, Some(TokenScope::AccessToken), Duration::minutes(15))
            .expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded = handler.decode(&token).expect("Failed to decode token");

        // Original claims come back with iat/exp/scope added
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.extra, claims.extra);
        assert_eq!(decoded.scope, Some(TokenScope::AccessToken));
        let iat = decoded.iat.expect("iat stamped");
        let exp = decoded.exp.expect("exp stamped");
        assert_eq!(exp - iat, 15 * 60);
    }

    #[test]
    fn test_encode_without_scope() {
        let handler = JwtHandler::new(SECRET);

        let token = handler
            .encode(&Claims::new().with_subject("a@x.com"), None, Duration::days(7))
            .expect("Failed to encode token");

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded.scope, None);
        assert_eq!(decoded.exp.unwrap() - decoded.iat.unwrap(), 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_encode_replaces_caller_scope() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims {
            scope: Some(TokenScope::AccessToken),
            ..Claims::new().with_subject("a@x.com")
        };

        let token = handler
            .encode(&claims, Some(TokenScope::RefreshToken), Duration::days(7))
            .unwrap();

        let decoded = handler.decode(&token).unwrap();
        assert_eq!(decoded.scope, Some(TokenScope::RefreshToken));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(SECRET);

        let token = handler
            .encode(
                &Claims::new().with_subject("a@x.com"),
                Some(TokenScope::AccessToken),
                Duration::seconds(-10),
            )
            .unwrap();

        assert_eq!(handler.decode(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_decode_token_expiring_now() {
        let handler = JwtHandler::new(SECRET);

        let token = handler
            .encode(&Claims::new().with_subject("a@x.com"), None, Duration::zero())
            .unwrap();

        assert_eq!(handler.decode(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.decode("invalid.token.here");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .encode(&Claims::new().with_subject("a@x.com"), None, Duration::minutes(5))
            .expect("Failed to encode token");

        assert_eq!(handler2.decode(&token), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_decode_tampered_payload() {
        let handler = JwtHandler::new(SECRET);

        let token = handler
            .encode(&Claims::new().with_subject("a@x.com"), None, Duration::minutes(5))
            .unwrap();
        let forged = handler
            .encode(&Claims::new().with_subject("b@x.com"), None, Duration::minutes(5))
            .unwrap();

        // Splice the forged payload onto the original signature
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(handler.decode(&spliced), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_decode_requires_exp() {
        #[derive(Serialize)]
        struct NoExpiry {
            sub: String,
        }

        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &NoExpiry {
                sub: "a@x.com".to_string(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let handler = JwtHandler::new(SECRET);
        assert_eq!(
            handler.decode(&token),
            Err(JwtError::MissingClaim("exp".to_string()))
        );
    }

    #[test]
    fn test_with_algorithm() {
        let handler = JwtHandler::with_algorithm(SECRET, Algorithm::HS512).unwrap();
        assert_eq!(handler.algorithm(), Algorithm::HS512);

        let token = handler
            .encode(&Claims::new().with_subject("a@x.com"), None, Duration::minutes(5))
            .unwrap();
        assert!(handler.decode(&token).is_ok());

        // Token signed with HS512 is rejected by an HS256 handler
        assert!(JwtHandler::new(SECRET).decode(&token).is_err());
    }

    #[test]
    fn test_with_algorithm_rejects_asymmetric() {
        let result = JwtHandler::with_algorithm(SECRET, Algorithm::RS256);
        assert!(matches!(result, Err(JwtError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_extra_claims_survive_round_trip() {
        let handler = JwtHandler::new(SECRET);
        let mut extra = HashMap::new();
        extra.insert("tenant".to_string(), serde_json::json!({"id": 7}));
        let claims = Claims {
            extra,
            ..Claims::new()
        };

        let token = handler.encode(&claims, None, Duration::minutes(1)).unwrap();
        let decoded = handler.decode(&token).unwrap();

        assert_eq!(decoded.extra["tenant"]["id"], 7);
        assert_eq!(decoded.sub, None);
    }
}
