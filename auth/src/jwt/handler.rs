use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::JwtError;

/// JWT token handler for issuing and validating session tokens.
///
/// Uses HS256 (HMAC with SHA-256). The handler owns the signing key for the
/// lifetime of the process; it is built once at startup and shared.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Errors
    /// * `MissingSigningKey` - The secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSigningKey);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Arguments
    /// * `claims` - Session claims to sign
    ///
    /// # Returns
    /// URL-safe JWT token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token against the current time.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature mismatch, malformed token, wrong claim shape,
    ///   or issued in the future
    /// * `TokenExpired` - Token is at or past its expiration time
    pub fn decode(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.decode_at(token, Utc::now().timestamp())
    }

    /// Decode and validate a JWT token against an explicit clock value.
    ///
    /// Claims are only returned when the signature checks out and
    /// `iat <= now < exp`.
    pub fn decode_at(&self, token: &str, now: i64) -> Result<SessionClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Time bounds are checked below against `now`, with no leeway.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?
            .claims;

        if claims.is_not_yet_valid(now) {
            return Err(JwtError::InvalidToken("token used before issue time".to_string()));
        }

        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    fn handler() -> JwtHandler {
        JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!").unwrap()
    }

    fn claims() -> SessionClaims {
        SessionClaims::for_user(1, "User1", "user1@example.com", 24)
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert!(matches!(
            JwtHandler::new(b""),
            Err(JwtError::MissingSigningKey)
        ));
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = handler();
        let claims = claims();

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'));

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_invalid_token() {
        let result = handler().decode("invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!").unwrap();
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!").unwrap();

        let token = handler1.encode(&claims()).expect("Failed to encode token");

        let result = handler2.decode(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_tampered_payload() {
        let handler = handler();
        let token = handler.encode(&claims()).unwrap();
        let other = handler
            .encode(&SessionClaims::for_user(2, "User2", "user2@example.com", 24))
            .unwrap();

        // Splice the payload of one token onto the signature of another
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(matches!(
            handler.decode(&forged),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_decode_wrong_claim_shape() {
        #[derive(Serialize)]
        struct OtherClaims {
            sub: String,
            exp: i64,
        }

        let secret = b"my_secret_key_at_least_32_bytes_long!";
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &OtherClaims {
                sub: "user123".to_string(),
                exp: Utc::now().timestamp() + 3_600,
            },
            &EncodingKey::from_secret(secret),
        )
        .unwrap();

        let result = JwtHandler::new(secret).unwrap().decode(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_at_respects_validity_window() {
        let handler = handler();
        let claims = SessionClaims::issued_at(10_000, 1, "User1", "user1@example.com", 1);
        let token = handler.encode(&claims).unwrap();

        assert_eq!(handler.decode_at(&token, 10_000).unwrap(), claims);
        assert_eq!(handler.decode_at(&token, 13_599).unwrap(), claims);
        assert_eq!(
            handler.decode_at(&token, 13_600),
            Err(JwtError::TokenExpired)
        );
        assert!(matches!(
            handler.decode_at(&token, 9_999),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_zero_duration_token_is_immediately_invalid() {
        let handler = handler();
        let claims = SessionClaims::for_user(1, "User1", "user1@example.com", 0);
        let token = handler.encode(&claims).unwrap();

        assert_eq!(handler.decode(&token), Err(JwtError::TokenExpired));
    }
}
