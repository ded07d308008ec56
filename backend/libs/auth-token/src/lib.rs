/// Shared JWT validation for the piazza services
///
/// Access tokens are RS256 only; symmetric algorithms are rejected outright
/// so a forged `alg` header cannot downgrade validation. Keys are installed
/// once at startup from PEM material and are immutable afterwards.
///
/// The service side only ever needs `initialize_validation_key` +
/// `validate_token`; `initialize_signing_key` + `generate_token` exist for
/// the token-issuing side and for test fixtures.
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 1;

const JWT_ALGORITHM: Algorithm = Algorithm::RS256;

/// JWT claims carried by a piazza access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Display name, informational only
    pub username: String,
}

static JWT_ENCODING_KEY: OnceCell<EncodingKey> = OnceCell::new();
static JWT_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

/// Install the RSA public key used to validate tokens.
///
/// Must be called during startup before any call to `validate_token`.
/// Subsequent calls return an error.
pub fn initialize_validation_key(public_key_pem: &str) -> Result<()> {
    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| anyhow!("invalid RSA public key PEM: {}", e))?;

    JWT_DECODING_KEY
        .set(decoding_key)
        .map_err(|_| anyhow!("JWT validation key already initialized"))
}

/// Install the RSA private key used to sign tokens.
///
/// Only the identity provider (and test fixtures) signs tokens; services
/// that merely validate never call this.
pub fn initialize_signing_key(private_key_pem: &str) -> Result<()> {
    let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
        .map_err(|e| anyhow!("invalid RSA private key PEM: {}", e))?;

    JWT_ENCODING_KEY
        .set(encoding_key)
        .map_err(|_| anyhow!("JWT signing key already initialized"))
}

/// Validate an access token and return its decoded claims.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let decoding_key = JWT_DECODING_KEY
        .get()
        .ok_or_else(|| anyhow!("JWT validation key not initialized"))?;

    let validation = Validation::new(JWT_ALGORITHM);

    decode::<Claims>(token, decoding_key, &validation)
        .map_err(|e| anyhow!("token validation failed: {}", e))
}

/// Sign a fresh access token for the given user.
pub fn generate_token(user_id: Uuid, username: &str) -> Result<String> {
    let encoding_key = JWT_ENCODING_KEY
        .get()
        .ok_or_else(|| anyhow!("JWT signing key not initialized"))?;

    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS)).timestamp(),
        username: username.to_string(),
    };

    encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key)
        .map_err(|e| anyhow!("token signing failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_round_trip_through_json() {
        let claims = Claims {
            sub: Uuid::nil().to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
            username: "amira".to_string(),
        };

        let json = serde_json::to_string(&claims).unwrap();
        let back: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(back.sub, claims.sub);
        assert_eq!(back.exp, claims.exp);
        assert_eq!(back.username, "amira");
    }

    #[test]
    fn validate_rejects_garbage_token() {
        // Regardless of key state, a structurally invalid token never decodes.
        let result = validate_token("not-a-jwt");
        assert!(result.is_err());
    }

    #[test]
    fn initialize_rejects_non_pem_material() {
        assert!(initialize_validation_key("definitely not pem").is_err());
    }
}
