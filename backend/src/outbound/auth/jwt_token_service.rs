//! JWT implementation of the stateless admin credential.
//!
//! Tokens are HS256-signed with a configured secret and carry the profile
//! id as subject. The secret itself is never logged; operators identify
//! the active key by its truncated SHA-256 fingerprint.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::ProfileId;
use crate::domain::ports::{TokenService, TokenServiceError};

/// Length of the secret fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Claims carried by the admin token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the profile id.
    pub sub: String,
    /// Expiration time (unix seconds).
    pub exp: i64,
    /// Issued at (unix seconds).
    pub iat: i64,
}

impl Claims {
    fn new(profile_id: ProfileId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: profile_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// HS256 JWT implementation of the [`TokenService`] port.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenService {
    /// Create a token service signing with `secret` and issuing tokens
    /// valid for `ttl`.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            ttl,
        }
    }

    /// Convenience constructor with the standard 24-hour validity.
    pub fn with_default_ttl(secret: &[u8]) -> Self {
        Self::new(secret, Duration::hours(24))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, profile_id: ProfileId) -> Result<String, TokenServiceError> {
        let claims = Claims::new(profile_id, self.ttl);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| TokenServiceError::issue(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<ProfileId, TokenServiceError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenServiceError::Invalid)?;
        let id = data
            .claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| TokenServiceError::Invalid)?;
        Ok(ProfileId::from_uuid(id))
    }
}

/// Truncated SHA-256 fingerprint of the signing secret.
///
/// Logged at startup so operators can tell which key is active without
/// exposing the key material; 8 bytes of hash is plenty for visual
/// distinction and carries no security weight.
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    let digest = hasher.finalize();
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
