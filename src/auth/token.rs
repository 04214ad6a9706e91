use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{Config, ACCESS_TOKEN_TTL};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user name
    pub uid: i64,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn new(subject: impl Into<String>, uid: i64, ttl: chrono::Duration) -> Self {
        let now = chrono::Utc::now();
        Self {
            sub: subject.into(),
            uid,
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        }
    }
}

/// Signs and checks HS256 access tokens with one process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: ACCESS_TOKEN_TTL,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.secret_key.as_bytes())
    }

    /// Issues a token for user `uid` named `subject`, expiring
    /// `ACCESS_TOKEN_TTL` from now.
    pub fn issue(&self, subject: &str, uid: i64) -> Result<String, AppError> {
        self.encode(&Claims::new(subject, uid, self.ttl))
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        let token = encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Fails with `Unauthorized` on a bad signature, a malformed token or an
    /// elapsed expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected token: {}", e);
                AppError::Unauthorized
            })
    }
}
