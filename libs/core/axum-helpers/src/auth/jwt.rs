use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Claims carried by bearer tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user id
    pub name: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// HS256 token issuer and verifier. Cheap to clone.
#[derive(Clone)]
pub struct JwtAuth {
    keys: Arc<Keys>,
    ttl_secs: i64,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
            ttl_secs: config.ttl_secs,
        }
    }

    /// Issue a token for a user.
    pub fn create_token(&self, user_id: &str, name: &str, email: &str) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)?;
        Ok(token)
    }

    /// Check signature and expiry, returning the claims.
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let data = decode::<JwtClaims>(
            token,
            &self.keys.decoding,
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}
