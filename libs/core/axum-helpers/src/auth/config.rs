use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

const MIN_SECRET_LEN: usize = 32;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_TTL_SECS` (optional, default 3600)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_secs: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least {} characters (got {}). Generate one with: openssl rand -base64 32",
                    MIN_SECRET_LEN,
                    secret.len()
                ),
            });
        }

        Ok(Self {
            secret,
            ttl_secs: 3600,
        })
    }

    pub fn with_ttl(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let ttl = env_parse_or("JWT_TTL_SECS", 3600)?;
        Ok(Self::new(env_required("JWT_SECRET")?)?.with_ttl(ttl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_jwt_config_new() {
        let config = JwtConfig::new(SECRET).unwrap();
        assert_eq!(config.secret, SECRET);
        assert_eq!(config.ttl_secs, 3600);

        let err = JwtConfig::new("short").unwrap_err();
        assert!(err.to_string().contains("32 characters"));
    }

    #[test]
    fn test_jwt_config_from_env() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_TTL_SECS", Some("60"))],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.ttl_secs, 60);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }
}
