//! Configuration for Products API

use axum_helpers::JwtConfig;
use core_config::{app_info, env_parse_or, server::ServerConfig, AppInfo, FromEnv};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            database: PostgresConfig::from_env()?,
            server: ServerConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            environment: Environment::from_env(),
            run_migrations: env_parse_or("RUN_MIGRATIONS", true)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "config-test-secret-with-32-characters";

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://app:pw@localhost/catalog")),
                ("JWT_SECRET", Some(SECRET)),
                ("PORT", Some("9000")),
                ("APP_URL", None),
                ("RUN_MIGRATIONS", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "products_api");
                assert_eq!(config.server.port, 9000);
                assert_eq!(config.server.public_url, "http://localhost:9000");
                assert!(config.run_migrations);
            },
        );
    }

    #[test]
    fn test_missing_jwt_secret_fails() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/catalog")),
                ("JWT_SECRET", None),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }

    #[test]
    fn test_run_migrations_can_be_disabled() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/catalog")),
                ("JWT_SECRET", Some(SECRET)),
                ("RUN_MIGRATIONS", Some("false")),
            ],
            || {
                assert!(!Config::from_env().unwrap().run_migrations);
            },
        );
    }
}
