use crate::{env_or_default, env_parse_or, ConfigError, FromEnv};
use std::net::Ipv4Addr;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8080;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Externally reachable base URL, without a trailing slash.
    pub public_url: String,
    /// Root directory for static assets.
    pub public_dir: PathBuf,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            public_url: format!("http://localhost:{}", port),
            host,
            port,
            public_dir: PathBuf::from("public"),
        }
    }

    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = normalize_url(&url.into());
        self
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables:
    /// - HOST: defaults to 0.0.0.0
    /// - PORT: defaults to 8080
    /// - APP_URL: defaults to `http://localhost:{PORT}`
    /// - PUBLIC_DIR: defaults to `public`
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_parse_or("PORT", DEFAULT_PORT)?;
        let public_url = env_or_default("APP_URL", &format!("http://localhost:{}", port));
        let public_dir = PathBuf::from(env_or_default("PUBLIC_DIR", "public"));

        Ok(Self {
            host,
            port,
            public_url: normalize_url(&public_url),
            public_dir,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED.to_string(), DEFAULT_PORT)
    }
}
