use std::env;

use crate::auth::DeliveryPolicy;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host (default: 0.0.0.0)
    pub host: String,
    /// Server port (default: 3000)
    pub port: u16,
    /// Deployment mode selecting cookie delivery defaults (default: production)
    pub mode: DeploymentMode,
    /// Secret key for signing pad credentials (required, 32+ bytes recommended)
    pub signing_key: Vec<u8>,
    /// Override for the cookie `Secure` attribute, independent of mode
    pub cookie_secure: Option<bool>,
    /// Override for the cookie `HttpOnly` attribute, independent of mode
    pub cookie_http_only: Option<bool>,
}

/// Deployment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    Production,
    Development,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A missing or empty signing key is a fatal error: the server must
    /// refuse to start rather than serve with an unverifiable gate.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let mode = match env::var("SCRAWL_ENV").unwrap_or_default().to_lowercase().as_str() {
            "development" | "dev" => DeploymentMode::Development,
            _ => DeploymentMode::Production,
        };

        let signing_key = env::var("SCRAWL_SIGNING_KEY")
            .map(String::into_bytes)
            .unwrap_or_default();
        if signing_key.is_empty() {
            return Err(ConfigError::MissingSigningKey);
        }
        if signing_key.len() < 32 {
            tracing::warn!(
                "SCRAWL_SIGNING_KEY is {} bytes; 32+ bytes of high-entropy material recommended",
                signing_key.len()
            );
        }

        Ok(Config {
            host,
            port,
            mode,
            signing_key,
            cookie_secure: bool_var("SCRAWL_COOKIE_SECURE"),
            cookie_http_only: bool_var("SCRAWL_COOKIE_HTTP_ONLY"),
        })
    }

    /// Cookie delivery policy: mode defaults with the per-attribute
    /// overrides applied on top.
    pub fn delivery_policy(&self) -> DeliveryPolicy {
        let defaults = DeliveryPolicy::for_mode(self.mode);
        DeliveryPolicy {
            transport_restricted: self.cookie_secure.unwrap_or(defaults.transport_restricted),
            script_access_restricted: self
                .cookie_http_only
                .unwrap_or(defaults.script_access_restricted),
        }
    }

    /// Get the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn bool_var(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1"))
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    MissingSigningKey,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "Invalid PORT environment variable"),
            ConfigError::MissingSigningKey => {
                write!(f, "SCRAWL_SIGNING_KEY is not set; refusing to serve")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
