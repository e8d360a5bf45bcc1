//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono::FixedOffset;

use super::constants::{
    DEFAULT_CEP_LOOKUP_TIMEOUT_SECS, DEFAULT_CEP_LOOKUP_URL, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_UTC_OFFSET, MIN_JWT_SECRET_LENGTH,
};
use crate::domain::VisibilityScope;
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Offset that defines the local calendar day
    pub utc_offset: FixedOffset,
    /// Scoping rule for employee listing and reports
    pub visibility_scope: VisibilityScope,
    pub cep_lookup_url: String,
    pub cep_lookup_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("utc_offset", &self.utc_offset)
            .field("visibility_scope", &self.visibility_scope)
            .field("cep_lookup_url", &self.cep_lookup_url)
            .field("cep_lookup_timeout", &self.cep_lookup_timeout)
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults for everything but the
    /// connection URL and the signing secret.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: database_url.into(),
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            utc_offset: parse_offset(DEFAULT_UTC_OFFSET)?,
            visibility_scope: VisibilityScope::default(),
            cep_lookup_url: DEFAULT_CEP_LOOKUP_URL.to_string(),
            cep_lookup_timeout: Duration::from_secs(DEFAULT_CEP_LOOKUP_TIMEOUT_SECS),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set in release builds, if it is too short,
    /// or if APP_UTC_OFFSET / VISIBILITY_SCOPE hold unparseable values.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let mut config = match Self::new(database_url, jwt_secret) {
            Ok(config) => config,
            Err(e) => panic!("Invalid configuration: {:?}", e),
        };

        if let Some(max) = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.database_max_connections = max;
        }
        if let Some(hours) = env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.jwt_expiration_hours = hours;
        }
        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = env::var("SERVER_PORT").ok().and_then(|v| v.parse().ok()) {
            config.server_port = port;
        }
        if let Ok(raw) = env::var("APP_UTC_OFFSET") {
            config.utc_offset = parse_offset(&raw)
                .unwrap_or_else(|_| panic!("APP_UTC_OFFSET must look like -03:00, got {}", raw));
        }
        if let Ok(raw) = env::var("VISIBILITY_SCOPE") {
            config.visibility_scope = VisibilityScope::from_str(&raw).unwrap_or_else(|_| {
                panic!("VISIBILITY_SCOPE must be owned or global, got {}", raw)
            });
        }
        if let Ok(url) = env::var("CEP_LOOKUP_URL") {
            config.cep_lookup_url = url;
        }
        if let Some(secs) = env::var("CEP_LOOKUP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.cep_lookup_timeout = Duration::from_secs(secs);
        }

        config
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Parse a `±HH:MM` offset.
fn parse_offset(raw: &str) -> AppResult<FixedOffset> {
    FixedOffset::from_str(raw.trim())
        .map_err(|e| AppError::internal(format!("invalid UTC offset {}: {}", raw, e)))
}
