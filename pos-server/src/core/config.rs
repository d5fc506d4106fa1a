//! Server configuration

use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_DIR | (unset) | Daily-rolling log file directory |
/// | JWT_SECRET | (generated in dev) | Token signing secret, >= 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |
/// | ADMIN_EMAIL | admin@pos.local | Bootstrap admin account email |
/// | ADMIN_PASSWORD | (generated in dev) | Bootstrap admin password |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 ENVIRONMENT=production cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional directory for daily-rolling log files
    pub log_dir: Option<String>,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Bootstrap admin email, used only when the store is empty
    pub admin_email: String,
    /// Bootstrap admin password, used only when the store is empty
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            jwt: JwtConfig::default(),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@pos.local".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    /// Override selected fields, mainly for tests
    pub fn with_overrides(http_port: u16, environment: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.environment = environment.into();
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
