use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure loaded from diagnosis_api.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
    pub request_timeout_ms: u64,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080"
                .parse()
                .expect("default bind address should parse"),
            max_body_bytes: 16 * 1024,
            request_timeout_ms: 10_000,
            cors_origins: Vec::new(),
        }
    }
}

/// Tracing filter configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive string
    pub level: String,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "diagnosis_api=info,tower_http=info".to_string(),
            ansi: false,
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    ///
    /// Path resolution: `path` if given, then DIAGNOSIS_API_CONFIG, then
    /// "diagnosis_api.toml". A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        // .env is optional
        let _ = dotenvy::dotenv();

        let config_path = path.map(Path::to_path_buf).unwrap_or_else(|| {
            PathBuf::from(
                std::env::var("DIAGNOSIS_API_CONFIG")
                    .unwrap_or_else(|_| "diagnosis_api.toml".to_string()),
            )
        });

        let mut config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml_str(&content)?
        } else {
            tracing::warn!(
                "Config file {} not found, using defaults",
                config_path.display()
            );
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply DIAG_* and RUST_LOG overrides (env-first)
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(bind) = std::env::var("DIAG_HTTP_BIND") {
            self.server.bind = bind
                .parse()
                .map_err(|e| anyhow::anyhow!("DIAG_HTTP_BIND '{}' is invalid: {}", bind, e))?;
            tracing::debug!("DIAG_HTTP_BIND env override applied");
        }
        if let Ok(raw) = std::env::var("DIAG_MAX_BODY_BYTES") {
            self.server.max_body_bytes =
                parse_override("DIAG_MAX_BODY_BYTES", &raw, self.server.max_body_bytes);
        }
        if let Ok(raw) = std::env::var("DIAG_REQUEST_TIMEOUT_MS") {
            self.server.request_timeout_ms =
                parse_override("DIAG_REQUEST_TIMEOUT_MS", &raw, self.server.request_timeout_ms);
        }
        if let Ok(origins) = std::env::var("DIAG_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Ok(level) = std::env::var("RUST_LOG") {
            if !level.trim().is_empty() {
                self.logging.level = level;
            }
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.max_body_bytes == 0 {
            anyhow::bail!("server.max_body_bytes must be > 0");
        }
        if self.server.request_timeout_ms == 0 {
            anyhow::bail!("server.request_timeout_ms must be > 0");
        }
        if self.logging.level.trim().is_empty() {
            anyhow::bail!("logging.level must not be empty");
        }
        Ok(())
    }
}

/// Parse a numeric override, keeping `current` (with a warning) when `raw` is not a number
fn parse_override<T>(name: &str, raw: &str, current: T) -> T
where
    T: FromStr + Display,
{
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("{} '{}' is not a valid number, keeping {}", name, raw, current);
            current
        }
    }
}
