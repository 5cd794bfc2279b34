use anyhow::{anyhow, Context, Result};

use crate::contract::template::TemplateVersion;
use crate::layout::WrapStrategy;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub template_version: TemplateVersion,
    pub wrap_strategy: WrapStrategy,
    /// Exact origin allowed by CORS. `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            template_version: parse_optional("TEMPLATE_VERSION")?.unwrap_or_default(),
            wrap_strategy: parse_optional("WRAP_STRATEGY")?.unwrap_or_default(),
            cors_allowed_origin: std::env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            template_version: TemplateVersion::CANONICAL,
            wrap_strategy: WrapStrategy::Fixed,
            cors_allowed_origin: None,
        }
    }
}

fn parse_optional<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("Invalid value for environment variable '{key}'")),
        Err(_) => Ok(None),
    }
}
