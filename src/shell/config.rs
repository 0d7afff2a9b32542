use std::time::Duration;
use thiserror::Error;

use crate::modules::registration::core::offering::DEFAULT_CAPACITY;
use crate::modules::students::use_cases::list_students::handler::{
    DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE,
};

pub const DEFAULT_LOG_LEVEL: &str = "center_registration=info,tower_http=info";
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// `None` runs against the in-memory backend.
    pub backend: Option<BackendConfig>,
    pub students_page_size: u32,
    pub search_debounce: Duration,
    pub default_capacity: u32,
    /// Per-session page and dashboard state is dropped after this long without a request.
    pub session_idle: Duration,
    pub max_sessions: usize,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend = match (text("BACKEND_URL"), text("BACKEND_API_KEY")) {
            (Some(url), Some(api_key)) => Some(BackendConfig { url, api_key }),
            _ => None,
        };

        Ok(Self {
            host: text("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse(&text, "APP_PORT", 8080)?,
            log_level: text("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            backend,
            students_page_size: parse(&text, "STUDENTS_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            search_debounce: Duration::from_millis(parse(
                &text,
                "SEARCH_DEBOUNCE_MS",
                DEFAULT_DEBOUNCE.as_millis() as u64,
            )?),
            default_capacity: parse(&text, "DEFAULT_CAPACITY", DEFAULT_CAPACITY)?,
            session_idle: Duration::from_secs(parse(
                &text,
                "SESSION_IDLE_SECS",
                DEFAULT_SESSION_IDLE_SECS,
            )?),
            max_sessions: parse(&text, "MAX_SESSIONS", DEFAULT_MAX_SESSIONS)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: std::str::FromStr>(
    text: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match text(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}
