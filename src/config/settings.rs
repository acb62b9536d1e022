use serde::Deserialize;

use crate::utils::constants::{DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_MAX_BODY_CHARS};

/// ================================
/// Global run-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub claims: ClaimKeys,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// applies to the whole request, connect included
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
            user_agent: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// pretty-printed bodies longer than this are cut and marked
    #[serde(default = "default_max_body_chars")]
    pub max_body_chars: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_body_chars: DEFAULT_MAX_BODY_CHARS,
        }
    }
}

/// Payload claim names shown in the token report.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ClaimKeys {
    #[serde(default = "default_token_id_claim")]
    pub token_id: String,
    #[serde(default = "default_user_id_claim")]
    pub user_id: String,
    #[serde(default = "default_scopes_claim")]
    pub scopes: String,
}

impl Default for ClaimKeys {
    fn default() -> Self {
        Self {
            token_id: default_token_id_claim(),
            user_id: default_user_id_claim(),
            scopes: default_scopes_claim(),
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    #[serde(default = "LogFormat::from_env")]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "compact".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

fn default_max_body_chars() -> usize {
    DEFAULT_MAX_BODY_CHARS
}

fn default_token_id_claim() -> String {
    "tokenId".to_string()
}

fn default_user_id_claim() -> String {
    "userId".to_string()
}

fn default_scopes_claim() -> String {
    "scopes".to_string()
}
