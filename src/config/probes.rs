use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use http::Method;
use serde::Deserialize;
use serde_json::Value;

use crate::config::settings::SettingsConfig;
use crate::utils::constants::{DEFAULT_AUTH_HEADER, DEFAULT_AUTH_PREFIX};

/// ================================
/// Full run configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ProbeConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    /// may be overridden from the command line
    pub token: Option<SecretValue>,
    #[serde(default = "default_auth")]
    pub auth: Vec<AuthVariant>,
    /// base URLs, e.g. bare domain, www., app., api.
    pub targets: Vec<String>,
    pub probes: Vec<ProbeSpec>,
}

/// Where a secret comes from. Literal values are accepted but the
/// environment or a file should be preferred.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum SecretValue {
    Literal { value: String },
    FromEnv { from_env: String },
    FromFile { path: String },
}

impl SecretValue {
    pub async fn resolve(&self) -> Result<String> {
        match self {
            SecretValue::Literal { value } => Ok(value.trim().to_owned()),
            SecretValue::FromEnv { from_env } => std::env::var(from_env)
                .map(|v| v.trim().to_owned())
                .map_err(|err| anyhow!("token env var '{}': {}", from_env, err)),
            SecretValue::FromFile { path } => tokio::fs::read_to_string(path)
                .await
                .map(|v| v.trim().to_owned())
                .map_err(|err| anyhow!("token file '{}': {}", path, err)),
        }
    }
}

/// Header that carries the token, e.g. `Authorization: Bearer <token>`
/// or `X-API-Key: <token>`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthVariant {
    pub header: String,
    #[serde(default)]
    pub prefix: Option<String>,
}

impl AuthVariant {
    pub fn header_value(&self, token: &str) -> String {
        format!("{}{}", self.prefix.as_deref().unwrap_or_default(), token)
    }
}

impl Default for AuthVariant {
    fn default() -> Self {
        Self {
            header: DEFAULT_AUTH_HEADER.to_string(),
            prefix: Some(DEFAULT_AUTH_PREFIX.to_string()),
        }
    }
}

/// One configured probe. `path` and string values inside `body` may hold
/// `{{today}}`, `{{yesterday}}`, `{{tomorrow}}`, `{{item}}` and
/// `{{claim.<key>}}` placeholders.
#[derive(Debug, Deserialize, Clone)]
pub struct ProbeSpec {
    pub name: Option<String>,
    #[serde(default, with = "http_serde::method")]
    pub method: Method,
    pub path: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
    /// skip unless the token grants this scope
    pub requires_scope: Option<String>,
    /// run once per item, exposing it as `{{item}}`
    pub for_each: Option<Vec<String>>,
}

impl ProbeSpec {
    pub fn label(&self) -> String {
        self.name
            .to_owned()
            .unwrap_or_else(|| format!("{} {}", self.method, self.path))
    }
}

fn default_auth() -> Vec<AuthVariant> {
    vec![AuthVariant::default()]
}
