//! Shared constants and defaults

pub const DEFAULT_CONFIG_PATH: &str = "token-probe.yaml";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_BODY_CHARS: usize = 1000;

pub const DEFAULT_AUTH_HEADER: &str = "Authorization";
pub const DEFAULT_AUTH_PREFIX: &str = "Bearer ";

pub const TRUNCATION_MARKER: &str = "... [truncated";
