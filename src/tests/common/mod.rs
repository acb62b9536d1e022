// tests/common/mod.rs
pub use serde_json::json;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::Value;

use crate::config::proc_loader::parse_config;
use crate::ProbeConfig;

/// Unsigned compact token with the given payload; the signature segment is
/// a placeholder since it is never verified.
pub fn sample_token(payload: Value) -> String {
    format!(
        "{}.{}.c2ln",
        URL_SAFE_NO_PAD.encode(json!({"alg": "HS256", "typ": "JWT"}).to_string()),
        URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

/// Config with the given targets and probes block (YAML list items).
pub fn config_with(targets: &[String], probes_yaml: &str) -> ProbeConfig {
    let targets_yaml: String = targets.iter().map(|t| format!("  - {}\n", t)).collect();
    let yaml = format!(
        "settings:\n  http:\n    timeout_ms: 2000\ntargets:\n{}probes:\n{}",
        targets_yaml, probes_yaml
    );
    parse_config(&yaml).expect("test config must be valid")
}

/// Loopback address with nothing listening on it.
pub fn unreachable_base() -> String {
    "http://127.0.0.1:9".to_string()
}

pub fn output_of(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("probe output is utf-8")
}
