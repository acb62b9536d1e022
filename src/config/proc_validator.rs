//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Checks targets, probes, auth variants and settings

use http::Method;
use tracing::{error, info};

use crate::config::probes::{AuthVariant, ProbeConfig, ProbeSpec};
use crate::config::settings::SettingsConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_probe_config(cfg: &ProbeConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);

    if cfg.targets.is_empty() {
        errors.push("config: 'targets' is empty; at least one base URL required".to_string());
    }
    for (idx, target) in cfg.targets.iter().enumerate() {
        if !(target.starts_with("http://") || target.starts_with("https://")) {
            errors.push(format!(
                "targets[{}] '{}' must start with http:// or https://",
                idx, target
            ));
        }
    }

    for (idx, auth) in cfg.auth.iter().enumerate() {
        validate_auth(idx, auth, &mut errors);
    }

    if cfg.probes.is_empty() {
        errors.push("config: 'probes' is empty; at least one probe required".to_string());
    }
    for (idx, probe) in cfg.probes.iter().enumerate() {
        validate_probe(idx, probe, &mut errors);
    }

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        Err(errors)
    }
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.http.timeout_ms == 0 {
        errors.push("settings.http.timeout_ms must be > 0".to_string());
    }
    if let Some(user_agent) = &settings.http.user_agent {
        if http::HeaderValue::from_str(user_agent).is_err() {
            errors.push(format!(
                "settings.http.user_agent '{}' is not a valid header value",
                user_agent.escape_debug()
            ));
        }
    }
    if settings.display.max_body_chars == 0 {
        errors.push("settings.display.max_body_chars must be > 0".to_string());
    }

    if let Some(logging) = &settings.logging {
        if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' invalid; allowed: {:?}",
                logging.level, LOG_LEVELS
            ));
        }
    }
}

fn validate_auth(idx: usize, auth: &AuthVariant, errors: &mut Vec<String>) {
    if auth.header.trim().is_empty() {
        errors.push(format!("auth[{}].header must not be empty", idx));
    } else if http::HeaderName::from_bytes(auth.header.as_bytes()).is_err() {
        errors.push(format!(
            "auth[{}].header '{}' is not a valid header name",
            idx, auth.header
        ));
    }
}

fn validate_probe(idx: usize, probe: &ProbeSpec, errors: &mut Vec<String>) {
    let label = probe.label();

    if !probe.path.starts_with('/') {
        errors.push(format!(
            "probes[{}] '{}': path '{}' must start with '/'",
            idx, label, probe.path
        ));
    }

    if probe.body.is_some() && !method_takes_body(&probe.method) {
        errors.push(format!(
            "probes[{}] '{}': body is only allowed for POST, PUT or PATCH (got {})",
            idx, label, probe.method
        ));
    }

    if let Some(items) = &probe.for_each {
        if items.is_empty() {
            errors.push(format!("probes[{}] '{}': for_each must not be empty", idx, label));
        }
        let in_body = probe
            .body
            .as_ref()
            .is_some_and(|body| body.to_string().contains("{{item}}"));
        if !probe.path.contains("{{item}}") && !in_body {
            errors.push(format!(
                "probes[{}] '{}': for_each is set but neither path nor body has an {{{{item}}}} placeholder",
                idx, label
            ));
        }
    }

    for name in probe.headers.keys() {
        if http::HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(format!(
                "probes[{}] '{}': header '{}' is not a valid header name",
                idx, label, name
            ));
        }
    }

    if let Some(scope) = &probe.requires_scope {
        if scope.trim().is_empty() {
            errors.push(format!("probes[{}] '{}': requires_scope must not be empty", idx, label));
        }
    }
}

pub fn method_takes_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}
