use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::config::settings::ClaimKeys;
use crate::token::inspector::DecodedToken;

const VISIBLE_TOKEN_CHARS: usize = 20;

/// Human readable summary of a decoded token.
pub fn render_token_report(token: &DecodedToken, keys: &ClaimKeys, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let missing = "(absent)";

    let typ = token.header_str("typ");
    let typ_mark = if typ == Some("JWT") { "✅" } else { "❌" };
    let _ = writeln!(out, "🔍 TOKEN");
    let _ = writeln!(out, "   Algorithm: {}", token.header_str("alg").unwrap_or(missing));
    let _ = writeln!(out, "   Type: {} {}", typ.unwrap_or(missing), typ_mark);
    let _ = writeln!(out, "   Token ID: {}", token.claim_str(&keys.token_id).unwrap_or(missing));
    let _ = writeln!(out, "   User ID: {}", token.claim_str(&keys.user_id).unwrap_or(missing));

    let scopes = token.claim_string_list(&keys.scopes);
    let _ = writeln!(out, "   Scopes ({}): {}", scopes.len(), scopes.join(", "));

    match token.claim_timestamp("exp") {
        Some(exp) => {
            let state = if exp <= now { "EXPIRED" } else { "valid" };
            let _ = writeln!(out, "   Expiration: {} ({})", exp.to_rfc3339(), state);
        }
        None => {
            let _ = writeln!(out, "   Expiration: none (permanent)");
        }
    }
    if let Some(iat) = token.claim_timestamp("iat") {
        let _ = writeln!(out, "   Issued at: {}", iat.to_rfc3339());
    }
    let _ = writeln!(out, "   Signature: not verified");

    out
}

/// Keep only the head of a secret for display.
pub fn mask_token(token: &str) -> String {
    if token.chars().count() <= VISIBLE_TOKEN_CHARS {
        return "*".repeat(token.chars().count());
    }
    let head: String = token.chars().take(VISIBLE_TOKEN_CHARS).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::inspector::decode_token;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use chrono::TimeZone;
    use serde_json::json;

    fn token(payload: serde_json::Value) -> DecodedToken {
        let raw = format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(json!({"alg": "HS256", "typ": "JWT"}).to_string()),
            URL_SAFE_NO_PAD.encode(payload.to_string())
        );
        decode_token(&raw).unwrap()
    }

    #[test]
    fn report_lists_identity_and_scopes() {
        let decoded = token(json!({
            "tokenId": "t-1",
            "userId": "u-1",
            "scopes": ["tasks:read", "tasks:write"]
        }));
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let report = render_token_report(&decoded, &ClaimKeys::default(), now);

        assert!(report.contains("Algorithm: HS256"));
        assert!(report.contains("Type: JWT ✅"));
        assert!(report.contains("Token ID: t-1"));
        assert!(report.contains("User ID: u-1"));
        assert!(report.contains("Scopes (2): tasks:read, tasks:write"));
        assert!(report.contains("Expiration: none (permanent)"));
    }

    #[test]
    fn report_flags_expired_tokens() {
        let decoded = token(json!({"exp": 1750096606, "iat": 1750000000}));
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let report = render_token_report(&decoded, &ClaimKeys::default(), now);

        assert!(report.contains("Expiration: 2025-06-16T17:56:46+00:00 (EXPIRED)"));
        assert!(report.contains("Issued at: "));
        assert!(report.contains("User ID: (absent)"));
        assert!(report.contains("Scopes (0): "));
    }

    #[test]
    fn custom_claim_keys_are_honoured() {
        let decoded = token(json!({"sub": "alice", "scope_list": ["a"]}));
        let keys = ClaimKeys {
            token_id: "jti".into(),
            user_id: "sub".into(),
            scopes: "scope_list".into(),
        };
        let report = render_token_report(&decoded, &keys, Utc::now());
        assert!(report.contains("User ID: alice"));
        assert!(report.contains("Scopes (1): a"));
    }

    #[test]
    fn mask_keeps_only_the_head() {
        let masked = mask_token("eyJhbGciOiJIUzI1NiJ9.eyJ0b2tlbklkIjoi.sig");
        assert_eq!(masked, "eyJhbGciOiJIUzI1NiJ9...");
        assert_eq!(mask_token("short"), "*****");
    }
}
