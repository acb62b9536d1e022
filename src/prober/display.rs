use std::fmt::Write;

use http::StatusCode;

use crate::prober::request::{PlannedProbe, PlannedStep, ProbeOutcome};
use crate::utils::constants::TRUNCATION_MARKER;

pub fn status_icon(status: StatusCode) -> &'static str {
    match status.as_u16() {
        200..=299 => "✅",
        401 => "🔒",
        404 => "❓",
        400..=599 => "❌",
        _ => "⚠️",
    }
}

/// Body shown for a response: successful JSON is pretty-printed, every
/// successful body is cut at `max_chars`; error bodies stay verbatim.
pub fn render_body(status: StatusCode, body: &str, max_chars: usize) -> String {
    if !status.is_success() {
        return body.to_owned();
    }

    let pretty = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or_else(|| body.to_owned());

    truncate_chars(&pretty, max_chars)
}

/// First `max_chars` characters followed by a marker, or the text unchanged.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_owned();
    }

    let head: String = text.chars().take(max_chars).collect();
    format!("{}\n{}, {} chars total]", head, TRUNCATION_MARKER, total)
}

pub fn render_heading(planned: &PlannedProbe) -> String {
    match &planned.auth_header {
        Some(header) => format!("🔗 {} [{}]", planned.label, header),
        None => format!("🔗 {} [no auth]", planned.label),
    }
}

pub fn render_outcome(outcome: &ProbeOutcome, max_body_chars: usize) -> String {
    let mut out = String::new();
    match outcome {
        ProbeOutcome::Response { status, body } => {
            let _ = writeln!(
                out,
                "   {} {} {}",
                status_icon(*status),
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );
            let shown = render_body(*status, body, max_body_chars);
            if !shown.is_empty() {
                let _ = writeln!(out, "{}", shown);
            }
        }
        ProbeOutcome::Failed(err) => {
            let _ = writeln!(out, "   💥 transport error: {}", err);
        }
    }
    out
}

pub fn render_planned(planned: &PlannedProbe) -> Option<String> {
    match &planned.step {
        PlannedStep::Skip(reason) => Some(format!("   ⏭️ skipped: {}\n", reason)),
        PlannedStep::Send(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportError;
    use serde_json::json;

    #[test]
    fn icons_follow_status_classes() {
        assert_eq!(status_icon(StatusCode::OK), "✅");
        assert_eq!(status_icon(StatusCode::CREATED), "✅");
        assert_eq!(status_icon(StatusCode::UNAUTHORIZED), "🔒");
        assert_eq!(status_icon(StatusCode::NOT_FOUND), "❓");
        assert_eq!(status_icon(StatusCode::INTERNAL_SERVER_ERROR), "❌");
        assert_eq!(status_icon(StatusCode::MOVED_PERMANENTLY), "⚠️");
    }

    #[test]
    fn short_json_is_pretty_printed_in_full() {
        let body = json!({"success": true, "count": 3}).to_string();
        let shown = render_body(StatusCode::OK, &body, 1000);
        let expected = serde_json::to_string_pretty(&json!({"success": true, "count": 3})).unwrap();
        assert_eq!(shown, expected);
        assert!(!shown.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn long_json_is_truncated_to_a_prefix() {
        let ids: Vec<String> = (0..200).map(|i| format!("id-{:04}", i)).collect();
        let body = json!({ "ids": ids }).to_string();
        let full = serde_json::to_string_pretty(&serde_json::from_str::<serde_json::Value>(&body).unwrap()).unwrap();
        assert!(full.chars().count() > 1000);

        let shown = render_body(StatusCode::OK, &body, 1000);
        let (head, marker) = shown.rsplit_once('\n').unwrap();

        assert!(marker.starts_with(TRUNCATION_MARKER));
        assert!(marker.contains(&format!("{} chars total", full.chars().count())));
        assert_eq!(head.chars().count(), 1000);
        assert!(full.starts_with(head));
    }

    #[test]
    fn exactly_at_threshold_is_not_truncated() {
        let text = "x".repeat(1000);
        assert_eq!(truncate_chars(&text, 1000), text);
        assert!(truncate_chars(&"x".repeat(1001), 1000).contains(TRUNCATION_MARKER));
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        let text = "é".repeat(20);
        let cut = truncate_chars(&text, 5);
        assert!(cut.starts_with("ééééé\n"));
    }

    #[test]
    fn error_bodies_are_verbatim() {
        let raw = "{\"error\":\"Token API invalide ou expiré\"}";
        assert_eq!(render_body(StatusCode::UNAUTHORIZED, raw, 5), raw);

        let outcome = ProbeOutcome::Response {
            status: StatusCode::UNAUTHORIZED,
            body: raw.to_string(),
        };
        let shown = render_outcome(&outcome, 1000);
        assert!(shown.contains("🔒 401 Unauthorized"));
        assert!(shown.contains(raw));
    }

    #[test]
    fn non_json_success_body_is_shown_raw() {
        assert_eq!(render_body(StatusCode::OK, "<html>ok</html>", 1000), "<html>ok</html>");
    }

    #[test]
    fn transport_failures_show_the_description() {
        let outcome = ProbeOutcome::Failed(TransportError::Connect("connection refused".into()));
        assert_eq!(
            render_outcome(&outcome, 1000),
            "   💥 transport error: connection failed: connection refused\n"
        );
    }
}
