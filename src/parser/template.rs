use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

use crate::helpers::time::iso_date;

static CLAIM_PREFIX: &str = "claim.";

/// Values available to `{{...}}` placeholders of a single planned probe.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub today: NaiveDate,
    pub item: Option<String>,
    pub claims: HashMap<String, String>,
}

impl TemplateContext {
    pub fn new(today: NaiveDate, claims: HashMap<String, String>) -> Self {
        Self { today, item: None, claims }
    }

    pub fn with_item(&self, item: &str) -> Self {
        Self {
            item: Some(item.to_owned()),
            ..self.clone()
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "today" => Some(iso_date(self.today, 0)),
            "yesterday" => Some(iso_date(self.today, -1)),
            "tomorrow" => Some(iso_date(self.today, 1)),
            "item" => self.item.to_owned(),
            _ => key
                .strip_prefix(CLAIM_PREFIX)
                .and_then(|claim| self.claims.get(claim).cloned()),
        }
    }
}

/// Render a probe template
/// template: "/api/tasks/agent/date?date={{today}}"
/// Any placeholder without a value is an error.
pub fn render_template(template: &str, ctx: &TemplateContext) -> Result<String> {
    // any `{{...}}` is a placeholder; unknown keys are reported, never sent as text
    let re = Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}")?;

    let mut unresolved = Vec::new();
    let result = re.replace_all(template, |caps: &regex::Captures| {
        let key = &caps[1];
        match ctx.lookup(key) {
            Some(val) => val,
            None => {
                unresolved.push(key.to_owned());
                String::new()
            }
        }
    });

    if !unresolved.is_empty() {
        return Err(anyhow!(
            "unresolved placeholders {{{{{}}}}} in '{}'",
            unresolved.join("}}, {{"),
            template
        ));
    }

    Ok(result.to_string())
}

/// Render every string inside a JSON body, keys untouched.
pub fn render_json(value: &Value, ctx: &TemplateContext) -> Result<Value> {
    Ok(match value {
        Value::String(s) => Value::String(render_template(s, ctx)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|v| render_json(v, ctx))
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Object(map) => {
            let mut rendered = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                rendered.insert(k.to_owned(), render_json(v, ctx)?);
            }
            Value::Object(rendered)
        }
        other => other.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> TemplateContext {
        let mut claims = HashMap::new();
        claims.insert("userId".to_string(), "u-42".to_string());
        TemplateContext::new(NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(), claims)
    }

    #[test]
    fn test_render_dates() {
        let rendered = render_template("/api/tasks/agent/date?date={{today}}", &ctx()).unwrap();
        assert_eq!(rendered, "/api/tasks/agent/date?date=2025-06-09");

        let rendered = render_template("{{ yesterday }}..{{tomorrow}}", &ctx()).unwrap();
        assert_eq!(rendered, "2025-06-08..2025-06-10");
    }

    #[test]
    fn test_render_item_and_claim() {
        let ctx = ctx().with_item("habit-entries");
        let rendered = render_template("/api/debug/ids/{{item}}?user={{claim.userId}}", &ctx).unwrap();
        assert_eq!(rendered, "/api/debug/ids/habit-entries?user=u-42");
    }

    #[test]
    fn test_render_missing_field() {
        let err = render_template("/x/{{claim.taskId}}/{{item}}", &ctx()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("claim.taskId"), "{}", msg);
        assert!(msg.contains("item"), "{}", msg);
    }

    #[test]
    fn test_render_unknown_key_shapes() {
        let ctx = ctx().with_item("tasks");
        let err = render_template("/api/x/{{claim.user.id}}", &ctx).unwrap_err();
        assert!(err.to_string().contains("claim.user.id"));
        let err = render_template("/api/y/{{item-name}}", &ctx).unwrap_err();
        assert!(err.to_string().contains("item-name"));
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(render_template("/api/test-token", &ctx()).unwrap(), "/api/test-token");
    }

    #[test]
    fn test_render_json_body() {
        let body = json!({
            "title": "probe {{today}}",
            "tags": ["{{claim.userId}}", 3],
            "done": false
        });
        let rendered = render_json(&body, &ctx()).unwrap();
        assert_eq!(
            rendered,
            json!({"title": "probe 2025-06-09", "tags": ["u-42", 3], "done": false})
        );
    }
}
