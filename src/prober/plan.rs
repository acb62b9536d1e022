use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::probes::{AuthVariant, ProbeConfig, ProbeSpec};
use crate::parser::template::{render_json, render_template, TemplateContext};
use crate::prober::request::{PlannedProbe, PlannedStep, ProbeRequest};
use crate::token::DecodedToken;

/// Expand the configuration into the ordered list of probes to run:
/// targets, then auth variants, then probes, then `for_each` items.
pub fn build_plan(
    cfg: &ProbeConfig,
    token: Option<&str>,
    decoded: Option<&DecodedToken>,
    today: NaiveDate,
) -> Vec<PlannedProbe> {
    let claims = decoded.map(|d| d.claims_as_strings()).unwrap_or_default();
    let scopes = decoded.map(|d| d.claim_string_list(&cfg.settings.claims.scopes));
    let ctx = TemplateContext::new(today, claims);

    // without a token every probe goes out once, unauthenticated
    let auth_variants: Vec<Option<&AuthVariant>> = match token {
        Some(_) => cfg.auth.iter().map(Some).collect(),
        None => {
            warn!("no token configured; probes are sent without auth headers");
            vec![None]
        }
    };

    let mut plan = Vec::new();
    for target in &cfg.targets {
        for auth in &auth_variants {
            for spec in &cfg.probes {
                match &spec.for_each {
                    Some(items) => {
                        for item in items {
                            plan.push(plan_one(target, *auth, token, spec, &ctx.with_item(item), scopes.as_deref()));
                        }
                    }
                    None => plan.push(plan_one(target, *auth, token, spec, &ctx, scopes.as_deref())),
                }
            }
        }
    }

    debug!(planned = plan.len(), "probe plan built");
    plan
}

fn plan_one(
    target: &str,
    auth: Option<&AuthVariant>,
    token: Option<&str>,
    spec: &ProbeSpec,
    ctx: &TemplateContext,
    scopes: Option<&[String]>,
) -> PlannedProbe {
    let auth_header = auth.map(|a| a.header.to_owned());
    let skip = |label: String, reason: String| PlannedProbe {
        label,
        auth_header: auth_header.to_owned(),
        step: PlannedStep::Skip(reason),
    };

    let path = match render_template(&spec.path, ctx) {
        Ok(path) => path,
        Err(e) => return skip(format!("{} {}{}", spec.method, target, spec.path), e.to_string()),
    };
    let label = match &spec.name {
        Some(name) => format!("{} {}{} ({})", spec.method, target, path, name),
        None => format!("{} {}{}", spec.method, target, path),
    };

    if let Some(required) = &spec.requires_scope {
        match scopes {
            None => return skip(label, format!("requires scope '{}' but token scopes are unknown", required)),
            Some(granted) if !granted.iter().any(|s| s == required) => {
                return skip(label, format!("token lacks scope '{}'", required))
            }
            Some(_) => {}
        }
    }

    let body = match spec.body.as_ref().map(|b| render_json(b, ctx)).transpose() {
        Ok(body) => body,
        Err(e) => return skip(label, e.to_string()),
    };

    let mut request = ProbeRequest::new(spec.method.clone(), format!("{}{}", target, path));
    if let (Some(auth), Some(token)) = (auth, token) {
        request = request.header(auth.header.to_owned(), auth.header_value(token));
    }
    for (name, value) in &spec.headers {
        request = request.header(name.to_owned(), value.to_owned());
    }
    request.body = body;

    PlannedProbe {
        label,
        auth_header,
        step: PlannedStep::Send(request),
    }
}
