use std::io::Write;

use anyhow::Result;
use tracing::{info, warn};

use crate::helpers::time;
use crate::prober::{build_plan, run_plan, Prober, RunSummary};
use crate::token::report::{mask_token, render_token_report};
use crate::token::decode_token;
use crate::ProbeConfig;

/// Token given on the command line wins over the one from config.
pub async fn resolve_token(cfg: &ProbeConfig, token_override: Option<String>) -> Result<Option<String>> {
    if let Some(token) = token_override.filter(|t| !t.trim().is_empty()) {
        return Ok(Some(token.trim().to_owned()));
    }
    match &cfg.token {
        Some(secret) => Ok(Some(secret.resolve().await?).filter(|t| !t.is_empty())),
        None => Ok(None),
    }
}

/// Inspect the token, then run every planned probe. Decode and probe
/// failures are printed and counted, never returned.
pub async fn run<W: Write>(
    cfg: &ProbeConfig,
    token: Option<&str>,
    inspect_only: bool,
    out: &mut W,
) -> Result<RunSummary> {
    let prober = Prober::new(&cfg.settings.http)?;

    writeln!(
        out,
        "🚀 token-probe: {} target(s), {} probe(s)",
        cfg.targets.len(),
        cfg.probes.len()
    )?;
    writeln!(out, "   Token: {}", token.map(mask_token).unwrap_or_else(|| "none".to_owned()))?;
    writeln!(out)?;

    let decoded = match token.map(decode_token) {
        Some(Ok(decoded)) => {
            write!(out, "{}", render_token_report(&decoded, &cfg.settings.claims, time::now()))?;
            Some(decoded)
        }
        Some(Err(e)) => {
            warn!(error = %e, "token decode failed");
            writeln!(out, "❌ token decode failed: {}", e)?;
            None
        }
        None => None,
    };
    writeln!(out)?;

    if inspect_only {
        info!("inspect only, probes skipped");
        return Ok(RunSummary::default());
    }

    let plan = build_plan(cfg, token, decoded.as_ref(), time::today());
    let summary = run_plan(&prober, &plan, cfg.settings.display.max_body_chars, out).await?;

    write!(out, "{}", summary.render())?;
    out.flush()?;
    Ok(summary)
}
