use std::fmt::Write as _;
use std::io::Write;

use tracing::info;

use crate::prober::client::Prober;
use crate::prober::display::{render_heading, render_outcome, render_planned};
use crate::prober::request::{PlannedProbe, PlannedStep, ProbeOutcome};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub http_failures: usize,
    pub transport_failures: usize,
    pub skipped: usize,
    /// labels of probes that did not succeed, in run order
    pub failed: Vec<String>,
}

impl RunSummary {
    fn record(&mut self, label: &str, outcome: &ProbeOutcome) {
        self.total += 1;
        if outcome.is_success() {
            self.succeeded += 1;
            return;
        }
        match outcome {
            ProbeOutcome::Response { status, .. } => {
                self.http_failures += 1;
                self.failed.push(format!("{} -> {}", label, status.as_u16()));
            }
            ProbeOutcome::Failed(err) => {
                self.transport_failures += 1;
                self.failed.push(format!("{} -> {}", label, err));
            }
        }
    }

    fn record_skip(&mut self) {
        self.total += 1;
        self.skipped += 1;
    }

    pub fn executed(&self) -> usize {
        self.total - self.skipped
    }

    /// Integer percentage of executed probes that succeeded.
    pub fn success_rate(&self) -> usize {
        match self.executed() {
            0 => 0,
            executed => self.succeeded * 100 / executed,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "📊 SUMMARY");
        let _ = writeln!(out, "   Total: {}", self.total);
        let _ = writeln!(out, "   ✅ Succeeded: {}", self.succeeded);
        let _ = writeln!(out, "   ❌ HTTP failures: {}", self.http_failures);
        let _ = writeln!(out, "   💥 Transport failures: {}", self.transport_failures);
        let _ = writeln!(out, "   ⏭️ Skipped: {}", self.skipped);
        let _ = writeln!(out, "   📈 Success rate: {}%", self.success_rate());
        if !self.failed.is_empty() {
            let _ = writeln!(out, "   Failed probes:");
            for label in &self.failed {
                let _ = writeln!(out, "   - {}", label);
            }
        }
        out
    }
}

/// Run every planned probe in order, writing each result as soon as it is
/// known. A failed probe never prevents the next one from running; only a
/// failing writer stops the run.
pub async fn run_plan<W: Write>(
    prober: &Prober,
    plan: &[PlannedProbe],
    max_body_chars: usize,
    out: &mut W,
) -> std::io::Result<RunSummary> {
    let mut summary = RunSummary::default();

    for planned in plan {
        writeln!(out, "{}", render_heading(planned))?;
        match &planned.step {
            PlannedStep::Skip(_) => {
                if let Some(line) = render_planned(planned) {
                    write!(out, "{}", line)?;
                }
                summary.record_skip();
            }
            PlannedStep::Send(request) => {
                let outcome = prober.probe(request).await;
                write!(out, "{}", render_outcome(&outcome, max_body_chars))?;
                summary.record(&planned.label, &outcome);
            }
        }
        writeln!(out)?;
        out.flush()?;
    }

    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        http_failures = summary.http_failures,
        transport_failures = summary.transport_failures,
        skipped = summary.skipped,
        "probe run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportError;
    use http::StatusCode;

    #[test]
    fn summary_counts_each_outcome_kind() {
        let mut summary = RunSummary::default();
        summary.record("a", &ProbeOutcome::Response { status: StatusCode::OK, body: String::new() });
        summary.record("b", &ProbeOutcome::Response { status: StatusCode::UNAUTHORIZED, body: String::new() });
        summary.record("c", &ProbeOutcome::Failed(TransportError::Timeout("10s".into())));
        summary.record_skip();

        assert_eq!(summary.total, 4);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.http_failures, 1);
        assert_eq!(summary.transport_failures, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.success_rate(), 33);
        assert_eq!(summary.failed, vec!["b -> 401".to_string(), "c -> request timed out: 10s".to_string()]);

        let rendered = summary.render();
        assert!(rendered.contains("Total: 4"));
        assert!(rendered.contains("Success rate: 33%"));
        assert!(rendered.contains("- b -> 401"));
    }

    #[test]
    fn any_2xx_counts_as_success() {
        let mut summary = RunSummary::default();
        summary.record("created", &ProbeOutcome::Response { status: StatusCode::CREATED, body: String::new() });
        summary.record("empty", &ProbeOutcome::Response { status: StatusCode::NO_CONTENT, body: String::new() });
        summary.record("moved", &ProbeOutcome::Response { status: StatusCode::FOUND, body: String::new() });

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.http_failures, 1);
        assert_eq!(summary.failed, vec!["moved -> 302".to_string()]);
    }

    #[test]
    fn empty_run_has_zero_rate() {
        assert_eq!(RunSummary::default().success_rate(), 0);
    }
}
