use std::time::{Duration, Instant};

use anyhow::Result;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::settings::HttpConfig;
use crate::errors::TransportError;
use crate::prober::request::{ProbeOutcome, ProbeRequest};

/// Sends probes over one shared client. Transport failures are returned as
/// outcomes, never as errors.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
}

impl Prober {
    pub fn new(http: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder().timeout(Duration::from_millis(http.timeout_ms));
        if let Some(user_agent) = &http.user_agent {
            builder = builder.user_agent(user_agent.to_owned());
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub async fn probe(&self, probe_request: &ProbeRequest) -> ProbeOutcome {
        let started = Instant::now();
        debug!(method = %probe_request.method, url = %probe_request.url, "sending probe");

        let outcome = match self.send(probe_request).await {
            Ok((status, body)) => ProbeOutcome::Response { status, body },
            Err(err) => ProbeOutcome::Failed(err),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            ProbeOutcome::Response { status, body } => info!(
                method = %probe_request.method,
                url = %probe_request.url,
                status = status.as_u16(),
                body_len = body.len(),
                elapsed_ms,
                "probe finished"
            ),
            ProbeOutcome::Failed(err) => warn!(
                method = %probe_request.method,
                url = %probe_request.url,
                error = %err,
                elapsed_ms,
                "probe transport failure"
            ),
        }
        outcome
    }

    async fn send(&self, probe_request: &ProbeRequest) -> Result<(http::StatusCode, String), TransportError> {
        let mut request = self
            .client
            .request(probe_request.method.clone(), probe_request.url.as_str());

        for (key, value) in &probe_request.headers {
            request = request.header(key, value);
        }
        if let Some(body) = &probe_request.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}
