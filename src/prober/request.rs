use http::{Method, StatusCode};
use serde_json::Value;

use crate::errors::TransportError;

/// One HTTP call, built per probe and dropped once displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ProbeRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// Any HTTP response, successful or not; the body is kept raw.
    Response { status: StatusCode, body: String },
    Failed(TransportError),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Response { status, .. } if status.is_success())
    }
}

/// An entry of the expanded run plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedProbe {
    pub label: String,
    /// name of the header carrying the token, `None` when sent without auth
    pub auth_header: Option<String>,
    pub step: PlannedStep,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlannedStep {
    Send(ProbeRequest),
    Skip(String),
}
