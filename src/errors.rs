//! Error kinds reported while inspecting a token or running a probe.
//!
//! Neither kind aborts a run: both are caught where they occur, printed and
//! counted in the run summary.

use thiserror::Error;

/// Which token segment a decode failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Header,
    Payload,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Header => write!(f, "header"),
            Segment::Payload => write!(f, "payload"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("invalid token format: expected 3 segments separated by '.', found {0}")]
    SegmentCount(usize),

    #[error("{segment} segment is not valid base64url: {reason}")]
    Base64 { segment: Segment, reason: String },

    #[error("{segment} segment is not valid JSON: {reason}")]
    Json { segment: Segment, reason: String },

    #[error("{segment} segment is JSON but not an object")]
    NotAnObject { segment: Segment },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // the full source chain carries the DNS / refused / TLS detail
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        if err.is_timeout() {
            TransportError::Timeout(message)
        } else if err.is_connect() {
            TransportError::Connect(message)
        } else if err.is_builder() {
            TransportError::InvalidRequest(message)
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(message)
        } else {
            TransportError::Request(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_messages_name_the_segment() {
        let err = DecodeError::Base64 {
            segment: Segment::Payload,
            reason: "bad byte".into(),
        };
        assert_eq!(
            err.to_string(),
            "payload segment is not valid base64url: bad byte"
        );
        assert_eq!(
            DecodeError::SegmentCount(2).to_string(),
            "invalid token format: expected 3 segments separated by '.', found 2"
        );
    }
}
