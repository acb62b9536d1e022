use std::collections::HashMap;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::{DecodeError, Segment};

static SEGMENT_SEPARATOR: char = '.';

/// Header and payload of a compact token. The signature is kept as-is and
/// never verified.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToken {
    pub header: Map<String, Value>,
    pub payload: Map<String, Value>,
    pub signature: String,
}

/// Split a compact token into its three segments and decode header and payload.
pub fn decode_token(token: &str) -> Result<DecodedToken, DecodeError> {
    let parts: Vec<&str> = token.trim().split(SEGMENT_SEPARATOR).collect();
    if parts.len() != 3 {
        return Err(DecodeError::SegmentCount(parts.len()));
    }

    let header = decode_segment(parts[0], Segment::Header)?;
    let payload = decode_segment(parts[1], Segment::Payload)?;
    debug!(
        header_keys = header.len(),
        payload_keys = payload.len(),
        "token decoded"
    );

    Ok(DecodedToken {
        header,
        payload,
        signature: parts[2].to_owned(),
    })
}

fn decode_segment(raw: &str, segment: Segment) -> Result<Map<String, Value>, DecodeError> {
    let bytes = URL_SAFE
        .decode(with_padding(raw))
        .map_err(|e| DecodeError::Base64 {
            segment,
            reason: e.to_string(),
        })?;

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| DecodeError::Json {
        segment,
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DecodeError::NotAnObject { segment }),
    }
}

/// Tokens usually drop the trailing '=' characters; put them back.
fn with_padding(raw: &str) -> String {
    let mut padded = raw.to_owned();
    let missing = (4 - raw.len() % 4) % 4;
    padded.extend(std::iter::repeat('=').take(missing));
    padded
}

impl DecodedToken {
    pub fn header_str(&self, key: &str) -> Option<&str> {
        self.header.get(key).and_then(Value::as_str)
    }

    pub fn claim(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn claim_str(&self, key: &str) -> Option<&str> {
        self.claim(key).and_then(Value::as_str)
    }

    /// Strings of an array claim in their original order. Absent or non-array
    /// claims yield an empty list; non-string items are skipped.
    pub fn claim_string_list(&self, key: &str) -> Vec<String> {
        self.claim(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Numeric claim read as seconds since the unix epoch (`exp`, `iat`, `nbf`).
    pub fn claim_timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.claim(key)
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Scalar claims rendered as strings, for use in probe templates.
    pub fn claims_as_strings(&self) -> HashMap<String, String> {
        self.payload
            .iter()
            .filter_map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.to_owned(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key.to_owned(), rendered))
            })
            .collect()
    }
}
