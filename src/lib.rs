//! # Token Probe Library
//!
//! Decodes a bearer token for inspection and probes HTTP endpoints with it,
//! printing every response. Probes run one after another and a failing
//! probe never stops the rest of the run.
//!
//! Modules:
//! - `config` — YAML configuration, env expansion and validation
//! - `token` — compact token decoding and the token report
//! - `prober` — plan expansion, HTTP probing and result display
//! - `parser` — `{{...}}` placeholders in probe paths and bodies
//! - `session` — one inspect + probe run

pub mod config;
pub mod errors;
pub mod helpers;
pub mod parser;
pub mod prober;
pub mod session;
pub mod token;
pub mod utils;

#[cfg(test)]
mod tests;


pub use crate::config::probes::ProbeConfig;
pub use crate::token::{decode_token, DecodedToken};
