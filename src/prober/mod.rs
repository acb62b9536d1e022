//! Prober module
//!
//! Expands the configured probes into a plan, sends them one after another
//! and renders every outcome for the console.

pub mod client;
pub mod display;
pub mod plan;
pub mod request;
pub mod runner;

pub use client::Prober;
pub use plan::build_plan;
pub use request::{PlannedProbe, PlannedStep, ProbeOutcome, ProbeRequest};
pub use runner::{run_plan, RunSummary};
