//! Loan evaluation service: agentic verification, underwriting, and outcome
//! documentation behind an HTTP facade.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
