//! Loan simulation, eligibility scoring and lead intake for a consumer loan brokerage.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
