//! Federal buyout versus pension estimator.
//!
//! This crate compares a one-time federal buyout offer with the annuity an
//! employee would earn by staying on, under FERS or CSRS rules. Constants come
//! from versioned YAML files, the pipeline is a set of pure functions over
//! [`rust_decimal::Decimal`], and every run returns an audit trace of the
//! rules it applied.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

/// Version reported in API response metadata.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
