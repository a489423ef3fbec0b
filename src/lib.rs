//! repo-stats crate
//!
//! Aggregates statistics about a GitHub repository into a single JSON document. This crate
//! backs the `repo-stats` tool; its API may change without warning.
//!
//! # Module Organization
//!
//! - [`stats`]: Repository identifiers, the GitHub client, and the concurrent aggregator
//! - [`handler`]: Maps requests and aggregation outcomes to HTTP statuses and bodies
//! - [`config`]: Configuration file loading and validation
//! - `commands`: Command-line interface

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

mod commands;

pub mod config;
pub mod handler;
pub mod stats;

pub use commands::{Host, run};
