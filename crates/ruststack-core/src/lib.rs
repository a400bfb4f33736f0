//! Core types and configuration for the RustStack IAM gateway.
//!
//! This crate holds the pieces shared by the IAM model, the HTTP layer and
//! the server binary: environment-driven configuration, the core error type,
//! and the account/region identifiers used when formatting principals.

mod config;
mod error;
mod types;

pub use config::RustStackConfig;
pub use error::{RustStackError, RustStackResult};
pub use types::{AccountId, AwsRegion};
