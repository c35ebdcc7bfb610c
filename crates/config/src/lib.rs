//! Configuration loading for paybridge.
//!
//! Uses figment for YAML-based configuration layered over sensible defaults.

pub mod schema;

pub use schema::{ApiConfig, BraintreeConfig, Config, LogConfig, LogFormat, ScriptSet};
