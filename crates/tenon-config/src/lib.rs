//! # tenon-config
//!
//! Configuration management for the tenon RPC engine.
//! Supports layered config: defaults -> file -> env vars.

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{HttpConfig, LoggingConfig, TenonConfig, ValidationConfig};
