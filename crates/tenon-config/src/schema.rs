//! Configuration schema types.

use serde::{Deserialize, Serialize};

/// Top-level tenon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TenonConfig {
    /// Validation policy settings.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Validation policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject struct fields the contract does not declare.
    /// Off by default, so older contracts accept newer payloads.
    #[serde(default)]
    pub strict_fields: bool,
    /// Coerce string parameters toward their declared primitive types
    /// before validation.
    #[serde(default)]
    pub coerce: bool,
    /// Maximum value nesting depth accepted by the validator.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict_fields: false,
            coerce: false,
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> usize {
    64
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// TCP port the RPC endpoint listens on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "tenon=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
