//! The application-level fault type handlers raise.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Default JSON-RPC error code for handler faults that do not pick one.
///
/// Lies outside the reserved protocol range (-32768..=-32100), so callers
/// can always tell an application fault from an engine error.
pub const APPLICATION_ERROR: i64 = -32000;

/// An error raised by a handler, carried back to the caller verbatim.
///
/// Unlike engine errors (parse failures, validation failures), a `Fault`
/// is semantically meaningful to the caller: the handler chooses the code
/// and message, and may attach structured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fault {
    /// Application-defined error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Fault {
    /// Creates a fault with an explicit code.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a fault with the default application error code.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(APPLICATION_ERROR, message)
    }

    /// Attaches structured data to the fault.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Fault {}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Fault::message(message)
    }
}

impl From<&str> for Fault {
    fn from(message: &str) -> Self {
        Fault::message(message)
    }
}
