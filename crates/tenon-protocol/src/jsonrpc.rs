//! JSON-RPC 2.0 types for the tenon wire protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tenon_types::Fault;

/// JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version. Omitting it on the wire is tolerated and reads
    /// as "2.0"; responses always carry it.
    #[serde(default = "default_version")]
    pub jsonrpc: String,
    /// Request ID, echoed back in the response.
    pub id: RequestId,
    /// Method name, encoded as `Interface.method`.
    pub method: String,
    /// Positional parameters. May be omitted for zero-arg methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

fn default_version() -> String {
    "2.0".to_string()
}

/// JSON-RPC 2.0 success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Request ID (matches the request).
    pub id: RequestId,
    /// Result value.
    pub result: Value,
}

/// JSON-RPC 2.0 error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorResponse {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Request ID (matches the request, or null when unknown).
    pub id: RequestId,
    /// Error details.
    pub error: JsonRpcError,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
    /// Optional structured data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Request ID: a number, a string, or null.
///
/// Null appears only in responses to requests whose id could not be
/// recovered (malformed payloads).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric ID.
    Number(i64),
    /// String ID.
    String(String),
    /// Unknown ID (serializes as JSON null).
    Null,
}

/// Either a success or an error response for one request.
///
/// Serializes transparently as the inner response object, so a batch is
/// just a `Vec<JsonRpcReply>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcReply {
    /// The call produced a result.
    Success(JsonRpcResponse),
    /// The call produced an error.
    Error(JsonRpcErrorResponse),
}

/// Standard JSON-RPC error codes.
pub mod error_codes {
    /// Invalid JSON was received.
    pub const PARSE_ERROR: i64 = -32700;
    /// The JSON sent is not a valid Request object.
    pub const INVALID_REQUEST: i64 = -32600;
    /// The method does not exist.
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Invalid method parameter(s).
    pub const INVALID_PARAMS: i64 = -32602;
    /// Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i64 = -32603;
}

impl JsonRpcRequest {
    /// Creates a new JSON-RPC 2.0 request.
    pub fn new(id: RequestId, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

impl JsonRpcResponse {
    /// Creates a success response.
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result,
        }
    }
}

impl JsonRpcErrorResponse {
    /// Creates an error response.
    pub fn error(id: RequestId, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            error: JsonRpcError {
                code,
                message: message.into(),
                data: None,
            },
        }
    }

    /// Creates an error response carrying a handler fault verbatim.
    pub fn fault(id: RequestId, fault: Fault) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            error: JsonRpcError {
                code: fault.code,
                message: fault.message,
                data: fault.data,
            },
        }
    }
}

impl JsonRpcReply {
    /// Returns the request id this reply answers.
    pub fn id(&self) -> &RequestId {
        match self {
            JsonRpcReply::Success(r) => &r.id,
            JsonRpcReply::Error(e) => &e.id,
        }
    }

    /// Serializes the reply as a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<JsonRpcResponse> for JsonRpcReply {
    fn from(r: JsonRpcResponse) -> Self {
        JsonRpcReply::Success(r)
    }
}

impl From<JsonRpcErrorResponse> for JsonRpcReply {
    fn from(e: JsonRpcErrorResponse) -> Self {
        JsonRpcReply::Error(e)
    }
}
