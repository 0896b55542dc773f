//! The request lifecycle: decode, validate, invoke, validate, encode.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, error, warn};

use tenon_contract::{coerce, Contract, ValidationPolicy, Validator};
use tenon_protocol::{
    error_codes, JsonRpcErrorResponse, JsonRpcReply, JsonRpcRequest, JsonRpcResponse, RequestId,
};

use crate::handler::InterfaceHandler;
use crate::registry::HandlerRegistry;

/// Built-in introspection method: returns the raw IDL document the
/// contract was loaded from, so clients can bootstrap their own
/// contract without an out-of-band copy.
pub const IDL_METHOD: &str = "tenon-idl";

// Internal errors carry this fixed message; the specifics stay in the
// server-side log.
const INTERNAL_MESSAGE: &str = "internal server error";

/// Routes decoded requests through the contract to registered handlers.
///
/// Stateless per call: the contract, registry, and policy are fixed at
/// construction, so one dispatcher is safely shared by any number of
/// concurrent calls.
pub struct Dispatcher {
    contract: Arc<Contract>,
    registry: HandlerRegistry,
    policy: ValidationPolicy,
    coerce_params: bool,
}

impl Dispatcher {
    /// Creates a dispatcher with the default validation policy and
    /// coercion disabled.
    pub fn new(contract: Arc<Contract>, registry: HandlerRegistry) -> Self {
        Self {
            contract,
            registry,
            policy: ValidationPolicy::default(),
            coerce_params: false,
        }
    }

    /// Replaces the validation policy.
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables or disables parameter coercion.
    pub fn with_coercion(mut self, coerce_params: bool) -> Self {
        self.coerce_params = coerce_params;
        self
    }

    /// The contract this dispatcher routes against.
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Entry point for transports: a UTF-8 JSON payload in, a UTF-8
    /// JSON payload out. Never fails; every failure mode is encoded as
    /// a JSON-RPC error response.
    pub async fn handle_bytes(&self, bytes: &[u8]) -> Vec<u8> {
        let request: Value = match serde_json::from_slice(bytes) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "unparseable request payload");
                let reply: JsonRpcReply = JsonRpcErrorResponse::error(
                    RequestId::Null,
                    error_codes::PARSE_ERROR,
                    format!("parse error: {e}"),
                )
                .into();
                return encode(&encode_reply(&reply));
            }
        };
        encode(&self.handle_value(request).await)
    }

    /// Dispatches an already-parsed payload. A JSON array is treated as
    /// a batch and answered with an array in the same order; anything
    /// else is a single request answered with a single response.
    pub async fn handle_value(&self, request: Value) -> Value {
        match request {
            Value::Array(items) => {
                if items.is_empty() {
                    warn!("request contains an empty batch");
                    let reply: JsonRpcReply = JsonRpcErrorResponse::error(
                        RequestId::Null,
                        error_codes::INVALID_REQUEST,
                        "request contains an empty batch",
                    )
                    .into();
                    return encode_reply(&reply);
                }
                // Items are independent: each contributes its own
                // success or error at its original position.
                let mut replies = Vec::with_capacity(items.len());
                for item in items {
                    replies.push(encode_reply(&self.handle_single(item).await));
                }
                Value::Array(replies)
            }
            single => encode_reply(&self.handle_single(single).await),
        }
    }

    /// Processes one request object (never a batch).
    async fn handle_single(&self, item: Value) -> JsonRpcReply {
        let fallback_id = recover_id(&item);
        let request: JsonRpcRequest = match serde_json::from_value(item) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "malformed request object");
                return JsonRpcErrorResponse::error(
                    fallback_id,
                    error_codes::INVALID_REQUEST,
                    format!("invalid request: {e}"),
                )
                .into();
            }
        };
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcReply {
        let id = request.id.clone();
        debug!(method = %request.method, id = ?id, "dispatching request");

        if request.method == IDL_METHOD {
            return JsonRpcResponse::success(id, self.contract.document().clone()).into();
        }

        let Some(method) = self.contract.method(&request.method) else {
            warn!(method = %request.method, "method not found");
            return JsonRpcErrorResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("method not found: {}", request.method),
            )
            .into();
        };
        let interface = request
            .method
            .split_once('.')
            .map_or(request.method.as_str(), |(iface, _)| iface);

        let params = match request.params {
            None => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                warn!(method = %request.method, "params is not an array");
                return JsonRpcErrorResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "params must be an array",
                )
                .into();
            }
        };
        if params.len() != method.params.len() {
            warn!(
                method = %request.method,
                expected = method.params.len(),
                got = params.len(),
                "wrong parameter count"
            );
            return JsonRpcErrorResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!(
                    "expected {} params, got {}",
                    method.params.len(),
                    params.len()
                ),
            )
            .into();
        }

        let validator = Validator::with_policy(&self.contract, self.policy);
        let mut checked = Vec::with_capacity(params.len());
        for (i, (value, decl)) in params.into_iter().zip(method.params.iter()).enumerate() {
            let value = if self.coerce_params {
                coerce(&self.contract, &decl.ty, value)
            } else {
                value
            };
            if let Err(e) = validator.validate(&decl.ty, &value, &decl.name) {
                warn!(method = %request.method, error = %e, "invalid param");
                return JsonRpcErrorResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("invalid param [{i}]: {e}"),
                )
                .into();
            }
            checked.push(value);
        }

        let Some(handler) = self.registry.resolve(interface) else {
            // A declared interface with no handler is server
            // misconfiguration, not the caller's fault.
            error!(interface, method = %request.method, "no handler registered");
            return JsonRpcErrorResponse::error(
                id,
                error_codes::INTERNAL_ERROR,
                INTERNAL_MESSAGE,
            )
            .into();
        };

        // Run the handler in its own task so a panic is contained and
        // surfaces as a join error instead of tearing down the caller.
        let method_name = method.name.clone();
        let invocation =
            tokio::spawn(async move { handler.call(&method_name, checked).await });
        let result = match invocation.await {
            Ok(Ok(value)) => value,
            Ok(Err(fault)) => {
                debug!(method = %request.method, code = fault.code, "handler fault");
                return JsonRpcErrorResponse::fault(id, fault).into();
            }
            Err(e) => {
                error!(method = %request.method, error = %e, "handler panicked");
                return JsonRpcErrorResponse::error(
                    id,
                    error_codes::INTERNAL_ERROR,
                    INTERNAL_MESSAGE,
                )
                .into();
            }
        };

        // A non-conformant return value is a handler bug; it must not
        // reach the caller.
        if let Err(e) = validator.validate(&method.returns, &result, "result") {
            error!(method = %request.method, error = %e, "handler returned non-conformant value");
            return JsonRpcErrorResponse::error(id, error_codes::INTERNAL_ERROR, INTERNAL_MESSAGE)
                .into();
        }

        JsonRpcResponse::success(id, result).into()
    }
}

/// Pulls a usable id out of a request object that failed to parse, so
/// the error response still correlates. Anything unusable becomes null.
fn recover_id(item: &Value) -> RequestId {
    match item.get("id") {
        Some(Value::Number(n)) => n.as_i64().map_or(RequestId::Null, RequestId::Number),
        Some(Value::String(s)) => RequestId::String(s.clone()),
        _ => RequestId::Null,
    }
}

/// Serializes a reply to a `Value`, downgrading to a bare internal
/// error if serialization itself fails.
fn encode_reply(reply: &JsonRpcReply) -> Value {
    serde_json::to_value(reply).unwrap_or_else(|e| {
        error!(error = %e, "failed to encode reply");
        json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": {"code": error_codes::INTERNAL_ERROR, "message": INTERNAL_MESSAGE}
        })
    })
}

/// Serializes the response value to bytes for the transport.
fn encode(response: &Value) -> Vec<u8> {
    serde_json::to_vec(response).unwrap_or_else(|e| {
        error!(error = %e, "failed to encode response body");
        format!(
            r#"{{"jsonrpc":"2.0","id":null,"error":{{"code":{},"message":"{}"}}}}"#,
            error_codes::INTERNAL_ERROR,
            INTERNAL_MESSAGE
        )
        .into_bytes()
    })
}
