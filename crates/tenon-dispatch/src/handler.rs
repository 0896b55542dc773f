//! The capability contract a handler implementation satisfies.

use async_trait::async_trait;
use serde_json::Value;

use tenon_types::Fault;

/// One handler implements all methods of one contract interface.
///
/// The registry checks `methods()` against the interface descriptor at
/// registration time, so by the time `call` runs the method name is one
/// the handler declared and the parameters have already been validated
/// against the contract.
///
/// The engine makes no locking guarantee around invocation: a handler
/// shared by concurrent dispatch calls must be stateless or internally
/// synchronized.
#[async_trait]
pub trait InterfaceHandler: Send + Sync {
    /// The method names this handler implements.
    fn methods(&self) -> Vec<String>;

    /// Invokes `method` with positional, contract-validated parameters.
    ///
    /// A returned [`Fault`] travels back to the caller verbatim
    /// (code, message, and data). Panics are absorbed by the dispatcher
    /// and reported as internal errors.
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, Fault>;
}
