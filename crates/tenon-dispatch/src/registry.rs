//! Maps interface names to handler instances.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use tenon_contract::Contract;

use crate::handler::InterfaceHandler;

/// Errors from handler registration.
///
/// Both are configuration errors: registration happens once during
/// startup, before any dispatch call is accepted, and a failure there
/// should abort startup.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The contract does not declare the interface.
    #[error("unknown interface: '{name}'")]
    UnknownInterface { name: String },
    /// The handler does not implement every declared method.
    #[error("handler for interface '{interface}' is missing methods: {}", .missing.join(", "))]
    IncompleteHandler {
        interface: String,
        missing: Vec<String>,
    },
}

/// The set of registered handlers, keyed by interface name.
///
/// Populated at startup and read-only afterward; the dispatcher only
/// ever resolves from it.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn InterfaceHandler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `interface`.
    ///
    /// Checks eagerly that the contract declares the interface and that
    /// the handler covers every declared method, so a miswired server
    /// fails at startup instead of on the first unlucky call.
    /// Registering the same interface twice replaces the handler.
    pub fn register(
        &mut self,
        contract: &Contract,
        interface: &str,
        handler: Arc<dyn InterfaceHandler>,
    ) -> Result<(), RegistryError> {
        let descriptor =
            contract
                .interface(interface)
                .ok_or_else(|| RegistryError::UnknownInterface {
                    name: interface.to_string(),
                })?;

        let implemented = handler.methods();
        let missing: Vec<String> = descriptor
            .methods
            .iter()
            .filter(|m| !implemented.iter().any(|name| name == &m.name))
            .map(|m| m.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(RegistryError::IncompleteHandler {
                interface: interface.to_string(),
                missing,
            });
        }

        self.handlers.insert(interface.to_string(), handler);
        Ok(())
    }

    /// Resolves the handler registered for `interface`.
    pub fn resolve(&self, interface: &str) -> Option<Arc<dyn InterfaceHandler>> {
        self.handlers.get(interface).cloned()
    }
}
