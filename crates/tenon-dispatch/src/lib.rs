//! # tenon-dispatch
//!
//! The dispatch core of the tenon RPC engine: the handler capability
//! trait, the handler registry, and the dispatcher that ties a loaded
//! contract to registered handlers.

pub mod dispatcher;
pub mod handler;
pub mod registry;

pub use dispatcher::{Dispatcher, IDL_METHOD};
pub use handler::InterfaceHandler;
pub use registry::{HandlerRegistry, RegistryError};

// Handler implementations raise this; re-exported so they don't need a
// direct tenon-types dependency.
pub use tenon_types::Fault;
