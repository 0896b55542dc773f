//! # tenon-types
//!
//! Domain types for the tenon RPC engine.
//! This crate contains pure data types with zero external dependencies
//! (except serde for serialization).

pub mod error;
pub mod idl;

// Re-exports for convenience.
pub use error::{Fault, APPLICATION_ERROR};
pub use idl::{
    EnumDescriptor, FieldDescriptor, InterfaceDescriptor, MethodDescriptor, ParamDescriptor,
    StructDescriptor, TypeDescriptor,
};
