//! # tenon-protocol
//!
//! JSON-RPC 2.0 type definitions for the tenon RPC engine.
//! This crate defines the wire format for communication between
//! callers and the dispatch engine.

pub mod jsonrpc;

pub use jsonrpc::*;
