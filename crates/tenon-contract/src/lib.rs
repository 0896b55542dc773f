//! # tenon-contract
//!
//! Contract loading, indexing, and value validation for the tenon RPC
//! engine. A [`Contract`] is the immutable, indexed form of an IDL
//! document; the [`Validator`] checks JSON values against the types it
//! declares.

pub mod coerce;
pub mod contract;
pub mod document;
pub mod validate;

pub use coerce::coerce;
pub use contract::{Contract, TypeDef};
pub use document::ContractError;
pub use validate::{ValidationError, ValidationPolicy, Validator, DEFAULT_MAX_DEPTH};
