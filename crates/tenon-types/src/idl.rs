//! IDL document model: descriptors for interfaces, methods, structs,
//! enums, and the types they reference.
//!
//! These are pure data types. Parsing a raw IDL document into this model
//! (and checking cross-references) lives in `tenon-contract`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of a parameter, return value, or struct field.
///
/// `Ref` names a struct or enum declared elsewhere in the same contract;
/// resolution is checked once at contract load, so a `Ref` held by a
/// loaded contract always resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// UTF-8 string.
    Str,
    /// Integer number. A fractional value never matches.
    Int,
    /// Floating-point number. Integral values also match.
    Float,
    /// Boolean.
    Bool,
    /// Reference to a struct or enum by name.
    Ref(String),
    /// Ordered sequence whose elements all match the inner type.
    Array(Box<TypeDescriptor>),
    /// Null (or an absent field) is accepted; otherwise the inner type
    /// applies.
    Optional(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    /// Wraps `self` in an array descriptor.
    pub fn array(self) -> Self {
        TypeDescriptor::Array(Box::new(self))
    }

    /// Wraps `self` in an optional descriptor.
    pub fn optional(self) -> Self {
        TypeDescriptor::Optional(Box::new(self))
    }

    /// Returns true if null is an acceptable value for this type.
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeDescriptor::Optional(_))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Str => f.write_str("string"),
            TypeDescriptor::Int => f.write_str("int"),
            TypeDescriptor::Float => f.write_str("float"),
            TypeDescriptor::Bool => f.write_str("bool"),
            TypeDescriptor::Ref(name) => f.write_str(name),
            TypeDescriptor::Array(inner) => write!(f, "[]{inner}"),
            TypeDescriptor::Optional(inner) => write!(f, "{inner}"),
        }
    }
}

/// A named struct field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, unique within the struct (including inherited fields).
    pub name: String,
    /// Field type.
    pub ty: TypeDescriptor,
}

impl FieldDescriptor {
    /// Returns true if the field must be present and non-null.
    pub fn required(&self) -> bool {
        !self.ty.is_optional()
    }
}

/// A user-defined record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDescriptor {
    /// Struct name, unique across the contract.
    pub name: String,
    /// Parent struct whose fields this struct inherits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Fields declared directly on this struct (not inherited ones).
    pub fields: Vec<FieldDescriptor>,
}

/// A closed set of string values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    /// Enum name, unique across the contract.
    pub name: String,
    /// Allowed values.
    pub values: Vec<String>,
}

impl EnumDescriptor {
    /// Returns true if `value` is one of the allowed values.
    pub fn allows(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// A named method parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Parameter name, used in validation error paths.
    pub name: String,
    /// Parameter type.
    pub ty: TypeDescriptor,
}

/// A callable method on an interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name, unique within the interface.
    pub name: String,
    /// Positional parameters.
    pub params: Vec<ParamDescriptor>,
    /// Return type.
    pub returns: TypeDescriptor,
}

/// A named collection of methods a handler implements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDescriptor {
    /// Interface name, unique across the contract.
    pub name: String,
    /// Declared methods.
    pub methods: Vec<MethodDescriptor>,
}
