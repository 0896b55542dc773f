//! Recursive validation of JSON values against contract types.

use serde_json::Value;
use thiserror::Error;

use tenon_types::TypeDescriptor;

use crate::contract::{Contract, TypeDef};

/// Default cap on value nesting depth.
///
/// Recursion is keyed to the actual depth of the value being checked, so
/// recursive struct types are fine; the cap only guards against
/// pathologically nested payloads exhausting the stack.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tunable validation behavior.
#[derive(Debug, Clone, Copy)]
pub struct ValidationPolicy {
    /// Reject object fields the struct does not declare. Off by default:
    /// unknown fields are ignored so older contracts accept newer payloads.
    pub strict_fields: bool,
    /// Maximum value nesting depth.
    pub max_depth: usize,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            strict_fields: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A validation failure, qualified by the path to the offending value.
///
/// Paths read like `person.emails[2]`: struct fields extend the path with
/// `.field`, array elements with `[index]`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required value was null or absent.
    #[error("{path} cannot be null")]
    MissingValue { path: String },
    /// The value's runtime kind does not match the declared type.
    #[error("{path} expects type '{expected}' but got type '{actual}'")]
    TypeMismatch {
        path: String,
        expected: String,
        actual: String,
    },
    /// A string value is not one of the enum's allowed values.
    #[error("{path} value '{value}' is not in the enum '{name}'")]
    NotInEnum {
        path: String,
        value: String,
        name: String,
    },
    /// Strict mode only: an object carries a field the struct lacks.
    #[error("{path}.{field} does not exist in type '{name}'")]
    UnknownField {
        path: String,
        field: String,
        name: String,
    },
    /// The value nests deeper than the configured cap.
    #[error("{path} exceeds the maximum nesting depth of {max}")]
    TooDeep { path: String, max: usize },
    /// A type reference did not resolve, which means the contract the
    /// validator was handed is inconsistent.
    #[error("{path} references unknown type '{name}'")]
    UnknownType { path: String, name: String },
}

impl ValidationError {
    /// The path to the value that failed.
    pub fn path(&self) -> &str {
        match self {
            ValidationError::MissingValue { path }
            | ValidationError::TypeMismatch { path, .. }
            | ValidationError::NotInEnum { path, .. }
            | ValidationError::UnknownField { path, .. }
            | ValidationError::TooDeep { path, .. }
            | ValidationError::UnknownType { path, .. } => path,
        }
    }
}

/// Validates JSON values against type descriptors from one contract.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    contract: &'a Contract,
    policy: ValidationPolicy,
}

impl<'a> Validator<'a> {
    /// Creates a validator with the default policy.
    pub fn new(contract: &'a Contract) -> Self {
        Self::with_policy(contract, ValidationPolicy::default())
    }

    /// Creates a validator with an explicit policy.
    pub fn with_policy(contract: &'a Contract, policy: ValidationPolicy) -> Self {
        Self { contract, policy }
    }

    /// Checks `value` against `ty`, reporting the first mismatch with a
    /// path rooted at `path`.
    pub fn validate(
        &self,
        ty: &TypeDescriptor,
        value: &Value,
        path: &str,
    ) -> Result<(), ValidationError> {
        self.check(ty, value, path, 0)
    }

    fn check(
        &self,
        ty: &TypeDescriptor,
        value: &Value,
        path: &str,
        depth: usize,
    ) -> Result<(), ValidationError> {
        if depth > self.policy.max_depth {
            return Err(ValidationError::TooDeep {
                path: path.to_string(),
                max: self.policy.max_depth,
            });
        }

        match ty {
            TypeDescriptor::Optional(inner) => {
                if value.is_null() {
                    Ok(())
                } else {
                    self.check(inner, value, path, depth)
                }
            }
            _ if value.is_null() => Err(ValidationError::MissingValue {
                path: path.to_string(),
            }),
            TypeDescriptor::Str => match value {
                Value::String(_) => Ok(()),
                other => Err(self.mismatch(path, ty, other)),
            },
            TypeDescriptor::Bool => match value {
                Value::Bool(_) => Ok(()),
                other => Err(self.mismatch(path, ty, other)),
            },
            TypeDescriptor::Int => match value {
                // Integral floats (e.g. 2.0) pass; fractional ones do not.
                Value::Number(n) => {
                    let integral = n.is_i64()
                        || n.is_u64()
                        || n.as_f64().is_some_and(|f| f.fract() == 0.0);
                    if integral {
                        Ok(())
                    } else {
                        Err(self.mismatch(path, ty, value))
                    }
                }
                other => Err(self.mismatch(path, ty, other)),
            },
            TypeDescriptor::Float => match value {
                Value::Number(_) => Ok(()),
                other => Err(self.mismatch(path, ty, other)),
            },
            TypeDescriptor::Array(inner) => match value {
                Value::Array(items) => {
                    for (i, item) in items.iter().enumerate() {
                        self.check(inner, item, &format!("{path}[{i}]"), depth + 1)?;
                    }
                    Ok(())
                }
                other => Err(self.mismatch(path, ty, other)),
            },
            TypeDescriptor::Ref(name) => match self.contract.resolve(name) {
                Some(TypeDef::Enum(e)) => match value {
                    Value::String(s) => {
                        if e.allows(s) {
                            Ok(())
                        } else {
                            Err(ValidationError::NotInEnum {
                                path: path.to_string(),
                                value: s.clone(),
                                name: e.name.clone(),
                            })
                        }
                    }
                    other => Err(self.mismatch(path, ty, other)),
                },
                Some(TypeDef::Struct(_)) => match value {
                    Value::Object(map) => {
                        let fields = self.contract.struct_fields(name).unwrap_or(&[]);
                        for field in fields {
                            let field_value = map.get(&field.name).unwrap_or(&Value::Null);
                            self.check(
                                &field.ty,
                                field_value,
                                &format!("{path}.{}", field.name),
                                depth + 1,
                            )?;
                        }
                        if self.policy.strict_fields {
                            for key in map.keys() {
                                if !fields.iter().any(|f| &f.name == key) {
                                    return Err(ValidationError::UnknownField {
                                        path: path.to_string(),
                                        field: key.clone(),
                                        name: name.clone(),
                                    });
                                }
                            }
                        }
                        Ok(())
                    }
                    other => Err(self.mismatch(path, ty, other)),
                },
                None => Err(ValidationError::UnknownType {
                    path: path.to_string(),
                    name: name.clone(),
                }),
            },
        }
    }

    fn mismatch(&self, path: &str, expected: &TypeDescriptor, actual: &Value) -> ValidationError {
        ValidationError::TypeMismatch {
            path: path.to_string(),
            expected: expected.to_string(),
            actual: kind_of(actual).to_string(),
        }
    }
}

/// The runtime kind of a JSON value, as it appears in error messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0) {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
