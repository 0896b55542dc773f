//! Best-effort value coercion, applied to parameters before validation
//! when the engine is configured for it.
//!
//! Only the string⇄primitive conversions are attempted: numbers and
//! booleans stringify where a string is expected, and strings parse
//! where an int, float, or bool is expected. A value that does not
//! convert is returned unchanged and left for validation to reject.

use serde_json::{Number, Value};

use tenon_types::TypeDescriptor;

use crate::contract::{Contract, TypeDef};

/// Coerces `value` toward `ty`, recursing through arrays and struct
/// fields. Enum references and already-conforming values pass through
/// untouched.
pub fn coerce(contract: &Contract, ty: &TypeDescriptor, value: Value) -> Value {
    match ty {
        TypeDescriptor::Optional(inner) => {
            if value.is_null() {
                value
            } else {
                coerce(contract, inner, value)
            }
        }
        TypeDescriptor::Str => match value {
            Value::Number(n) => Value::String(n.to_string()),
            Value::Bool(b) => Value::String(b.to_string()),
            other => other,
        },
        TypeDescriptor::Int => match value {
            Value::String(s) => match s.parse::<i64>() {
                Ok(n) => Value::Number(n.into()),
                Err(_) => Value::String(s),
            },
            other => other,
        },
        TypeDescriptor::Float => match value {
            Value::String(s) => {
                // Integral strings keep an integer representation; the
                // validator accepts them for floats either way.
                if let Ok(n) = s.parse::<i64>() {
                    Value::Number(n.into())
                } else if let Some(n) = s.parse::<f64>().ok().and_then(Number::from_f64) {
                    Value::Number(n)
                } else {
                    Value::String(s)
                }
            }
            other => other,
        },
        TypeDescriptor::Bool => match value {
            Value::String(s) => match s.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(s),
            },
            other => other,
        },
        TypeDescriptor::Array(inner) => match value {
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| coerce(contract, inner, item))
                    .collect(),
            ),
            other => other,
        },
        TypeDescriptor::Ref(name) => match (contract.resolve(name), value) {
            (Some(TypeDef::Struct(_)), Value::Object(mut map)) => {
                for field in contract.struct_fields(name).unwrap_or(&[]) {
                    if let Some(slot) = map.get_mut(&field.name) {
                        let taken = std::mem::take(slot);
                        *slot = coerce(contract, &field.ty, taken);
                    }
                }
                Value::Object(map)
            }
            (_, other) => other,
        },
    }
}
