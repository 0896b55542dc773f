//! IDL document parsing: raw JSON wire form into the descriptor model.
//!
//! The wire form is an array of elements, each tagged with `"type"`:
//! `interface` (with `functions`), `struct` (with `fields` and optional
//! `extends`), `enum` (with `values`), or `comment`. Comment and unknown
//! element kinds are skipped. Every field, parameter, and return carries
//! a flat `{type, is_array, optional}` triple which is folded into the
//! recursive [`TypeDescriptor`] form here.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use tenon_types::{
    EnumDescriptor, FieldDescriptor, InterfaceDescriptor, MethodDescriptor, ParamDescriptor,
    StructDescriptor, TypeDescriptor,
};

/// Errors raised while loading a contract document.
///
/// Any of these is fatal: a contract either loads completely or not at all.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The document is not valid JSON, or not shaped like an IDL.
    #[error("malformed IDL document: {0}")]
    Document(#[from] serde_json::Error),
    /// Two interfaces, structs, or enums share a name.
    #[error("duplicate declaration: '{name}'")]
    DuplicateName { name: String },
    /// An interface declares the same method twice.
    #[error("interface '{interface}' declares method '{method}' more than once")]
    DuplicateMethod { interface: String, method: String },
    /// A struct declares (or inherits) the same field twice.
    #[error("struct '{name}' has duplicate field '{field}'")]
    DuplicateField { name: String, field: String },
    /// A field, parameter, or return references a type the document
    /// does not declare.
    #[error("{location} references undeclared type '{name}'")]
    UnresolvedType { location: String, name: String },
    /// A struct extends a struct the document does not declare.
    #[error("struct '{name}' extends undeclared struct '{parent}'")]
    UnknownParent { name: String, parent: String },
    /// A struct's extends chain loops back on itself.
    #[error("cycle in extends chain of struct '{name}'")]
    ExtendsCycle { name: String },
    /// An enum declares no values, so no value could ever validate.
    #[error("enum '{name}' has no values")]
    EmptyEnum { name: String },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawElement {
    Interface(RawInterface),
    Struct(RawStruct),
    Enum(RawEnum),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct RawInterface {
    name: String,
    #[serde(default)]
    functions: Vec<RawFunction>,
}

#[derive(Debug, Deserialize)]
struct RawFunction {
    name: String,
    #[serde(default)]
    params: Vec<RawParam>,
    returns: RawType,
}

#[derive(Debug, Deserialize)]
struct RawParam {
    name: String,
    #[serde(flatten)]
    ty: RawType,
}

#[derive(Debug, Deserialize)]
struct RawStruct {
    name: String,
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    fields: Vec<RawParam>,
}

#[derive(Debug, Deserialize)]
struct RawEnum {
    name: String,
    #[serde(default)]
    values: Vec<RawEnumValue>,
}

#[derive(Debug, Deserialize)]
struct RawEnumValue {
    value: String,
}

/// The flat type triple used on the wire.
#[derive(Debug, Deserialize)]
struct RawType {
    #[serde(rename = "type")]
    name: String,
    #[serde(default)]
    is_array: bool,
    #[serde(default)]
    optional: bool,
}

impl RawType {
    /// Folds the flat triple into the recursive descriptor form:
    /// optional wraps array wraps the base type.
    fn descriptor(&self) -> TypeDescriptor {
        let base = match self.name.as_str() {
            "string" => TypeDescriptor::Str,
            "int" => TypeDescriptor::Int,
            "float" => TypeDescriptor::Float,
            "bool" => TypeDescriptor::Bool,
            other => TypeDescriptor::Ref(other.to_string()),
        };
        let ty = if self.is_array { base.array() } else { base };
        if self.optional {
            ty.optional()
        } else {
            ty
        }
    }
}

/// Descriptor lists parsed out of one document, before indexing.
#[derive(Debug)]
pub(crate) struct ParsedDocument {
    pub interfaces: Vec<InterfaceDescriptor>,
    pub structs: Vec<StructDescriptor>,
    pub enums: Vec<EnumDescriptor>,
}

/// Parses the raw document into descriptors, applying the checks that
/// only need one element at a time (duplicate methods and fields, empty
/// enums). Cross-element checks happen during contract indexing.
pub(crate) fn parse_elements(document: &Value) -> Result<ParsedDocument, ContractError> {
    let elements: Vec<RawElement> = serde_json::from_value(document.clone())?;

    let mut parsed = ParsedDocument {
        interfaces: Vec::new(),
        structs: Vec::new(),
        enums: Vec::new(),
    };

    for element in elements {
        match element {
            RawElement::Interface(raw) => parsed.interfaces.push(convert_interface(raw)?),
            RawElement::Struct(raw) => parsed.structs.push(convert_struct(raw)?),
            RawElement::Enum(raw) => parsed.enums.push(convert_enum(raw)?),
            RawElement::Other => {}
        }
    }

    Ok(parsed)
}

fn convert_interface(raw: RawInterface) -> Result<InterfaceDescriptor, ContractError> {
    let mut methods = Vec::with_capacity(raw.functions.len());
    for func in raw.functions {
        if methods.iter().any(|m: &MethodDescriptor| m.name == func.name) {
            return Err(ContractError::DuplicateMethod {
                interface: raw.name,
                method: func.name,
            });
        }
        methods.push(MethodDescriptor {
            name: func.name,
            params: func
                .params
                .iter()
                .map(|p| ParamDescriptor {
                    name: p.name.clone(),
                    ty: p.ty.descriptor(),
                })
                .collect(),
            returns: func.returns.descriptor(),
        });
    }
    Ok(InterfaceDescriptor {
        name: raw.name,
        methods,
    })
}

fn convert_struct(raw: RawStruct) -> Result<StructDescriptor, ContractError> {
    let mut fields: Vec<FieldDescriptor> = Vec::with_capacity(raw.fields.len());
    for field in &raw.fields {
        if fields.iter().any(|f| f.name == field.name) {
            return Err(ContractError::DuplicateField {
                name: raw.name,
                field: field.name.clone(),
            });
        }
        fields.push(FieldDescriptor {
            name: field.name.clone(),
            ty: field.ty.descriptor(),
        });
    }
    Ok(StructDescriptor {
        name: raw.name,
        extends: raw.extends,
        fields,
    })
}

fn convert_enum(raw: RawEnum) -> Result<EnumDescriptor, ContractError> {
    if raw.values.is_empty() {
        return Err(ContractError::EmptyEnum { name: raw.name });
    }
    Ok(EnumDescriptor {
        name: raw.name,
        values: raw.values.into_iter().map(|v| v.value).collect(),
    })
}
