//! The indexed, immutable form of a loaded IDL document.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use tenon_types::{
    EnumDescriptor, FieldDescriptor, InterfaceDescriptor, MethodDescriptor, StructDescriptor,
    TypeDescriptor,
};

use crate::document::{self, ContractError};

/// A struct or enum definition looked up by name.
#[derive(Debug, Clone, Copy)]
pub enum TypeDef<'a> {
    /// The name resolves to a struct.
    Struct(&'a StructDescriptor),
    /// The name resolves to an enum.
    Enum(&'a EnumDescriptor),
}

/// A parsed, indexed IDL document.
///
/// Built once at startup and never mutated afterward, so it is safe to
/// share across concurrent dispatch calls without locking. All lookups
/// are single map probes.
#[derive(Debug)]
pub struct Contract {
    document: Value,
    interfaces: HashMap<String, InterfaceDescriptor>,
    // Keyed by the wire method name, `Interface.method`.
    methods: HashMap<String, MethodDescriptor>,
    structs: HashMap<String, StructDescriptor>,
    enums: HashMap<String, EnumDescriptor>,
    // Extends chains flattened at load: own fields first, then ancestors'.
    struct_fields: HashMap<String, Vec<FieldDescriptor>>,
}

impl Contract {
    /// Loads a contract from raw IDL document bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ContractError> {
        let document: Value = serde_json::from_slice(bytes)?;
        Self::from_value(document)
    }

    /// Loads a contract from an IDL document string.
    pub fn from_str(text: &str) -> Result<Self, ContractError> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_value(document)
    }

    /// Loads a contract from an already-parsed IDL document.
    ///
    /// The original document is retained verbatim so it can be served to
    /// clients that ask for the contract (see the dispatcher's
    /// introspection method).
    pub fn from_value(document: Value) -> Result<Self, ContractError> {
        let parsed = document::parse_elements(&document)?;

        let mut names: HashSet<String> = HashSet::new();
        for name in parsed
            .interfaces
            .iter()
            .map(|i| &i.name)
            .chain(parsed.structs.iter().map(|s| &s.name))
            .chain(parsed.enums.iter().map(|e| &e.name))
        {
            if !names.insert(name.clone()) {
                return Err(ContractError::DuplicateName { name: name.clone() });
            }
        }

        let mut methods = HashMap::new();
        for iface in &parsed.interfaces {
            for method in &iface.methods {
                methods.insert(format!("{}.{}", iface.name, method.name), method.clone());
            }
        }

        let interfaces: HashMap<String, InterfaceDescriptor> = parsed
            .interfaces
            .into_iter()
            .map(|i| (i.name.clone(), i))
            .collect();
        let structs: HashMap<String, StructDescriptor> = parsed
            .structs
            .into_iter()
            .map(|s| (s.name.clone(), s))
            .collect();
        let enums: HashMap<String, EnumDescriptor> = parsed
            .enums
            .into_iter()
            .map(|e| (e.name.clone(), e))
            .collect();

        check_references(&interfaces, &structs, &enums)?;
        let struct_fields = flatten_struct_fields(&structs)?;

        Ok(Self {
            document,
            interfaces,
            methods,
            structs,
            enums,
            struct_fields,
        })
    }

    /// Looks up an interface by name.
    pub fn interface(&self, name: &str) -> Option<&InterfaceDescriptor> {
        self.interfaces.get(name)
    }

    /// Looks up a method by its wire name, `Interface.method`.
    pub fn method(&self, qualified: &str) -> Option<&MethodDescriptor> {
        self.methods.get(qualified)
    }

    /// Resolves a type reference to its struct or enum definition.
    pub fn resolve(&self, name: &str) -> Option<TypeDef<'_>> {
        if let Some(s) = self.structs.get(name) {
            return Some(TypeDef::Struct(s));
        }
        self.enums.get(name).map(TypeDef::Enum)
    }

    /// Returns a struct's effective fields, including inherited ones.
    pub fn struct_fields(&self, name: &str) -> Option<&[FieldDescriptor]> {
        self.struct_fields.get(name).map(Vec::as_slice)
    }

    /// Returns the raw IDL document the contract was loaded from.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Iterates over all declared interfaces.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceDescriptor> {
        self.interfaces.values()
    }
}

/// Returns the struct/enum name a descriptor ultimately refers to, if any.
fn base_ref(ty: &TypeDescriptor) -> Option<&str> {
    match ty {
        TypeDescriptor::Ref(name) => Some(name),
        TypeDescriptor::Array(inner) | TypeDescriptor::Optional(inner) => base_ref(inner),
        _ => None,
    }
}

/// Verifies every type reference in the document resolves to a declared
/// struct or enum.
fn check_references(
    interfaces: &HashMap<String, InterfaceDescriptor>,
    structs: &HashMap<String, StructDescriptor>,
    enums: &HashMap<String, EnumDescriptor>,
) -> Result<(), ContractError> {
    let check = |ty: &TypeDescriptor, location: String| -> Result<(), ContractError> {
        match base_ref(ty) {
            Some(name) if !structs.contains_key(name) && !enums.contains_key(name) => {
                Err(ContractError::UnresolvedType {
                    location,
                    name: name.to_string(),
                })
            }
            _ => Ok(()),
        }
    };

    for s in structs.values() {
        for field in &s.fields {
            check(&field.ty, format!("{}.{}", s.name, field.name))?;
        }
    }
    for iface in interfaces.values() {
        for method in &iface.methods {
            for param in &method.params {
                check(
                    &param.ty,
                    format!("{}.{} param '{}'", iface.name, method.name, param.name),
                )?;
            }
            check(
                &method.returns,
                format!("{}.{} return", iface.name, method.name),
            )?;
        }
    }
    Ok(())
}

/// Flattens each struct's extends chain into one effective field list,
/// rejecting unknown parents, cycles, and inherited-name collisions.
fn flatten_struct_fields(
    structs: &HashMap<String, StructDescriptor>,
) -> Result<HashMap<String, Vec<FieldDescriptor>>, ContractError> {
    let mut flattened = HashMap::with_capacity(structs.len());

    for s in structs.values() {
        let mut fields: Vec<FieldDescriptor> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = s;

        loop {
            if !visited.insert(current.name.as_str()) {
                return Err(ContractError::ExtendsCycle {
                    name: s.name.clone(),
                });
            }
            for field in &current.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(ContractError::DuplicateField {
                        name: s.name.clone(),
                        field: field.name.clone(),
                    });
                }
                fields.push(field.clone());
            }
            match &current.extends {
                Some(parent) => {
                    current = structs.get(parent).ok_or_else(|| {
                        ContractError::UnknownParent {
                            name: current.name.clone(),
                            parent: parent.clone(),
                        }
                    })?;
                }
                None => break,
            }
        }

        flattened.insert(s.name.clone(), fields);
    }

    Ok(flattened)
}
