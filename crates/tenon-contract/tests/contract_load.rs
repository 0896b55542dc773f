//! Integration tests: loading a realistic IDL document end to end.

use serde_json::json;
use tenon_contract::{Contract, TypeDef, ValidationPolicy, Validator};
use tenon_types::TypeDescriptor;

/// A contract exercising every element kind: enums, plain structs, an
/// extends chain, and an interface mixing primitive and composite types.
fn user_service_document() -> serde_json::Value {
    json!([
        {"type": "comment", "value": "user management service"},
        {"type": "enum", "name": "UserStatus",
         "values": [{"value": "active"}, {"value": "inactive"}, {"value": "banned"}]},
        {"type": "struct", "name": "Entity", "fields": [
            {"name": "id", "type": "int"}
        ]},
        {"type": "struct", "name": "User", "extends": "Entity", "fields": [
            {"name": "name", "type": "string"},
            {"name": "status", "type": "UserStatus"},
            {"name": "email", "type": "string", "optional": true},
            {"name": "roles", "type": "string", "is_array": true}
        ]},
        {"type": "interface", "name": "UserService", "functions": [
            {"name": "get",
             "params": [{"name": "id", "type": "int"}],
             "returns": {"type": "User"}},
            {"name": "find",
             "params": [{"name": "status", "type": "UserStatus"}],
             "returns": {"type": "User", "is_array": true}},
            {"name": "count", "params": [], "returns": {"type": "int"}}
        ]}
    ])
}

#[test]
fn loads_from_bytes() {
    let bytes = serde_json::to_vec(&user_service_document()).expect("ser");
    let contract = Contract::from_slice(&bytes).expect("load");
    assert!(contract.interface("UserService").is_some());
}

#[test]
fn loads_from_str() {
    let text = serde_json::to_string(&user_service_document()).expect("ser");
    let contract = Contract::from_str(&text).expect("load");
    assert!(contract.method("UserService.count").is_some());
}

#[test]
fn malformed_json_fails_load() {
    assert!(Contract::from_slice(b"{not json").is_err());
    assert!(Contract::from_str("[{\"type\":").is_err());
}

#[test]
fn method_lookup_uses_wire_names() {
    let contract = Contract::from_value(user_service_document()).expect("load");
    let get = contract.method("UserService.get").expect("method");
    assert_eq!(get.params.len(), 1);
    assert_eq!(get.returns, TypeDescriptor::Ref("User".into()));

    let find = contract.method("UserService.find").expect("method");
    assert_eq!(
        find.returns,
        TypeDescriptor::Ref("User".into()).array()
    );

    assert!(contract.method("UserService.delete").is_none());
    assert!(contract.method("get").is_none());
}

#[test]
fn resolve_distinguishes_structs_from_enums() {
    let contract = Contract::from_value(user_service_document()).expect("load");
    match contract.resolve("User") {
        Some(TypeDef::Struct(s)) => assert_eq!(s.extends.as_deref(), Some("Entity")),
        other => panic!("unexpected: {other:?}"),
    }
    match contract.resolve("UserStatus") {
        Some(TypeDef::Enum(e)) => assert_eq!(e.values.len(), 3),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn inherited_fields_participate_in_validation() {
    let contract = Contract::from_value(user_service_document()).expect("load");
    let validator = Validator::new(&contract);
    let ty = TypeDescriptor::Ref("User".into());

    // `id` comes from Entity via extends.
    let complete = json!({"id": 9, "name": "Ada", "status": "active", "roles": []});
    assert!(validator.validate(&ty, &complete, "user").is_ok());

    let missing_inherited = json!({"name": "Ada", "status": "active", "roles": []});
    let err = validator
        .validate(&ty, &missing_inherited, "user")
        .unwrap_err();
    assert_eq!(err.path(), "user.id");
}

#[test]
fn full_method_signature_validates() {
    let contract = Contract::from_value(user_service_document()).expect("load");
    let validator = Validator::with_policy(&contract, ValidationPolicy::default());
    let find = contract.method("UserService.find").expect("method");

    assert!(validator
        .validate(&find.params[0].ty, &json!("banned"), "status")
        .is_ok());
    let users = json!([
        {"id": 1, "name": "Ada", "status": "active", "roles": ["admin"]},
        {"id": 2, "name": "Bob", "status": "inactive", "roles": []}
    ]);
    assert!(validator.validate(&find.returns, &users, "result").is_ok());
}

#[test]
fn document_survives_for_introspection() {
    let doc = user_service_document();
    let contract = Contract::from_value(doc.clone()).expect("load");
    // The comment element is preserved even though the index skips it.
    assert_eq!(contract.document(), &doc);
}
