//! Property-based tests for JSON-RPC deserialization.
//!
//! Ensures the parser never panics on arbitrary JSON and that valid
//! requests successfully round-trip through serde.

use proptest::prelude::*;
use tenon_protocol::jsonrpc::{JsonRpcReply, JsonRpcRequest};

proptest! {
    /// Arbitrary JSON strings never cause a panic.
    #[test]
    fn no_panic_on_arbitrary_json(input in "\\PC{0,256}") {
        let _ = serde_json::from_str::<JsonRpcRequest>(&input);
        let _ = serde_json::from_str::<JsonRpcReply>(&input);
    }

    /// Well-formed JSON-RPC requests round-trip through serde.
    #[test]
    fn valid_request_roundtrips(
        method in "[A-Za-z]{1,16}\\.[a-z]{1,16}",
        id in any::<i64>(),
    ) {
        let json = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": [],
        });
        let parsed: Result<JsonRpcRequest, _> = serde_json::from_value(json);
        prop_assert!(parsed.is_ok(), "rejected valid request");

        let req = parsed.expect("test: already checked");
        let serialized = serde_json::to_string(&req);
        prop_assert!(serialized.is_ok());

        let reparsed: Result<JsonRpcRequest, _> =
            serde_json::from_str(&serialized.expect("test: already checked"));
        prop_assert!(reparsed.is_ok());
    }

    /// String ids survive the round trip unchanged.
    #[test]
    fn string_id_roundtrips(id in "[A-Za-z0-9]{1,20}") {
        let json = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "Calculator.add",
        });
        let req: JsonRpcRequest = serde_json::from_value(json).expect("de");
        let s = serde_json::to_string(&req).expect("ser");
        let needle = format!("\"id\":\"{}\"", id);
        prop_assert!(s.contains(&needle));
    }

    /// Missing "jsonrpc" field reads as version 2.0.
    #[test]
    fn missing_jsonrpc_field_defaults(method in "[a-z]{2,16}", id in 1i64..1000) {
        let json = format!(r#"{{"id":{id},"method":"{method}"}}"#);
        let req = serde_json::from_str::<JsonRpcRequest>(&json).expect("de");
        prop_assert_eq!(req.jsonrpc, "2.0");
    }

    /// Missing "method" field causes parse failure.
    #[test]
    fn missing_method_field_fails(id in 1i64..1000) {
        let json = format!(r#"{{"jsonrpc":"2.0","id":{id}}}"#);
        let result = serde_json::from_str::<JsonRpcRequest>(&json);
        prop_assert!(result.is_err());
    }

    /// Missing "id" field causes parse failure.
    #[test]
    fn missing_id_field_fails(method in "[a-z]{2,16}") {
        let json = format!(r#"{{"jsonrpc":"2.0","method":"{method}"}}"#);
        let result = serde_json::from_str::<JsonRpcRequest>(&json);
        prop_assert!(result.is_err());
    }
}
