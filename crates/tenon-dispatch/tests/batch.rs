//! Batch semantics: independence, order preservation, and id echoing.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use tenon_contract::Contract;
use tenon_dispatch::{Dispatcher, Fault, HandlerRegistry, InterfaceHandler};

fn echo_document() -> Value {
    json!([
        {"type": "interface", "name": "Echo", "functions": [
            {"name": "say",
             "params": [{"name": "text", "type": "string"}],
             "returns": {"type": "string"}}
        ]}
    ])
}

struct EchoHandler;

#[async_trait]
impl InterfaceHandler for EchoHandler {
    fn methods(&self) -> Vec<String> {
        vec!["say".into()]
    }
    async fn call(&self, _method: &str, mut params: Vec<Value>) -> Result<Value, Fault> {
        Ok(params.remove(0))
    }
}

fn dispatcher() -> Dispatcher {
    let contract = Arc::new(Contract::from_value(echo_document()).expect("contract"));
    let mut registry = HandlerRegistry::new();
    registry
        .register(&contract, "Echo", Arc::new(EchoHandler))
        .expect("register");
    Dispatcher::new(contract, registry)
}

fn say(id: i64, text: &str) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "method": "Echo.say", "params": [text]})
}

#[tokio::test]
async fn batch_preserves_order_and_ids_around_malformed_items() {
    let d = dispatcher();
    let batch = json!([
        say(1, "one"),
        // Malformed: no method at all, but the id is recoverable.
        {"jsonrpc": "2.0", "id": 2},
        say(3, "three"),
        // Malformed with no usable id at all.
        {"bogus": true},
        say(5, "five"),
    ]);

    let out = d.handle_value(batch).await;
    let replies = out.as_array().expect("array out");
    assert_eq!(replies.len(), 5);

    assert_eq!(replies[0]["result"], json!("one"));
    assert_eq!(replies[0]["id"], json!(1));

    assert_eq!(replies[1]["error"]["code"], json!(-32600));
    assert_eq!(replies[1]["id"], json!(2));

    assert_eq!(replies[2]["result"], json!("three"));
    assert_eq!(replies[2]["id"], json!(3));

    assert_eq!(replies[3]["error"]["code"], json!(-32600));
    assert_eq!(replies[3]["id"], Value::Null);

    assert_eq!(replies[4]["result"], json!("five"));
    assert_eq!(replies[4]["id"], json!(5));
}

#[tokio::test]
async fn one_failing_item_does_not_taint_siblings() {
    let d = dispatcher();
    let batch = json!([
        say(1, "ok"),
        {"jsonrpc": "2.0", "id": 2, "method": "Echo.say", "params": [42]},
        say(3, "still ok"),
    ]);

    let out = d.handle_value(batch).await;
    let replies = out.as_array().expect("array out");
    assert_eq!(replies[0]["result"], json!("ok"));
    assert_eq!(replies[1]["error"]["code"], json!(-32602));
    assert_eq!(replies[2]["result"], json!("still ok"));
}

#[tokio::test]
async fn empty_batch_is_invalid_request() {
    let d = dispatcher();
    let out = d.handle_value(json!([])).await;
    // A single error object, not an array.
    assert!(out.is_object());
    assert_eq!(out["error"]["code"], json!(-32600));
}

#[tokio::test]
async fn response_shape_mirrors_request_shape() {
    let d = dispatcher();

    let single = d.handle_value(say(1, "hi")).await;
    assert!(single.is_object());

    let batched = d.handle_value(json!([say(1, "hi")])).await;
    let replies = batched.as_array().expect("array out");
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["result"], json!("hi"));
}

#[tokio::test]
async fn batch_over_bytes_round_trips() {
    let d = dispatcher();
    let body = serde_json::to_vec(&json!([say(10, "a"), say(20, "b")])).expect("ser");
    let bytes = d.handle_bytes(&body).await;
    let out: Value = serde_json::from_slice(&bytes).expect("de");
    let replies = out.as_array().expect("array out");
    assert_eq!(replies[0]["id"], json!(10));
    assert_eq!(replies[1]["id"], json!(20));
}

#[tokio::test]
async fn string_ids_survive_batch_correlation() {
    let d = dispatcher();
    let batch = json!([
        {"jsonrpc": "2.0", "id": "a", "method": "Echo.say", "params": ["first"]},
        {"jsonrpc": "2.0", "id": "b", "method": "Echo.say", "params": ["second"]},
    ]);
    let out = d.handle_value(batch).await;
    let replies = out.as_array().expect("array out");
    assert_eq!(replies[0]["id"], json!("a"));
    assert_eq!(replies[1]["id"], json!("b"));
}
