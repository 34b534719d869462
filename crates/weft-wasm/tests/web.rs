//! Browser tests for the JS bindings. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use weft_wasm::WeftEngine;

wasm_bindgen_test_configure!(run_in_browser);

fn js(value: serde_json::Value) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

fn json(value: &JsValue) -> serde_json::Value {
    serde_wasm_bindgen::from_value(value.clone()).unwrap()
}

#[wasm_bindgen_test]
fn generate_with_default_config() {
    let engine = WeftEngine::new();
    let elements = js(serde_json::json!([
        { "id": "t", "kind": "heading", "props": { "text": "Hello" } }
    ]));

    let result = json(&engine.generate(elements, JsValue::UNDEFINED).unwrap());
    assert_eq!(result["project"]["framework"], "react");
    assert!(result["diagnostics"].as_array().unwrap().is_empty());
    assert_eq!(engine.cache_size(), 1);
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected() {
    let engine = WeftEngine::new();
    let config = js(serde_json::json!({ "framework": "angular", "typescript": false }));
    assert!(engine.generate(js(serde_json::json!([])), config).is_err());
}

#[wasm_bindgen_test]
fn fragment_carries_diagnostics() {
    let engine = WeftEngine::new();
    let element = js(serde_json::json!({ "id": "x", "kind": "hologram", "props": { "text": "Hi" } }));
    let config = js(serde_json::json!({ "framework": "html" }));

    let fragment = json(&engine.emit_fragment(element, config).unwrap());
    assert_eq!(fragment["markup"], "<div>Hi</div>");
    assert_eq!(fragment["diagnostics"][0]["kind"], "unknown-kind");
}
