//! WebAssembly bindings for the Weft code generation engine.
//!
//! This crate exposes the engine to the visual editor running in the browser.
//! Element trees and configs go in as plain JS objects (or JSON strings) and
//! the generated project comes back the same way.
//!
//! ## Example
//!
//! ```js
//! import { WeftEngine } from 'weft-engine';
//!
//! const engine = new WeftEngine();
//!
//! const { project, diagnostics } = engine.generate(
//!   [{ id: 'hero-title', kind: 'heading', props: { text: 'Hello' } }],
//!   { framework: 'vue', typescript: true, features: ['routing'] },
//! );
//!
//! for (const file of project.files) {
//!   zip.file(file.path, file.content);
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use weft_codegen::{
    config_problems, CodegenError, GenerationCache, GeneratorRegistry,
};
use weft_core::{Diagnostic, Element, GenerationConfig};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// Errors raised at the JS boundary.
#[derive(Error, Debug)]
pub enum BindingError {
    #[error("Invalid request: {0}")]
    Request(#[from] serde_json::Error),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

/// A generation request as sent by the editor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    elements: Vec<Element>,
    #[serde(default)]
    config: GenerationConfig,
}

/// A preview fragment and what was noticed while emitting it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Fragment {
    markup: String,
    diagnostics: Vec<Diagnostic>,
}

/// The main Weft engine interface for JavaScript.
#[wasm_bindgen]
pub struct WeftEngine {
    registry: GeneratorRegistry,
    cache: GenerationCache,
}

#[wasm_bindgen]
impl WeftEngine {
    /// Create a new engine with every backend registered.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            registry: GeneratorRegistry::new(),
            cache: GenerationCache::new(),
        }
    }

    /// Get the version of the engine.
    #[wasm_bindgen(js_name = version)]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Generate a project from an element array and a config object.
    ///
    /// Returns `{ project, diagnostics }`. Identical requests are served from
    /// the engine's cache.
    #[wasm_bindgen]
    pub fn generate(&self, elements: JsValue, config: JsValue) -> Result<JsValue, JsError> {
        let elements: Vec<Element> = serde_wasm_bindgen::from_value(elements)
            .map_err(|e| JsError::new(&format!("Invalid element tree: {}", e)))?;
        let config: GenerationConfig = if config.is_undefined() || config.is_null() {
            GenerationConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?
        };

        let generation = self.cache.get_or_generate(&self.registry, &elements, &config)?;
        to_js(generation.as_ref())
    }

    /// Generate from a JSON request `{ elements, config }`, returning JSON.
    #[wasm_bindgen(js_name = generateFromString)]
    pub fn generate_from_string(&self, request: &str) -> Result<String, JsError> {
        Ok(self.generate_json(request)?)
    }

    /// Every invalid pair in a config, as messages. Empty when valid.
    #[wasm_bindgen(js_name = validateConfig)]
    pub fn validate_config(&self, config: JsValue) -> Result<Vec<String>, JsError> {
        let config: GenerationConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
        Ok(problems(&config))
    }

    /// Markup for one element with literal values, for the preview pane.
    ///
    /// Returns `{ markup, diagnostics }`.
    #[wasm_bindgen(js_name = emitFragment)]
    pub fn emit_fragment(&self, element: JsValue, config: JsValue) -> Result<JsValue, JsError> {
        let element: Element = serde_wasm_bindgen::from_value(element)
            .map_err(|e| JsError::new(&format!("Invalid element: {}", e)))?;
        let config: GenerationConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;

        to_js(&self.fragment(&element, &config)?)
    }

    /// Frameworks this build can target.
    #[wasm_bindgen(js_name = supportedFrameworks)]
    pub fn supported_frameworks(&self) -> Vec<String> {
        self.registry
            .frameworks()
            .into_iter()
            .map(|f| f.as_str().to_string())
            .collect()
    }

    /// Drop every cached generation.
    #[wasm_bindgen(js_name = clearCache)]
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached generations.
    #[wasm_bindgen(js_name = cacheSize)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl WeftEngine {
    fn generate_json(&self, request: &str) -> Result<String, BindingError> {
        let request: GenerateRequest = serde_json::from_str(request)?;
        let generation =
            self.cache
                .get_or_generate(&self.registry, &request.elements, &request.config)?;
        Ok(serde_json::to_string(generation.as_ref())?)
    }

    fn fragment(&self, element: &Element, config: &GenerationConfig) -> Result<Fragment, BindingError> {
        let (markup, diagnostics) = self.registry.emit_fragment(element, config, 0)?;
        Ok(Fragment { markup, diagnostics })
    }
}

impl Default for WeftEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn problems(config: &GenerationConfig) -> Vec<String> {
    config_problems(config).iter().map(|p| p.to_string()).collect()
}

/// Serialize with plain objects for maps, as the editor expects.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Standalone function to generate a project without keeping an engine.
#[wasm_bindgen(js_name = generateProject)]
pub fn generate_project(elements: JsValue, config: JsValue) -> Result<JsValue, JsError> {
    WeftEngine::new().generate(elements, config)
}

/// Get the engine version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = r#"{
        "elements": [{ "id": "t", "kind": "heading", "props": { "text": "Hello" } }],
        "config": { "framework": "svelte" }
    }"#;

    #[test]
    fn test_engine_new() {
        let engine = WeftEngine::new();
        assert_eq!(engine.cache_size(), 0);
        assert_eq!(engine.supported_frameworks(), vec!["react", "vue", "angular", "svelte", "html"]);
    }

    #[test]
    fn test_generate_json() {
        let engine = WeftEngine::new();
        let output = engine.generate_json(REQUEST).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["project"]["framework"], "svelte");
        let paths: Vec<&str> = value["project"]["files"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["path"].as_str())
            .collect();
        assert!(paths.contains(&"src/components/HeadingComponent.svelte"));
        assert_eq!(engine.cache_size(), 1);

        engine.generate_json(REQUEST).unwrap();
        assert_eq!(engine.cache_size(), 1);
        engine.clear_cache();
        assert_eq!(engine.cache_size(), 0);
    }

    #[test]
    fn test_generate_json_errors() {
        let engine = WeftEngine::new();
        assert!(matches!(
            engine.generate_json("{ not json"),
            Err(BindingError::Request(_))
        ));

        let invalid = r#"{ "elements": [], "config": { "framework": "angular", "typescript": false } }"#;
        match engine.generate_json(invalid) {
            Err(BindingError::Codegen(err)) => assert!(err.is_input_error()),
            other => panic!("expected a validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_problems_lists_every_pair() {
        let config: GenerationConfig = serde_json::from_str(
            r#"{ "framework": "html", "bundler": "webpack", "features": ["routing"] }"#,
        )
        .unwrap();
        assert_eq!(problems(&config).len(), 2);
        assert!(problems(&GenerationConfig::default()).is_empty());
    }

    #[test]
    fn test_fragment_keeps_diagnostics() {
        let engine = WeftEngine::new();
        let element = Element::new("x", "hologram").with_prop("text", "Hi");
        let config = GenerationConfig::for_framework(weft_core::Framework::Html);
        let fragment = engine.fragment(&element, &config).unwrap();
        assert_eq!(fragment.markup, "<div>Hi</div>");
        assert_eq!(fragment.diagnostics.len(), 1);

        let value = serde_json::to_value(&fragment).unwrap();
        assert_eq!(value["diagnostics"][0]["elementId"], "x");
        assert_eq!(value["diagnostics"][0]["kind"], "unknown-kind");
    }

    #[test]
    fn test_version() {
        let version = WeftEngine::version();
        assert!(!version.is_empty());
    }
}
