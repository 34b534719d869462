//! Prop interface inference.
//!
//! Derives a typed prop contract for a component from the runtime values of
//! its top-level element's props.

use crate::naming::BindingNamer;
use weft_core::{Diagnostic, Element, Framework, PropValue};

/// Binding names of the synthetic props.
pub const CLASS_NAME_BINDING: &str = "className";
pub const STYLE_BINDING: &str = "style";
pub const CHILDREN_BINDING: &str = "children";

/// Inferred type of a prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropType {
    String,
    Number,
    Boolean,
    /// Widened: the value was not a scalar.
    Dynamic,
    /// Framework-native class type.
    ClassName,
    /// Framework-native style type.
    Style,
    /// Framework-native child content type.
    Children,
}

impl PropType {
    /// Type of a runtime value.
    pub fn of(value: &PropValue) -> Self {
        match value {
            PropValue::String(_) => PropType::String,
            PropValue::Number(_) => PropType::Number,
            PropValue::Boolean(_) => PropType::Boolean,
            PropValue::Structured(_) => PropType::Dynamic,
        }
    }

    /// TypeScript spelling for a framework.
    pub fn typescript(&self, framework: Framework) -> &'static str {
        match (self, framework) {
            (PropType::String, _) | (PropType::ClassName, _) => "string",
            (PropType::Number, _) => "number",
            (PropType::Boolean, _) => "boolean",
            (PropType::Dynamic, _) => "any",
            (PropType::Style, Framework::React) => "React.CSSProperties",
            (PropType::Style, Framework::Vue) => "StyleValue",
            (PropType::Style, Framework::Angular) => "Record<string, string>",
            (PropType::Style, _) => "string",
            (PropType::Children, Framework::React) => "React.ReactNode",
            (PropType::Children, Framework::Svelte) => "Snippet",
            (PropType::Children, _) => "unknown",
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, PropType::ClassName | PropType::Style | PropType::Children)
    }
}

/// One entry of a prop interface.
#[derive(Debug, Clone, PartialEq)]
pub struct InferredProp {
    /// Authored prop key; equals the binding for synthetic props.
    pub name: String,
    /// Identifier used in emitted code.
    pub binding: String,
    pub ty: PropType,
    pub optional: bool,
    /// Authored value, used as the default.
    pub default: Option<PropValue>,
}

/// Ordered prop contract of a component: authored props in editor order,
/// then `className`, `style` and (when supported) `children`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropInterface {
    pub props: Vec<InferredProp>,
}

impl PropInterface {
    /// Binding name for an authored prop key.
    pub fn binding_for(&self, key: &str) -> Option<&str> {
        self.props
            .iter()
            .find(|p| !p.ty.is_synthetic() && p.name == key)
            .map(|p| p.binding.as_str())
    }

    /// Authored (non-synthetic) props.
    pub fn authored(&self) -> impl Iterator<Item = &InferredProp> {
        self.props.iter().filter(|p| !p.ty.is_synthetic())
    }

    pub fn has(&self, ty: PropType) -> bool {
        self.props.iter().any(|p| p.ty == ty)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

/// Infers prop interfaces for one framework.
#[derive(Debug, Clone, Copy)]
pub struct PropInferencer {
    framework: Framework,
    typescript: bool,
}

impl PropInferencer {
    pub fn new(framework: Framework, typescript: bool) -> Self {
        Self {
            framework,
            typescript,
        }
    }

    /// Infer the interface of `element`. Widening a non-scalar prop records a
    /// diagnostic when emitting TypeScript.
    pub fn infer(&self, element: &Element, diagnostics: &mut Vec<Diagnostic>) -> PropInterface {
        let mut namer =
            BindingNamer::with_reserved(&[CLASS_NAME_BINDING, STYLE_BINDING, CHILDREN_BINDING]);
        let mut props = Vec::new();

        for (key, value) in element.semantic_props() {
            let ty = PropType::of(value);
            if ty == PropType::Dynamic && self.typescript {
                diagnostics.push(Diagnostic::dynamic_prop(&element.id, key));
            }
            props.push(InferredProp {
                name: key.to_string(),
                binding: namer.allocate(key),
                ty,
                optional: true,
                default: Some(value.clone()),
            });
        }

        if self.framework.has_components() {
            props.push(synthetic(CLASS_NAME_BINDING, PropType::ClassName));
            props.push(synthetic(STYLE_BINDING, PropType::Style));
            if element.has_children() && self.framework.has_children_prop() {
                props.push(synthetic(CHILDREN_BINDING, PropType::Children));
            }
        }

        PropInterface { props }
    }
}

fn synthetic(name: &str, ty: PropType) -> InferredProp {
    InferredProp {
        name: name.to_string(),
        binding: name.to_string(),
        ty,
        optional: true,
        default: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::DiagnosticKind;

    fn sample() -> Element {
        Element::new("card-1", "productCard")
            .with_prop("className", "p-4")
            .with_prop("title", "Shoes")
            .with_prop("price", 49.5)
            .with_prop("inStock", true)
            .with_prop("tags", serde_json::json!(["new"]))
            .with_child(Element::new("card-1-title", "heading"))
    }

    #[test]
    fn test_scalar_types() {
        let mut diags = Vec::new();
        let iface = PropInferencer::new(Framework::React, true).infer(&sample(), &mut diags);

        let types: Vec<(&str, PropType)> =
            iface.props.iter().map(|p| (p.name.as_str(), p.ty)).collect();
        assert_eq!(
            types,
            vec![
                ("title", PropType::String),
                ("price", PropType::Number),
                ("inStock", PropType::Boolean),
                ("tags", PropType::Dynamic),
                ("className", PropType::ClassName),
                ("style", PropType::Style),
                ("children", PropType::Children),
            ]
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::DynamicProp);
    }

    #[test]
    fn test_no_diagnostic_without_typescript() {
        let mut diags = Vec::new();
        PropInferencer::new(Framework::Vue, false).infer(&sample(), &mut diags);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_angular_has_no_children_prop() {
        let mut diags = Vec::new();
        let iface = PropInferencer::new(Framework::Angular, true).infer(&sample(), &mut diags);
        assert!(!iface.has(PropType::Children));
        assert!(iface.has(PropType::Style));
    }

    #[test]
    fn test_html_has_no_synthetic_props() {
        let mut diags = Vec::new();
        let iface = PropInferencer::new(Framework::Html, false).infer(&sample(), &mut diags);
        assert!(iface.props.iter().all(|p| !p.ty.is_synthetic()));
    }

    #[test]
    fn test_non_identifier_keys_get_bindings() {
        let element = Element::new("x", "link").with_prop("aria-label", "Home");
        let iface = PropInferencer::new(Framework::React, true).infer(&element, &mut Vec::new());
        assert_eq!(iface.binding_for("aria-label"), Some("ariaLabel"));
    }
}
