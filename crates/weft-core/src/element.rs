//! The canonical element tree.
//!
//! Elements are produced by the editor and are read-only as far as code
//! generation is concerned. Each element owns its children, so the tree can
//! never contain shared nodes or cycles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Prop key holding utility classes authored on the element.
pub const CLASS_NAME_PROP: &str = "className";
/// Prop key reserved for inline style; the authoritative style lives in [`Element::style`].
pub const STYLE_PROP: &str = "style";
/// Prop key holding the element's text content.
pub const TEXT_PROP: &str = "text";

/// Keys that collide with the structural parts of a component (its class
/// attribute and child slot). They are never emitted as props.
pub const RESERVED_PROPS: &[&str] = &["class", "children"];

/// Stable element identifier assigned by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        ElementId(s.to_string())
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        ElementId(s)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique across the whole tree.
    pub id: ElementId,
    /// Abstract component kind, e.g. `heading` or `productCard`.
    #[serde(alias = "type")]
    pub kind: String,
    /// Authored props in editor order.
    #[serde(default)]
    pub props: IndexMap<String, PropValue>,
    /// Inline style, CSS property name to value.
    #[serde(default)]
    pub style: IndexMap<String, String>,
    /// Owned children in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with no props, style or children.
    pub fn new(id: impl Into<ElementId>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            props: IndexMap::new(),
            style: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Add a prop.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Add a style declaration.
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    /// Add a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Get a prop value.
    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    /// Authored utility classes, if any.
    pub fn class_name(&self) -> Option<&str> {
        self.props.get(CLASS_NAME_PROP).and_then(PropValue::as_str)
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&PropValue> {
        self.props.get(TEXT_PROP)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Props other than `className`, `style` and the reserved keys.
    pub fn semantic_props(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.props
            .iter()
            .filter(|(k, _)| {
                k.as_str() != CLASS_NAME_PROP
                    && k.as_str() != STYLE_PROP
                    && !RESERVED_PROPS.contains(&k.as_str())
            })
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Authored keys from [`RESERVED_PROPS`], in editor order.
    pub fn reserved_props(&self) -> impl Iterator<Item = &str> {
        self.props
            .keys()
            .map(String::as_str)
            .filter(|k| RESERVED_PROPS.contains(k))
    }

    /// Number of elements in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        self.walk().count()
    }

    /// Depth of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((element, depth)) = stack.pop() {
            max = max.max(depth);
            for child in &element.children {
                stack.push((child, depth + 1));
            }
        }
        max
    }

    /// Pre-order traversal of this subtree.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order iterator over an element subtree.
pub struct Walk<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// A runtime prop value.
///
/// Scalars are kept distinct so the inferencer can type them; anything else
/// (objects, arrays, null) is carried as structured JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Structured(serde_json::Value),
}

impl PropValue {
    /// Get as string if it's a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as number if it's a number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as boolean if it's a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, PropValue::Structured(_))
    }

    /// Plain-text rendering used where markup needs a literal (static HTML).
    pub fn to_plain_text(&self) -> String {
        match self {
            PropValue::String(s) => s.clone(),
            PropValue::Number(n) => format_number(*n),
            PropValue::Boolean(b) => b.to_string(),
            PropValue::Structured(v) => v.to_string(),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::String(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Number(f64::from(n))
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Boolean(b)
    }
}

impl From<serde_json::Value> for PropValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => PropValue::String(s),
            serde_json::Value::Bool(b) => PropValue::Boolean(b),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => PropValue::Number(f),
                None => PropValue::Structured(serde_json::Value::Number(n)),
            },
            other => PropValue::Structured(other),
        }
    }
}

/// Format a number the way JavaScript prints it: integers without a fraction.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else if n.is_finite() {
        n.to_string()
    } else {
        "null".to_string()
    }
}
