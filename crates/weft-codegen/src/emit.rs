//! Per-element emission.
//!
//! [`emit_element`] lowers one element and its subtree into markup. The
//! steps are shared by every backend; what differs between frameworks
//! (attribute binding syntax, literal quoting, class and style merging, child
//! slots) comes from the backend's [`Markup`] implementation.
//!
//! Style precedence: on a component's top-level element the inline style is
//! the caller's `style` prop merged with the authored style, caller first, so
//! the authored declarations win on conflicting keys.

use crate::infer::{PropInterface, PropType};
use crate::responsive::ResponsiveRules;
use crate::tags::{TagLookup, TagTable, TargetPrimitive};
use convert_case::{Case, Casing};
use indexmap::IndexMap;
use std::borrow::Cow;
use weft_core::{Diagnostic, Element, GenerationConfig, PropValue, StylingStrategy, TEXT_PROP};

/// Indentation unit of emitted code.
pub const INDENT: &str = "  ";

pub fn pad(level: usize) -> String {
    INDENT.repeat(level)
}

/// How an element's props are referenced.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    /// Top-level element of a component: props are bound to the interface.
    Component(&'a PropInterface),
    /// Anything below it: authored values are emitted as literals.
    Nested,
}

/// Shared state for one generation: config, lookup tables and diagnostics.
pub struct EmitContext<'a> {
    pub config: &'a GenerationConfig,
    tags: TagTable,
    rules: &'a ResponsiveRules,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> EmitContext<'a> {
    pub fn new(config: &'a GenerationConfig, tags: TagTable, rules: &'a ResponsiveRules) -> Self {
        Self {
            config,
            tags,
            rules,
            diagnostics: Vec::new(),
        }
    }

    /// Resolve the primitive for an element, recording a diagnostic on fallback.
    pub fn primitive(&mut self, element: &Element) -> TargetPrimitive {
        let lookup = self.tags.lookup(&element.kind);
        if !lookup.known {
            self.diagnose(Diagnostic::unknown_kind(
                &element.id,
                &element.kind,
                &lookup.primitive.tag,
            ));
        }
        lookup.primitive
    }

    /// Look up a kind without recording anything.
    pub fn lookup(&self, kind: &str) -> TagLookup {
        self.tags.lookup(kind)
    }

    /// Authored classes after the responsive rewrite (utility classes only).
    pub fn classes(&self, element: &Element) -> Option<String> {
        let raw = element.class_name()?;
        let classes = if self.config.styling_strategy == StylingStrategy::UtilityClasses {
            self.rules.rewrite(raw)
        } else {
            raw.split_whitespace().collect::<Vec<_>>().join(" ")
        };
        (!classes.is_empty()).then_some(classes)
    }

    pub fn diagnose(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(kind = ?diagnostic.kind, "{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Vec<Diagnostic> {
        &mut self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Template grammar of a target framework.
pub trait Markup {
    /// Attribute carrying a literal string.
    fn literal_attr(&self, name: &str, value: &str) -> String {
        format!("{}=\"{}\"", name, escape_attr(value))
    }

    /// Attribute bound to an expression.
    fn bound_attr(&self, name: &str, expr: &str) -> String;

    /// Attribute bound to a component prop.
    fn prop_attr(&self, name: &str, binding: &str, _ty: PropType) -> String {
        self.bound_attr(name, binding)
    }

    /// Attribute carrying an authored value on a nested element.
    fn value_attr(&self, name: &str, value: &PropValue) -> Option<String> {
        Some(match value {
            PropValue::String(s) => self.literal_attr(name, s),
            other => self.bound_attr(name, &self.expr_literal(other)),
        })
    }

    /// Attribute name as the grammar spells it.
    fn attr_name<'n>(&self, name: &'n str) -> Cow<'n, str> {
        Cow::Borrowed(name)
    }

    /// Expression literal for a value.
    fn expr_literal(&self, value: &PropValue) -> String;

    /// Text node bound to an expression.
    fn text_binding(&self, expr: &str) -> String;

    /// Text node for an authored value on a nested element.
    fn text_literal(&self, value: &PropValue) -> String {
        self.text_binding(&self.expr_literal(value))
    }

    /// Class attribute. On a component's top-level element the authored
    /// classes are concatenated with the caller's `className`.
    fn class_attr(&self, authored: Option<&str>, scope: Scope<'_>) -> Option<String>;

    /// Inline style attribute; see the module docs for precedence.
    fn style_attr(&self, style: &IndexMap<String, String>, scope: Scope<'_>) -> Option<String>;

    /// Slot where caller-provided children render.
    fn child_slot(&self) -> Option<&'static str>;

    /// Closing of a void element.
    fn void_close(&self) -> &'static str {
        " />"
    }
}

/// Emit an element subtree at `indent`.
pub fn emit_element<M: Markup + ?Sized>(
    markup: &M,
    ctx: &mut EmitContext<'_>,
    element: &Element,
    scope: Scope<'_>,
    indent: usize,
) -> String {
    let primitive = ctx.primitive(element);
    let tag = primitive.tag.as_str();
    let spaces = pad(indent);

    for key in element.reserved_props() {
        ctx.diagnose(Diagnostic::reserved_prop(&element.id, key));
    }

    let mut attrs: Vec<String> = Vec::new();
    if primitive.renders_element() {
        let classes = ctx.classes(element);
        attrs.extend(markup.class_attr(classes.as_deref(), scope));
        attrs.extend(markup.style_attr(&element.style, scope));

        for (name, value) in &primitive.attrs {
            if !element.props.contains_key(name) {
                attrs.push(markup.literal_attr(name, value));
            }
        }

        for (key, value) in element.semantic_props() {
            if key == TEXT_PROP {
                continue;
            }
            if !is_attr_name(key) {
                ctx.diagnose(Diagnostic::invalid_attribute(&element.id, key));
                continue;
            }
            let name = markup.attr_name(key);
            let attr = match scope {
                Scope::Component(iface) => iface
                    .binding_for(key)
                    .map(|binding| markup.prop_attr(&name, binding, PropType::of(value))),
                Scope::Nested => markup.value_attr(&name, value),
            };
            attrs.extend(attr);
        }
    }

    let open = if attrs.is_empty() {
        format!("<{}", tag)
    } else {
        format!("<{} {}", tag, attrs.join(" "))
    };

    if primitive.void {
        if element.text().is_some() || element.has_children() {
            ctx.diagnose(Diagnostic::void_content(&element.id, tag));
        }
        return format!("{}{}{}", spaces, open, markup.void_close());
    }

    let text = element.text().map(|value| match scope {
        Scope::Component(iface) => iface
            .binding_for(TEXT_PROP)
            .map(|binding| markup.text_binding(binding))
            .unwrap_or_else(|| markup.text_literal(value)),
        Scope::Nested => markup.text_literal(value),
    });
    let slot = match scope {
        Scope::Component(_) if element.has_children() => markup.child_slot(),
        _ => None,
    };

    if !element.has_children() && slot.is_none() {
        return format!(
            "{}{}>{}</{}>",
            spaces,
            open,
            text.unwrap_or_default(),
            tag
        );
    }

    let inner = pad(indent + 1);
    let mut lines = vec![format!("{}{}>", spaces, open)];
    if let Some(text) = text {
        lines.push(format!("{}{}", inner, text));
    }
    for child in &element.children {
        lines.push(emit_element(markup, ctx, child, Scope::Nested, indent + 1));
    }
    if let Some(slot) = slot {
        lines.push(format!("{}{}", inner, slot));
    }
    lines.push(format!("{}</{}>", spaces, tag));
    lines.join("\n")
}

/// Attribute names we are willing to emit.
pub fn is_attr_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '@' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.' | '@'))
}

/// CSS property name in kebab-case.
pub fn css_property(name: &str) -> String {
    if name.starts_with("--") || name.contains('-') {
        return name.to_string();
    }
    let kebab = name.to_case(Case::Kebab);
    if name.starts_with(|c: char| c.is_ascii_uppercase()) || name.starts_with("ms") && kebab.starts_with("ms-") {
        format!("-{}", kebab)
    } else {
        kebab
    }
}

/// CSS property name as a React style object key (unquoted when possible).
pub fn react_style_key(name: &str) -> String {
    if name.starts_with("--") {
        return serde_json::Value::String(name.to_string()).to_string();
    }
    if !name.contains('-') {
        return name.to_string();
    }
    match name.strip_prefix('-') {
        Some(rest) if rest.starts_with("ms-") => rest.to_case(Case::Camel),
        Some(rest) => rest.to_case(Case::Pascal),
        None => name.to_case(Case::Camel),
    }
}

/// `prop: value; prop: value` declaration list.
pub fn css_inline(style: &IndexMap<String, String>) -> String {
    style
        .iter()
        .map(|(k, v)| format!("{}: {}", css_property(k), v.trim()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Escape text content for HTML.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Double-quoted JS literal, valid inside JSX and Svelte expressions.
pub fn js_double(value: &PropValue) -> String {
    match value {
        PropValue::String(s) => serde_json::Value::String(s.clone()).to_string(),
        PropValue::Number(n) => weft_core::format_number(*n),
        PropValue::Boolean(b) => b.to_string(),
        PropValue::Structured(v) => v.to_string(),
    }
}

/// Single-quoted JS literal safe inside a double-quoted template attribute
/// and inside `{{ }}` interpolation.
pub fn js_single(value: &PropValue) -> String {
    match value {
        PropValue::String(s) => single_quoted(s),
        PropValue::Number(n) => weft_core::format_number(*n),
        PropValue::Boolean(b) => b.to_string(),
        PropValue::Structured(v) => json_single(v),
    }
}

fn json_single(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => single_quoted(s),
        serde_json::Value::Array(items) => {
            let items: Vec<String> = items.iter().map(json_single).collect();
            format!("[{}]", items.join(", "))
        }
        serde_json::Value::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", single_quoted(k), json_single(v)))
                .collect();
            format!("{{ {} }}", entries.join(", "))
        }
    }
}

/// Single-quoted JS string literal.
pub fn single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\x22"),
            '{' => out.push_str("\\x7b"),
            '}' => out.push_str("\\x7d"),
            '<' => out.push_str("\\x3c"),
            '&' => out.push_str("\\x26"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
