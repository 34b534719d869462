//! Element kind to target primitive mapping.
//!
//! Every framework shares one kind vocabulary. Most kinds lower to the same
//! HTML tag everywhere; a framework only lists the kinds it lowers
//! differently. Lookups never fail: unmapped kinds degrade to [`FALLBACK_TAG`].

use indexmap::IndexMap;
use weft_core::Framework;

/// Generic container used for kinds missing from the table.
pub const FALLBACK_TAG: &str = "div";

/// What an element kind lowers to in a target framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPrimitive {
    /// Tag name as written in markup.
    pub tag: String,
    /// Void elements take no content and are emitted self-closing.
    pub void: bool,
    /// Fixed attributes that come with the primitive.
    pub attrs: Vec<(String, String)>,
}

impl TargetPrimitive {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            void: false,
            attrs: Vec::new(),
        }
    }

    pub fn void(tag: impl Into<String>) -> Self {
        Self {
            void: true,
            ..Self::new(tag)
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn fallback() -> Self {
        Self::new(FALLBACK_TAG)
    }

    /// Whether the tag is a real DOM element (fragments render nothing).
    pub fn renders_element(&self) -> bool {
        !matches!(
            self.tag.as_str(),
            "React.Fragment" | "template" | "ng-container"
        )
    }
}

/// Result of a table lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLookup {
    pub primitive: TargetPrimitive,
    /// False when the fallback was used.
    pub known: bool,
}

/// Per-framework tag table.
#[derive(Debug, Clone)]
pub struct TagTable {
    framework: Framework,
    custom: IndexMap<String, TargetPrimitive>,
}

impl TagTable {
    /// Built-in table for a framework.
    pub fn for_framework(framework: Framework) -> Self {
        Self {
            framework,
            custom: IndexMap::new(),
        }
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    /// Register or replace a kind for this framework.
    pub fn register(&mut self, kind: &str, primitive: TargetPrimitive) {
        self.custom.insert(normalize_kind(kind), primitive);
    }

    /// Look up a kind, falling back to the generic container.
    pub fn lookup(&self, kind: &str) -> TagLookup {
        let key = normalize_kind(kind);
        let found = self
            .custom
            .get(&key)
            .cloned()
            .or_else(|| framework_override(self.framework, &key))
            .or_else(|| base_primitive(&key));

        match found {
            Some(primitive) => TagLookup {
                primitive,
                known: true,
            },
            None => TagLookup {
                primitive: TargetPrimitive::fallback(),
                known: false,
            },
        }
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.lookup(kind).known
    }
}

/// Map a kind to its primitive for a framework.
pub fn tag_for(kind: &str, framework: Framework) -> TargetPrimitive {
    TagTable::for_framework(framework).lookup(kind).primitive
}

/// Kinds are matched case-insensitively, ignoring `-`, `_` and spaces,
/// so `productCard` and `product-card` are the same kind.
fn normalize_kind(kind: &str) -> String {
    kind.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

fn base_primitive(kind: &str) -> Option<TargetPrimitive> {
    let primitive = match kind {
        "heading" | "title" => TargetPrimitive::new("h1"),
        "subheading" | "subtitle" => TargetPrimitive::new("h2"),
        "text" | "paragraph" => TargetPrimitive::new("p"),
        "span" | "badge" | "icon" => TargetPrimitive::new("span"),
        "label" => TargetPrimitive::new("label"),
        "button" => TargetPrimitive::new("button").with_attr("type", "button"),
        "link" => TargetPrimitive::new("a"),
        "image" => TargetPrimitive::void("img"),
        "input" => TargetPrimitive::void("input"),
        "checkbox" => TargetPrimitive::void("input").with_attr("type", "checkbox"),
        "textarea" => TargetPrimitive::new("textarea"),
        "select" => TargetPrimitive::new("select"),
        "option" => TargetPrimitive::new("option"),
        "container" | "row" | "column" | "grid" | "stack" | "box" => TargetPrimitive::new("div"),
        "section" | "hero" => TargetPrimitive::new("section"),
        "card" | "productcard" | "article" => TargetPrimitive::new("article"),
        "header" => TargetPrimitive::new("header"),
        "footer" => TargetPrimitive::new("footer"),
        "navbar" | "nav" => TargetPrimitive::new("nav"),
        "sidebar" => TargetPrimitive::new("aside"),
        "main" => TargetPrimitive::new("main"),
        "list" => TargetPrimitive::new("ul"),
        "orderedlist" => TargetPrimitive::new("ol"),
        "listitem" => TargetPrimitive::new("li"),
        "form" => TargetPrimitive::new("form"),
        "divider" => TargetPrimitive::void("hr"),
        "video" => TargetPrimitive::new("video"),
        "blockquote" | "quote" => TargetPrimitive::new("blockquote"),
        "code" => TargetPrimitive::new("pre"),
        "table" => TargetPrimitive::new("table"),
        "fragment" => TargetPrimitive::new("div"),
        _ => return None,
    };
    Some(primitive)
}

fn framework_override(framework: Framework, kind: &str) -> Option<TargetPrimitive> {
    match (framework, kind) {
        (Framework::React, "fragment") => Some(TargetPrimitive::new("React.Fragment")),
        (Framework::Vue, "fragment") => Some(TargetPrimitive::new("template")),
        (Framework::Angular, "fragment") => Some(TargetPrimitive::new("ng-container")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds() {
        assert_eq!(tag_for("heading", Framework::React).tag, "h1");
        assert_eq!(tag_for("productCard", Framework::Vue).tag, "article");
        assert_eq!(tag_for("product-card", Framework::Svelte).tag, "article");
        assert!(tag_for("image", Framework::Html).void);
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let table = TagTable::for_framework(Framework::Angular);
        let lookup = table.lookup("carousel3d");
        assert!(!lookup.known);
        assert_eq!(lookup.primitive.tag, FALLBACK_TAG);
    }

    #[test]
    fn test_fragment_differs_per_framework() {
        assert_eq!(tag_for("fragment", Framework::React).tag, "React.Fragment");
        assert_eq!(tag_for("fragment", Framework::Vue).tag, "template");
        assert_eq!(tag_for("fragment", Framework::Angular).tag, "ng-container");
        assert_eq!(tag_for("fragment", Framework::Html).tag, "div");
    }

    #[test]
    fn test_checkbox_carries_type() {
        let primitive = tag_for("checkbox", Framework::React);
        assert_eq!(primitive.tag, "input");
        assert_eq!(primitive.attrs, vec![("type".to_string(), "checkbox".to_string())]);
    }

    #[test]
    fn test_register_custom_kind() {
        let mut table = TagTable::for_framework(Framework::Vue);
        table.register("routerLink", TargetPrimitive::new("RouterLink"));
        assert_eq!(table.lookup("router-link").primitive.tag, "RouterLink");
    }
}
