//! Identifier generation: component names and prop binding names.

use convert_case::{Case, Casing};
use indexmap::IndexMap;
use std::collections::HashSet;
use weft_core::Element;

/// Appended to every component name derived from a kind.
pub const COMPONENT_SUFFIX: &str = "Component";

/// Words that cannot be used as binding names in the emitted languages.
const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield", "let", "static",
    "implements", "interface", "package", "private", "protected", "public", "await",
    "props", "$props", "$$props", "$state", "$derived",
];

/// Base names taken by the generated application shell (`AppComponent`).
const SHELL_BASES: &[&str] = &["App"];

/// Stems taken by the generated application shell (selector `app-root`).
const SHELL_STEMS: &[&str] = &["root"];

/// Name assigned to one top-level element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentName {
    /// PascalCase identifier, e.g. `ButtonComponent2`.
    pub ident: String,
    /// kebab-case stem for file names and selectors, e.g. `button-2`.
    pub stem: String,
}

/// Name every top-level element.
///
/// Names are `PascalCase(kind) + "Component"`. When several elements share a
/// base name, the first keeps it and later ones (in tree order) get `2`, `3`,
/// ... appended after the suffix. Because every base name ends in the suffix,
/// a disambiguated name can never equal another element's base name.
///
/// Stems are numbered the same way, and bumped further when two different
/// kinds kebab-case to the same stem (`button` twice and `button2`).
///
/// Names used by the application shell count as already taken, so kind
/// `app` becomes `AppComponent2` and kind `root` gets stem `root-2`.
pub fn name_components(elements: &[Element]) -> Vec<ComponentName> {
    let mut seen: IndexMap<String, usize> =
        SHELL_BASES.iter().map(|base| (base.to_string(), 1)).collect();
    let mut stems: HashSet<String> = SHELL_STEMS.iter().map(|stem| stem.to_string()).collect();

    elements
        .iter()
        .map(|element| {
            let base = pascal_base(&element.kind);
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;

            let kebab = base.to_case(Case::Kebab);
            let (ident, mut stem) = if *count == 1 {
                (format!("{}{}", base, COMPONENT_SUFFIX), kebab.clone())
            } else {
                (
                    format!("{}{}{}", base, COMPONENT_SUFFIX, count),
                    format!("{}-{}", kebab, count),
                )
            };

            let mut n = *count + 1;
            while !stems.insert(stem.clone()) {
                stem = format!("{}-{}", kebab, n);
                n += 1;
            }
            ComponentName { ident, stem }
        })
        .collect()
}

/// PascalCase base for a kind, always a valid identifier start.
fn pascal_base(kind: &str) -> String {
    let cleaned: String = kind
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let pascal = cleaned.to_case(Case::Pascal);

    if pascal.is_empty() {
        "Element".to_string()
    } else if pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("El{}", pascal)
    } else {
        pascal
    }
}

/// Whether `name` is a plain JavaScript identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Allocates unique binding names for prop keys.
#[derive(Debug, Default)]
pub struct BindingNamer {
    used: Vec<String>,
}

impl BindingNamer {
    /// Namer with `reserved` names already taken.
    pub fn with_reserved(reserved: &[&str]) -> Self {
        Self {
            used: reserved.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Binding name for a prop key: the key itself when usable, otherwise its
    /// camelCase form, numbered on collision.
    pub fn allocate(&mut self, key: &str) -> String {
        let mut base = if is_identifier(key) {
            key.to_string()
        } else {
            let cleaned: String = key
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
                .collect();
            cleaned.to_case(Case::Camel)
        };
        if !is_identifier(&base) {
            base = format!("prop{}", base.to_case(Case::Pascal));
        }
        if RESERVED.contains(&base.as_str()) {
            base.push_str("Prop");
        }

        let mut candidate = base.clone();
        let mut n = 2;
        while self.used.contains(&candidate) {
            candidate = format!("{}{}", base, n);
            n += 1;
        }
        self.used.push(candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idents(kinds: &[&str]) -> Vec<String> {
        let elements: Vec<Element> = kinds
            .iter()
            .enumerate()
            .map(|(i, k)| Element::new(format!("e{}", i), *k))
            .collect();
        name_components(&elements).into_iter().map(|n| n.ident).collect()
    }

    #[test]
    fn test_pascal_names() {
        assert_eq!(idents(&["heading", "productCard"]), vec!["HeadingComponent", "ProductCardComponent"]);
    }

    #[test]
    fn test_collisions_numbered_in_tree_order() {
        assert_eq!(
            idents(&["button", "text", "button", "button"]),
            vec!["ButtonComponent", "TextComponent", "ButtonComponent2", "ButtonComponent3"]
        );
    }

    #[test]
    fn test_stems() {
        let elements = vec![Element::new("a", "productCard"), Element::new("b", "productCard")];
        let names = name_components(&elements);
        assert_eq!(names[0].stem, "product-card");
        assert_eq!(names[1].stem, "product-card-2");
    }

    #[test]
    fn test_stems_stay_unique_across_kinds() {
        let elements = vec![
            Element::new("a", "button"),
            Element::new("b", "button"),
            Element::new("c", "button2"),
        ];
        let stems: Vec<String> = name_components(&elements).into_iter().map(|n| n.stem).collect();
        assert_eq!(&stems[..2], ["button", "button-2"]);
        let unique: HashSet<&String> = stems.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_odd_kinds_still_yield_identifiers() {
        let names = idents(&["", "3d-model", "my kind!"]);
        assert_eq!(names[0], "ElementComponent");
        assert!(names[1].starts_with("El3"));
        assert!(is_identifier(&names[2]));
    }

    #[test]
    fn test_binding_names() {
        let mut namer = BindingNamer::with_reserved(&["className", "style", "children"]);
        assert_eq!(namer.allocate("text"), "text");
        assert_eq!(namer.allocate("aria-label"), "ariaLabel");
        assert_eq!(namer.allocate("for"), "forProp");
        assert_eq!(namer.allocate("children"), "children2");
        assert_eq!(namer.allocate("ariaLabel"), "ariaLabel2");
    }

    #[test]
    fn test_shell_names_are_taken() {
        let elements = vec![
            Element::new("a", "app"),
            Element::new("r", "root"),
            Element::new("b", "app"),
        ];
        let names = name_components(&elements);
        assert_eq!(names[0].ident, "AppComponent2");
        assert_eq!(names[0].stem, "app-2");
        assert_eq!(names[1].ident, "RootComponent");
        assert_eq!(names[1].stem, "root-2");
        assert_eq!(names[2].ident, "AppComponent3");
        assert_eq!(names[2].stem, "app-3");
    }
}
