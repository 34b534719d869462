//! Static HTML backend.
//!
//! There is no component model: each top-level element becomes a markup
//! fragment under `src/components/`, and the host page inlines every
//! fragment in tree order. Props are always emitted as literals.

use super::{CodeGenerator, ComponentUnit, FileKind, GeneratedFile};
use crate::bundler::{entry_script, host_page};
use crate::deps::Packages;
use crate::emit::{css_inline, emit_element, escape_text, EmitContext, Markup, Scope};
use crate::error::Result;
use crate::scaffold::imports_stylesheet;
use indexmap::IndexMap;
use weft_core::{Feature, Framework, GenerationConfig, PropValue};

/// Static HTML generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlGenerator;

impl HtmlGenerator {
    pub fn new() -> Self {
        Self
    }

    fn main_file(&self, config: &GenerationConfig) -> GeneratedFile {
        let mut lines = Vec::new();
        if imports_stylesheet(config) {
            lines.push("import './index.css';".to_string());
        }
        if config.has_feature(Feature::DarkMode) {
            lines.push("import { applyStoredTheme, toggleDarkMode } from './darkMode';".to_string());
            lines.push(String::new());
            lines.push("applyStoredTheme();".to_string());
            lines.push(
                "document.querySelector('[data-theme-toggle]')?.addEventListener('click', () => toggleDarkMode());"
                    .to_string(),
            );
        }
        lines.push(String::new());
        GeneratedFile::new(entry_script(config), lines.join("\n"), FileKind::Entry)
    }
}

impl Markup for HtmlGenerator {
    fn bound_attr(&self, name: &str, expr: &str) -> String {
        self.literal_attr(name, expr)
    }

    fn value_attr(&self, name: &str, value: &PropValue) -> Option<String> {
        match value {
            PropValue::Boolean(true) => Some(name.to_string()),
            PropValue::Boolean(false) => None,
            other => Some(self.literal_attr(name, &other.to_plain_text())),
        }
    }

    fn expr_literal(&self, value: &PropValue) -> String {
        value.to_plain_text()
    }

    fn text_binding(&self, expr: &str) -> String {
        escape_text(expr)
    }

    fn class_attr(&self, authored: Option<&str>, _scope: Scope<'_>) -> Option<String> {
        authored.map(|classes| self.literal_attr("class", classes))
    }

    fn style_attr(&self, style: &IndexMap<String, String>, _scope: Scope<'_>) -> Option<String> {
        (!style.is_empty()).then(|| self.literal_attr("style", &css_inline(style)))
    }

    fn child_slot(&self) -> Option<&'static str> {
        None
    }

    fn void_close(&self) -> &'static str {
        ">"
    }
}

impl CodeGenerator for HtmlGenerator {
    fn framework(&self) -> Framework {
        Framework::Html
    }

    fn generate_component(
        &self,
        unit: &ComponentUnit<'_>,
        ctx: &mut EmitContext<'_>,
    ) -> Result<GeneratedFile> {
        let markup = emit_element(self, ctx, unit.element, Scope::Nested, 0);
        tracing::debug!(fragment = unit.stem(), "emitted HTML fragment");
        Ok(GeneratedFile::new(
            format!("src/components/{}.html", unit.stem()),
            markup + "\n",
            FileKind::Component,
        ))
    }

    fn generate_test(&self, _unit: &ComponentUnit<'_>, _ctx: &EmitContext<'_>) -> Option<GeneratedFile> {
        None
    }

    fn generate_entry(
        &self,
        units: &[ComponentUnit<'_>],
        ctx: &mut EmitContext<'_>,
    ) -> Result<Vec<GeneratedFile>> {
        // Fragments were already diagnosed when their files were emitted.
        let mark = ctx.diagnostics().len();
        let body: Vec<String> = units
            .iter()
            .map(|unit| emit_element(self, ctx, unit.element, Scope::Nested, 2))
            .collect();
        ctx.diagnostics_mut().truncate(mark);

        let config = ctx.config;
        Ok(vec![host_page(config, &body.join("\n")), self.main_file(config)])
    }

    fn packages(&self, _config: &GenerationConfig) -> Packages {
        Packages::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::name_components;
    use crate::responsive::ResponsiveRules;
    use weft_core::Element;

    fn page() -> Vec<Element> {
        vec![
            Element::new("hero", "hero")
                .with_prop("className", "p-8")
                .with_child(Element::new("title", "heading").with_prop("text", "Tom & Jerry"))
                .with_child(Element::new("cta", "button").with_prop("disabled", true)),
            Element::new("rule", "divider"),
        ]
    }

    #[test]
    fn test_host_page_inlines_fragments() {
        let elements = page();
        let config = GenerationConfig::for_framework(Framework::Html).with_typescript(false);
        let rules = ResponsiveRules::tailwind().unwrap();
        let mut ctx = EmitContext::new(&config, HtmlGenerator.tag_table(), &rules);
        let units: Vec<ComponentUnit<'_>> = elements
            .iter()
            .zip(name_components(&elements))
            .map(|(element, name)| ComponentUnit {
                element,
                name,
                interface: Default::default(),
            })
            .collect();

        let fragment = HtmlGenerator.generate_component(&units[0], &mut ctx).unwrap();
        assert_eq!(fragment.path, "src/components/hero.html");
        insta::assert_snapshot!(fragment.content, @r###"
        <section class="p-4 md:p-8">
          <h1>Tom &amp; Jerry</h1>
          <button type="button" disabled></button>
        </section>
        "###);

        let files = HtmlGenerator.generate_entry(&units, &mut ctx).unwrap();
        let index = &files[0];
        assert_eq!(index.path, "index.html");
        assert!(index.content.contains("    <section class=\"p-4 md:p-8\">\n      <h1>Tom &amp; Jerry</h1>"));
        assert!(index.content.contains("    <hr>\n    <script type=\"module\" src=\"/src/main.js\"></script>"));
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_false_boolean_is_omitted() {
        let element = Element::new("i", "input").with_prop("required", false).with_prop("maxlength", 8);
        let config = GenerationConfig::for_framework(Framework::Html);
        let rules = ResponsiveRules::tailwind().unwrap();
        let mut ctx = EmitContext::new(&config, HtmlGenerator.tag_table(), &rules);
        assert_eq!(HtmlGenerator.emit(&element, &mut ctx, 0), r#"<input maxlength="8">"#);
    }
}
