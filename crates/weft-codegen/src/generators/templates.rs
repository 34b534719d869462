//! Handlebars wrapper used for the README and bundler configuration files.

use crate::error::Result;
use convert_case::{Case, Casing};
use handlebars::{Context, Handlebars, Helper, Output, RenderContext};
use serde::Serialize;

/// Template engine emitting source text: output is never HTML-escaped.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);
        Self::register_helpers(&mut handlebars);
        Self { handlebars }
    }

    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars.register_template_string(name, template)?;
        Ok(())
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        Ok(self.handlebars.render(name, data)?)
    }

    /// Render a template string without registering it.
    pub fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        Ok(self.handlebars.render_template(template, data)?)
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        let cases = [
            ("pascal_case", Case::Pascal),
            ("camel_case", Case::Camel),
            ("kebab_case", Case::Kebab),
            ("snake_case", Case::Snake),
        ];
        for (name, case) in cases {
            handlebars.register_helper(
                name,
                Box::new(
                    move |h: &Helper,
                          _r: &Handlebars,
                          _ctx: &Context,
                          _rc: &mut RenderContext,
                          out: &mut dyn Output| {
                        let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
                        out.write(&param.to_case(case))?;
                        Ok(())
                    },
                ),
            );
        }

        // {{join items ", "}}
        handlebars.register_helper(
            "join",
            Box::new(
                |h: &Helper,
                 _r: &Handlebars,
                 _ctx: &Context,
                 _rc: &mut RenderContext,
                 out: &mut dyn Output| {
                    let sep = h.param(1).and_then(|v| v.value().as_str()).unwrap_or(", ");
                    if let Some(items) = h.param(0).and_then(|v| v.value().as_array()) {
                        let joined = items
                            .iter()
                            .filter_map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(sep);
                        out.write(&joined)?;
                    }
                    Ok(())
                },
            ),
        );

        // {{indent block 4}}: indents every non-blank line.
        handlebars.register_helper(
            "indent",
            Box::new(
                |h: &Helper,
                 _r: &Handlebars,
                 _ctx: &Context,
                 _rc: &mut RenderContext,
                 out: &mut dyn Output| {
                    let content = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
                    let width = h.param(1).and_then(|v| v.value().as_u64()).unwrap_or(2) as usize;
                    let pad = " ".repeat(width);
                    let indented = content
                        .lines()
                        .map(|line| {
                            if line.trim().is_empty() {
                                String::new()
                            } else {
                                format!("{}{}", pad, line)
                            }
                        })
                        .collect::<Vec<_>>()
                        .join("\n");
                    out.write(&indented)?;
                    Ok(())
                },
            ),
        );
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_is_not_escaped() {
        let engine = TemplateEngine::new();
        let out = engine
            .render_string("{{code}}", &json!({"code": "a < b && \"c\""}))
            .unwrap();
        assert_eq!(out, "a < b && \"c\"");
    }

    #[test]
    fn test_case_helpers() {
        let engine = TemplateEngine::new();
        let out = engine
            .render_string(
                "{{pascal_case n}} {{camel_case n}} {{kebab_case n}}",
                &json!({"n": "product card"}),
            )
            .unwrap();
        assert_eq!(out, "ProductCard productCard product-card");
    }

    #[test]
    fn test_join_and_indent() {
        let engine = TemplateEngine::new();
        let out = engine
            .render_string(
                "[{{join items \", \"}}]\n{{indent body 4}}",
                &json!({"items": ["a", "b"], "body": "x\n\ny"}),
            )
            .unwrap();
        assert_eq!(out, "[a, b]\n    x\n\n    y");
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let engine = TemplateEngine::new();
        assert!(engine.render_string("{{nope}}", &json!({})).is_err());
    }

    #[test]
    fn test_registered_template() {
        let mut engine = TemplateEngine::new();
        engine.register_template("hello", "Hello, {{name}}!").unwrap();
        assert_eq!(engine.render("hello", &json!({"name": "Weft"})).unwrap(), "Hello, Weft!");
    }
}
