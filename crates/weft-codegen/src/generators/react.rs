//! React backend: function components in TSX/JSX.

use super::{quoted, CodeGenerator, ComponentUnit, FileKind, GeneratedFile};
use crate::bundler::{entry_script, host_page, mount_point, renders_on_server, server_entry};
use crate::deps::Packages;
use crate::emit::{emit_element, js_double, react_style_key, EmitContext, Markup, Scope};
use crate::error::Result;
use crate::infer::PropInterface;
use crate::naming::is_identifier;
use crate::scaffold::imports_stylesheet;
use indexmap::IndexMap;
use std::borrow::Cow;
use weft_core::{
    Feature, Framework, GenerationConfig, Optimization, PropValue, StylingStrategy,
};

/// React code generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactGenerator;

impl ReactGenerator {
    pub fn new() -> Self {
        Self
    }

    fn ext(config: &GenerationConfig) -> &'static str {
        if config.typescript {
            "tsx"
        } else {
            "jsx"
        }
    }

    fn component_path(unit: &ComponentUnit<'_>, config: &GenerationConfig) -> String {
        format!("src/components/{}.{}", unit.ident(), Self::ext(config))
    }

    /// `export interface XProps { ... }`
    fn props_interface(unit: &ComponentUnit<'_>) -> Vec<String> {
        let mut lines = vec![format!("export interface {}Props {{", unit.ident())];
        for prop in &unit.interface.props {
            lines.push(format!(
                "  {}{}: {};",
                interface_key(&prop.name),
                if prop.optional { "?" } else { "" },
                prop.ty.typescript(Framework::React)
            ));
        }
        lines.push("}".to_string());
        lines
    }

    /// Destructured parameter list with authored defaults.
    fn destructured(interface: &PropInterface) -> Vec<String> {
        interface
            .props
            .iter()
            .map(|prop| {
                let target = if prop.binding == prop.name {
                    prop.binding.clone()
                } else {
                    format!("{}: {}", interface_key(&prop.name), prop.binding)
                };
                match &prop.default {
                    Some(value) => format!("  {} = {},", target, js_double(value)),
                    None => format!("  {},", target),
                }
            })
            .collect()
    }

    fn app_file(&self, units: &[ComponentUnit<'_>], config: &GenerationConfig) -> GeneratedFile {
        let lazy = config.optimizes(Optimization::LazyLoading) && !units.is_empty();
        let mut lines = Vec::new();

        if lazy {
            lines.push("import { lazy, Suspense } from 'react';".to_string());
        }
        match config.styling_strategy {
            StylingStrategy::CssModules => lines.push("import styles from './App.module.css';".to_string()),
            StylingStrategy::StyledComponents => {
                lines.push("import { ThemeProvider } from 'styled-components';".to_string());
                lines.push("import { theme } from './styles/theme';".to_string());
                lines.push("import { GlobalStyle } from './styles/GlobalStyle';".to_string());
            }
            _ => {}
        }
        if !lazy {
            for unit in units {
                lines.push(format!("import {0} from './components/{0}';", unit.ident()));
            }
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        if lazy {
            for unit in units {
                lines.push(format!(
                    "const {0} = lazy(() => import('./components/{0}'));",
                    unit.ident()
                ));
            }
            lines.push(String::new());
        }

        let mut body: Vec<String> = units.iter().map(|u| format!("<{} />", u.ident())).collect();
        if lazy {
            body = wrap(body, "<Suspense fallback={null}>", "</Suspense>");
        }
        body = match config.styling_strategy {
            StylingStrategy::CssModules => wrap(body, "<div className={styles.app}>", "</div>"),
            StylingStrategy::StyledComponents => {
                body.insert(0, "<GlobalStyle />".to_string());
                wrap(body, "<ThemeProvider theme={theme}>", "</ThemeProvider>")
            }
            _ => wrap(body, "<>", "</>"),
        };

        lines.push("export default function App() {".to_string());
        lines.push("  return (".to_string());
        lines.extend(body.into_iter().map(|l| format!("    {}", l)));
        lines.push("  );".to_string());
        lines.push("}".to_string());
        lines.push(String::new());

        GeneratedFile::new(format!("src/App.{}", Self::ext(config)), lines.join("\n"), FileKind::Entry)
    }

    fn main_file(&self, config: &GenerationConfig) -> GeneratedFile {
        let routing = config.has_feature(Feature::Routing);
        let mut lines = vec![
            "import React from 'react';".to_string(),
            "import ReactDOM from 'react-dom/client';".to_string(),
        ];
        if routing {
            lines.push("import { RouterProvider } from 'react-router-dom';".to_string());
            lines.push("import { router } from './router';".to_string());
        } else {
            lines.push("import App from './App';".to_string());
        }
        if imports_stylesheet(config) {
            lines.push("import './index.css';".to_string());
        }
        if config.has_feature(Feature::I18n) {
            lines.push("import './i18n';".to_string());
        }
        if config.has_feature(Feature::DarkMode) {
            lines.push("import { applyStoredTheme } from './darkMode';".to_string());
            lines.push(String::new());
            lines.push("applyStoredTheme();".to_string());
        }
        lines.push(String::new());

        let root = if config.typescript {
            "document.getElementById('root')!"
        } else {
            "document.getElementById('root')"
        };
        let app = if routing { "<RouterProvider router={router} />" } else { "<App />" };
        let tree = [
            "  <React.StrictMode>".to_string(),
            format!("    {}", app),
            "  </React.StrictMode>,".to_string(),
        ];

        if renders_on_server(config) {
            lines.push(format!("ReactDOM.hydrateRoot(\n  {},", root));
        } else {
            lines.push(format!("ReactDOM.createRoot({}).render(", root));
        }
        lines.extend(tree);
        lines.push(");".to_string());
        lines.push(String::new());

        GeneratedFile::new(entry_script(config), lines.join("\n"), FileKind::Entry)
    }

    fn server_entry_file(&self, config: &GenerationConfig) -> GeneratedFile {
        let signature = if config.typescript {
            "export function render(_url: string): string {"
        } else {
            "export function render(_url) {"
        };
        let content = format!(
            r#"import React from 'react';
import {{ renderToString }} from 'react-dom/server';
import App from './App';

{}
  return renderToString(
    <React.StrictMode>
      <App />
    </React.StrictMode>,
  );
}}
"#,
            signature
        );
        GeneratedFile::new(server_entry(config), content, FileKind::Entry)
    }
}

/// Object key for a prop name, quoted when it is not an identifier.
fn interface_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        serde_json::Value::String(name.to_string()).to_string()
    }
}

/// Indent `body` one level inside `open`/`close`.
fn wrap(body: Vec<String>, open: &str, close: &str) -> Vec<String> {
    let mut lines = vec![open.to_string()];
    lines.extend(body.into_iter().map(|l| format!("  {}", l)));
    lines.push(close.to_string());
    lines
}

/// JSX attribute names that differ from their HTML spelling.
fn jsx_attr_name(name: &str) -> Option<&'static str> {
    Some(match name {
        "for" => "htmlFor",
        "class" => "className",
        "tabindex" => "tabIndex",
        "readonly" => "readOnly",
        "maxlength" => "maxLength",
        "minlength" => "minLength",
        "colspan" => "colSpan",
        "rowspan" => "rowSpan",
        "autofocus" => "autoFocus",
        "autocomplete" => "autoComplete",
        "contenteditable" => "contentEditable",
        "crossorigin" => "crossOrigin",
        "srcset" => "srcSet",
        _ => return None,
    })
}

impl Markup for ReactGenerator {
    fn literal_attr(&self, name: &str, value: &str) -> String {
        let plain = !value
            .chars()
            .any(|c| matches!(c, '"' | '&' | '<' | '>' | '{' | '}' | '\\') || c.is_control());
        if plain {
            format!("{}=\"{}\"", name, value)
        } else {
            self.bound_attr(name, &js_double(&PropValue::from(value)))
        }
    }

    fn bound_attr(&self, name: &str, expr: &str) -> String {
        format!("{}={{{}}}", name, expr)
    }

    fn attr_name<'n>(&self, name: &'n str) -> Cow<'n, str> {
        match jsx_attr_name(name) {
            Some(mapped) => Cow::Borrowed(mapped),
            None => Cow::Borrowed(name),
        }
    }

    fn expr_literal(&self, value: &PropValue) -> String {
        js_double(value)
    }

    fn text_binding(&self, expr: &str) -> String {
        format!("{{{}}}", expr)
    }

    fn class_attr(&self, authored: Option<&str>, scope: Scope<'_>) -> Option<String> {
        match (scope, authored) {
            (Scope::Component(_), Some(classes)) => Some(format!(
                "className={{[{}, className].filter(Boolean).join(\" \")}}",
                js_double(&PropValue::from(classes))
            )),
            (Scope::Component(_), None) => Some("className={className}".to_string()),
            (Scope::Nested, Some(classes)) => Some(self.literal_attr("className", classes)),
            (Scope::Nested, None) => None,
        }
    }

    fn style_attr(&self, style: &IndexMap<String, String>, scope: Scope<'_>) -> Option<String> {
        let entries: Vec<String> = style
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}: {}",
                    react_style_key(k),
                    js_double(&PropValue::from(v.trim()))
                )
            })
            .collect();
        match scope {
            Scope::Component(_) if entries.is_empty() => Some("style={style}".to_string()),
            Scope::Component(_) => Some(format!("style={{{{ ...style, {} }}}}", entries.join(", "))),
            Scope::Nested if entries.is_empty() => None,
            Scope::Nested => Some(format!("style={{{{ {} }}}}", entries.join(", "))),
        }
    }

    fn child_slot(&self) -> Option<&'static str> {
        Some("{children}")
    }
}

impl CodeGenerator for ReactGenerator {
    fn framework(&self) -> Framework {
        Framework::React
    }

    fn generate_component(
        &self,
        unit: &ComponentUnit<'_>,
        ctx: &mut EmitContext<'_>,
    ) -> Result<GeneratedFile> {
        let config = ctx.config;
        let name = unit.ident();
        let mut lines = vec!["import React from 'react';".to_string(), String::new()];

        if config.typescript {
            lines.extend(Self::props_interface(unit));
            lines.push(String::new());
        }

        let params = Self::destructured(&unit.interface);
        if params.is_empty() {
            lines.push(format!("export default function {}() {{", name));
        } else {
            lines.push(format!("export default function {}({{", name));
            lines.extend(params);
            if config.typescript {
                lines.push(format!("}}: {}Props) {{", name));
            } else {
                lines.push("}) {".to_string());
            }
        }

        let markup = emit_element(self, ctx, unit.element, Scope::Component(&unit.interface), 2);
        lines.push("  return (".to_string());
        lines.push(markup);
        lines.push("  );".to_string());
        lines.push("}".to_string());
        lines.push(String::new());

        tracing::debug!(component = name, "emitted React component");
        Ok(GeneratedFile::new(
            Self::component_path(unit, config),
            lines.join("\n"),
            FileKind::Component,
        ))
    }

    fn generate_test(&self, unit: &ComponentUnit<'_>, ctx: &EmitContext<'_>) -> Option<GeneratedFile> {
        let config = ctx.config;
        let name = unit.ident();
        let primitive = ctx.lookup(&unit.element.kind).primitive;

        let assertion = if primitive.renders_element() {
            vec![
                format!("    const {{ container }} = render(<{} />);", name),
                format!(
                    "    expect(container.querySelector({})).not.toBeNull();",
                    quoted(&primitive.tag)
                ),
            ]
        } else {
            vec![format!("    expect(() => render(<{} />)).not.toThrow();", name)]
        };

        let mut lines = vec![
            "import { render } from '@testing-library/react';".to_string(),
            "import { describe, expect, it } from 'vitest';".to_string(),
            format!("import {0} from './{0}';", name),
            String::new(),
            format!("describe({}, () => {{", quoted(name)),
            "  it('renders its root element', () => {".to_string(),
        ];
        lines.extend(assertion);
        lines.push("  });".to_string());
        lines.push("});".to_string());
        lines.push(String::new());

        Some(GeneratedFile::new(
            format!("src/components/{}.test.{}", name, Self::ext(config)),
            lines.join("\n"),
            FileKind::Test,
        ))
    }

    fn generate_entry(
        &self,
        units: &[ComponentUnit<'_>],
        ctx: &mut EmitContext<'_>,
    ) -> Result<Vec<GeneratedFile>> {
        let config = ctx.config;
        let mut files = vec![
            self.app_file(units, config),
            self.main_file(config),
            host_page(config, &mount_point(config, "root")),
        ];
        if renders_on_server(config) {
            files.push(self.server_entry_file(config));
        }
        Ok(files)
    }

    fn feature_files(&self, _units: &[ComponentUnit<'_>], config: &GenerationConfig) -> Vec<GeneratedFile> {
        let mut files = Vec::new();
        let ts = config.typescript;
        let script = config.script_ext();

        if config.has_feature(Feature::Routing) {
            files.push(GeneratedFile::new(
                format!("src/router.{}", Self::ext(config)),
                "import { createBrowserRouter } from 'react-router-dom';\nimport App from './App';\n\nexport const router = createBrowserRouter([\n  { path: '/', element: <App /> },\n]);\n",
                FileKind::Entry,
            ));
        }

        if config.has_feature(Feature::StateManagement) {
            let content = if ts {
                r#"import { create } from 'zustand';

interface AppState {
  loading: boolean;
  error: string | null;
  setLoading: (loading: boolean) => void;
  setError: (error: string | null) => void;
}

export const useAppStore = create<AppState>()((set) => ({
  loading: false,
  error: null,
  setLoading: (loading) => set({ loading }),
  setError: (error) => set({ error }),
}));
"#
            } else {
                r#"import { create } from 'zustand';

export const useAppStore = create((set) => ({
  loading: false,
  error: null,
  setLoading: (loading) => set({ loading }),
  setError: (error) => set({ error }),
}));
"#
            };
            files.push(GeneratedFile::new(format!("src/store.{}", script), content, FileKind::Entry));
        }

        if config.has_feature(Feature::I18n) {
            files.push(GeneratedFile::new(
                format!("src/i18n.{}", script),
                r#"import i18n from 'i18next';
import { initReactI18next } from 'react-i18next';
import en from './locales/en.json';

i18n.use(initReactI18next).init({
  resources: { en: { translation: en } },
  lng: 'en',
  fallbackLng: 'en',
  interpolation: { escapeValue: false },
});

export default i18n;
"#,
                FileKind::Entry,
            ));
        }

        files
    }

    fn packages(&self, config: &GenerationConfig) -> Packages {
        let mut packages = Packages::new();
        packages.deps(&["react", "react-dom"]);
        if config.typescript {
            packages.devs(&["@types/react", "@types/react-dom"]);
        }
        if config.has_feature(Feature::Routing) {
            packages.dep("react-router-dom");
        }
        if config.has_feature(Feature::StateManagement) {
            packages.dep("zustand");
        }
        if config.has_feature(Feature::I18n) {
            packages.deps(&["i18next", "react-i18next"]);
        }
        packages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::PropInferencer;
    use crate::naming::name_components;
    use crate::responsive::ResponsiveRules;
    use weft_core::Element;

    fn component(element: &Element, config: &GenerationConfig) -> String {
        let rules = ResponsiveRules::tailwind().unwrap();
        let mut ctx = EmitContext::new(config, ReactGenerator.tag_table(), &rules);
        let interface = PropInferencer::new(Framework::React, config.typescript)
            .infer(element, &mut Vec::new());
        let unit = ComponentUnit {
            element,
            name: name_components(std::slice::from_ref(element)).remove(0),
            interface,
        };
        ReactGenerator.generate_component(&unit, &mut ctx).unwrap().content
    }

    #[test]
    fn test_heading_component() {
        let element = Element::new("h", "heading").with_prop("text", "Hello");
        let code = component(&element, &GenerationConfig::default());
        insta::assert_snapshot!(code, @r###"
        import React from 'react';

        export interface HeadingComponentProps {
          text?: string;
          className?: string;
          style?: React.CSSProperties;
        }

        export default function HeadingComponent({
          text = "Hello",
          className,
          style,
        }: HeadingComponentProps) {
          return (
            <h1 className={className} style={style}>{text}</h1>
          );
        }
        "###);
    }

    #[test]
    fn test_class_and_style_merge() {
        let element = Element::new("c", "container")
            .with_prop("className", "p-4")
            .with_style("background-color", "red")
            .with_child(Element::new("t", "text").with_prop("text", "Hi"));
        let code = component(&element, &GenerationConfig::default());
        assert!(code.contains(r#"className={["p-4", className].filter(Boolean).join(" ")}"#));
        assert!(code.contains(r#"style={{ ...style, backgroundColor: "red" }}"#));
        assert!(code.contains(r#"      <p>{"Hi"}</p>"#));
        assert!(code.contains("      {children}"));
        assert!(code.contains("children?: React.ReactNode;"));
    }

    #[test]
    fn test_javascript_has_no_interface() {
        let element = Element::new("b", "button").with_prop("disabled", false);
        let code = component(&element, &GenerationConfig::default().with_typescript(false));
        assert!(!code.contains("interface"));
        assert!(code.contains("  disabled = false,"));
        assert!(code.contains("}) {"));
        assert!(code.contains(r#"<button className={className} style={style} type="button" disabled={disabled}></button>"#));
    }

    #[test]
    fn test_for_becomes_html_for() {
        let element = Element::new("l", "label").with_child(
            Element::new("x", "label").with_prop("for", "email"),
        );
        let code = component(&element, &GenerationConfig::default());
        assert!(code.contains(r#"<label htmlFor="email"></label>"#));
    }

    #[test]
    fn test_lazy_app() {
        let elements = vec![Element::new("a", "heading")];
        let names = name_components(&elements);
        let units = vec![ComponentUnit {
            element: &elements[0],
            name: names[0].clone(),
            interface: PropInterface::default(),
        }];
        let config = GenerationConfig::default().with_optimization(Optimization::LazyLoading);
        let app = ReactGenerator.app_file(&units, &config);
        assert!(app.content.contains("const HeadingComponent = lazy(() => import('./components/HeadingComponent'));"));
        assert!(app.content.contains("      <Suspense fallback={null}>"));
    }

    #[test]
    fn test_reserved_keys_do_not_clash() {
        let element = Element::new("c", "container")
            .with_prop("children", "x")
            .with_prop("class", "y")
            .with_child(Element::new("t", "text"));
        let code = component(&element, &GenerationConfig::default());
        assert_eq!(code.matches("children?:").count(), 1);
        assert!(code.contains("  children?: React.ReactNode;"));
        assert!(!code.contains("children={"));
        assert!(code.contains("<div className={className} style={style}>"));
        assert_eq!(code.matches("className=").count(), 1);
    }
}
