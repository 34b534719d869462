//! Svelte 5 backend: runes-mode components.

use super::{quoted, CodeGenerator, ComponentUnit, FileKind, GeneratedFile};
use crate::bundler::{entry_script, host_page, mount_point, renders_on_server, server_entry};
use crate::deps::Packages;
use crate::emit::{
    css_inline, emit_element, escape_attr, js_double, EmitContext, Markup, Scope,
};
use crate::error::Result;
use crate::naming::is_identifier;
use crate::scaffold::{imports_stylesheet, is_esm};
use indexmap::IndexMap;
use weft_core::{Bundler, Feature, Framework, GenerationConfig, Optimization, PropValue, StylingStrategy};

/// Svelte code generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvelteGenerator;

impl SvelteGenerator {
    pub fn new() -> Self {
        Self
    }

    fn props_block(unit: &ComponentUnit<'_>, typescript: bool) -> Vec<String> {
        let mut lines = Vec::new();
        let interface = &unit.interface;

        if typescript {
            if interface.has(crate::infer::PropType::Children) {
                lines.push("  import type { Snippet } from 'svelte';".to_string());
                lines.push(String::new());
            }
            lines.push("  interface Props {".to_string());
            for prop in &interface.props {
                lines.push(format!(
                    "    {}?: {};",
                    object_key(&prop.name),
                    prop.ty.typescript(Framework::Svelte)
                ));
            }
            lines.push("  }".to_string());
            lines.push(String::new());
        }

        lines.push("  let {".to_string());
        for prop in &interface.props {
            let target = if prop.binding == prop.name {
                prop.binding.clone()
            } else {
                format!("{}: {}", object_key(&prop.name), prop.binding)
            };
            match &prop.default {
                Some(value) => lines.push(format!("    {} = {},", target, js_double(value))),
                None => lines.push(format!("    {},", target)),
            }
        }
        lines.push(if typescript {
            "  }: Props = $props();".to_string()
        } else {
            "  } = $props();".to_string()
        });
        lines
    }

    fn script_open(config: &GenerationConfig) -> &'static str {
        if config.typescript {
            "<script lang=\"ts\">"
        } else {
            "<script>"
        }
    }

    fn app_file(&self, units: &[ComponentUnit<'_>], config: &GenerationConfig) -> GeneratedFile {
        let lazy = config.optimizes(Optimization::LazyLoading);
        let modules = config.styling_strategy == StylingStrategy::CssModules;

        let mut script = Vec::new();
        if modules {
            script.push("  import styles from './App.module.css';".to_string());
        }
        if !lazy {
            for unit in units {
                script.push(format!("  import {0} from './components/{0}.svelte';", unit.ident()));
            }
        }

        let mut lines = Vec::new();
        if !script.is_empty() {
            lines.push(Self::script_open(config).to_string());
            lines.extend(script);
            lines.push("</script>".to_string());
            lines.push(String::new());
        }

        let inner = if modules { "  " } else { "" };
        if modules {
            lines.push("<div class={styles.app}>".to_string());
        }
        for unit in units {
            if lazy {
                lines.push(format!(
                    "{}{{#await import('./components/{}.svelte') then module}}<module.default />{{/await}}",
                    inner,
                    unit.ident()
                ));
            } else {
                lines.push(format!("{}<{} />", inner, unit.ident()));
            }
        }
        if modules {
            lines.push("</div>".to_string());
        }
        lines.push(String::new());

        GeneratedFile::new("src/App.svelte", lines.join("\n"), FileKind::Entry)
    }

    fn main_file(&self, config: &GenerationConfig) -> GeneratedFile {
        let routing = config.has_feature(Feature::Routing);
        let attach = if renders_on_server(config) { "hydrate" } else { "mount" };
        let root = if routing { "Router" } else { "App" };

        let mut lines = vec![
            format!("import {{ {} }} from 'svelte';", attach),
            format!("import {0} from './{0}.svelte';", root),
        ];
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

        let target = if config.typescript {
            "document.getElementById('app')!"
        } else {
            "document.getElementById('app')"
        };
        lines.push(format!("const app = {}({}, {{ target: {} }});", attach, root, target));
        lines.push(String::new());
        lines.push("export default app;".to_string());
        lines.push(String::new());

        GeneratedFile::new(entry_script(config), lines.join("\n"), FileKind::Entry)
    }

    fn server_entry_file(&self, config: &GenerationConfig) -> GeneratedFile {
        let mut imports = String::new();
        if config.has_feature(Feature::I18n) {
            imports.push_str("import './i18n';\n");
        }
        let signature = if config.typescript {
            "export function render(_url: string): string {"
        } else {
            "export function render(_url) {"
        };
        let content = format!(
            r#"import {{ render as renderComponent }} from 'svelte/server';
{}import App from './App.svelte';

{}
  return renderComponent(App).body;
}}
"#,
            imports, signature
        );
        GeneratedFile::new(server_entry(config), content, FileKind::Entry)
    }
}

fn object_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        serde_json::Value::String(name.to_string()).to_string()
    }
}

fn has_braces(s: &str) -> bool {
    s.contains('{') || s.contains('}')
}

impl Markup for SvelteGenerator {
    fn literal_attr(&self, name: &str, value: &str) -> String {
        // Braces in an attribute value open an expression.
        if has_braces(value) {
            self.bound_attr(name, &js_double(&PropValue::from(value)))
        } else {
            format!("{}=\"{}\"", name, escape_attr(value))
        }
    }

    fn bound_attr(&self, name: &str, expr: &str) -> String {
        format!("{}={{{}}}", name, expr)
    }

    fn expr_literal(&self, value: &PropValue) -> String {
        js_double(value)
    }

    fn text_binding(&self, expr: &str) -> String {
        format!("{{{}}}", expr)
    }


    fn class_attr(&self, authored: Option<&str>, scope: Scope<'_>) -> Option<String> {
        match (scope, authored) {
            (Scope::Component(_), Some(classes)) if !has_braces(classes) => {
                Some(format!("class=\"{} {{className}}\"", escape_attr(classes)))
            }
            (Scope::Component(_), Some(classes)) => Some(format!(
                "class={{[{}, className].filter(Boolean).join(\" \")}}",
                js_double(&PropValue::from(classes))
            )),
            (Scope::Component(_), None) => Some("class={className}".to_string()),
            (Scope::Nested, Some(classes)) => Some(self.literal_attr("class", classes)),
            (Scope::Nested, None) => None,
        }
    }

    fn style_attr(&self, style: &IndexMap<String, String>, scope: Scope<'_>) -> Option<String> {
        match scope {
            Scope::Component(_) if style.is_empty() => Some("style={style}".to_string()),
            Scope::Component(_) => Some(format!(
                "style={{[style, {}].filter(Boolean).join(\"; \")}}",
                js_double(&PropValue::from(css_inline(style)))
            )),
            Scope::Nested if style.is_empty() => None,
            Scope::Nested => Some(self.literal_attr("style", &css_inline(style))),
        }
    }

    fn child_slot(&self) -> Option<&'static str> {
        Some("{@render children?.()}")
    }
}

impl CodeGenerator for SvelteGenerator {
    fn framework(&self) -> Framework {
        Framework::Svelte
    }

    fn generate_component(
        &self,
        unit: &ComponentUnit<'_>,
        ctx: &mut EmitContext<'_>,
    ) -> Result<GeneratedFile> {
        let config = ctx.config;
        let mut lines = vec![Self::script_open(config).to_string()];
        lines.extend(Self::props_block(unit, config.typescript));
        lines.push("</script>".to_string());
        lines.push(String::new());
        lines.push(emit_element(self, ctx, unit.element, Scope::Component(&unit.interface), 0));
        lines.push(String::new());

        tracing::debug!(component = unit.ident(), "emitted Svelte component");
        Ok(GeneratedFile::new(
            format!("src/components/{}.svelte", unit.ident()),
            lines.join("\n"),
            FileKind::Component,
        ))
    }

    fn generate_test(&self, unit: &ComponentUnit<'_>, ctx: &EmitContext<'_>) -> Option<GeneratedFile> {
        let name = unit.ident();
        let primitive = ctx.lookup(&unit.element.kind).primitive;
        let mut lines = vec![
            "import { render } from '@testing-library/svelte';".to_string(),
            "import { describe, expect, it } from 'vitest';".to_string(),
            format!("import {0} from './{0}.svelte';", name),
            String::new(),
            format!("describe({}, () => {{", quoted(name)),
            "  it('renders its root element', () => {".to_string(),
            format!("    const {{ container }} = render({});", name),
            format!(
                "    expect(container.querySelector({})).not.toBeNull();",
                quoted(&primitive.tag)
            ),
            "  });".to_string(),
            "});".to_string(),
            String::new(),
        ];
        if !primitive.renders_element() {
            lines.truncate(6);
            lines.extend([
                format!("    expect(() => render({})).not.toThrow();", name),
                "  });".to_string(),
                "});".to_string(),
                String::new(),
            ]);
        }

        Some(GeneratedFile::new(
            format!("src/components/{}.test.{}", name, ctx.config.script_ext()),
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
            host_page(config, &mount_point(config, "app")),
        ];
        if renders_on_server(config) {
            files.push(self.server_entry_file(config));
        }
        Ok(files)
    }

    fn feature_files(&self, _units: &[ComponentUnit<'_>], config: &GenerationConfig) -> Vec<GeneratedFile> {
        let mut files = Vec::new();
        let ext = config.script_ext();

        if config.has_feature(Feature::Routing) {
            files.push(GeneratedFile::new(
                format!("src/routes.{}", ext),
                "import App from './App.svelte';\n\nexport const routes = {\n  '/': App,\n};\n",
                FileKind::Entry,
            ));
            files.push(GeneratedFile::new(
                "src/Router.svelte",
                format!(
                    "{}\n  import Router from 'svelte-spa-router';\n  import {{ routes }} from './routes';\n</script>\n\n<Router {{routes}} />\n",
                    Self::script_open(config)
                ),
                FileKind::Entry,
            ));
        }

        if config.has_feature(Feature::StateManagement) {
            let error = if config.typescript {
                "writable<string | null>(null)"
            } else {
                "writable(null)"
            };
            files.push(GeneratedFile::new(
                format!("src/stores/app.{}", ext),
                format!(
                    "import {{ writable }} from 'svelte/store';\n\nexport const loading = writable(false);\nexport const error = {};\n",
                    error
                ),
                FileKind::Entry,
            ));
        }

        if config.has_feature(Feature::I18n) {
            files.push(GeneratedFile::new(
                format!("src/i18n.{}", ext),
                r#"import { addMessages, init } from 'svelte-i18n';
import en from './locales/en.json';

addMessages('en', en);

init({
  fallbackLocale: 'en',
  initialLocale: 'en',
});
"#,
                FileKind::Entry,
            ));
        }

        files
    }

    /// `svelte.config.js` for the Vite plugin, which vitest also loads.
    fn config_files(&self, config: &GenerationConfig) -> Result<Vec<GeneratedFile>> {
        if config.bundler != Bundler::Vite && !config.include_tests {
            return Ok(Vec::new());
        }
        let path = if is_esm(config) {
            "svelte.config.js"
        } else {
            "svelte.config.mjs"
        };
        Ok(vec![GeneratedFile::new(
            path,
            "import { vitePreprocess } from '@sveltejs/vite-plugin-svelte';\n\nexport default {\n  preprocess: vitePreprocess(),\n};\n",
            FileKind::Config,
        )])
    }

    fn packages(&self, config: &GenerationConfig) -> Packages {
        let mut packages = Packages::new();
        packages.dep("svelte");
        if config.typescript {
            packages.dev("svelte-check");
        }
        if config.has_feature(Feature::Routing) {
            packages.dep("svelte-spa-router");
        }
        if config.has_feature(Feature::I18n) {
            packages.dep("svelte-i18n");
        }
        packages
    }
}
