//! Vue 3 backend: single-file components with `<script setup>`.

use super::{quoted, CodeGenerator, ComponentUnit, FileKind, GeneratedFile};
use crate::bundler::{entry_script, host_page, mount_point, renders_on_server, server_entry};
use crate::deps::Packages;
use crate::emit::{
    css_inline, emit_element, escape_attr, js_single, single_quoted, EmitContext,
    Markup, Scope,
};
use crate::error::Result;
use crate::infer::{InferredProp, PropType};
use crate::scaffold::imports_stylesheet;
use indexmap::IndexMap;
use weft_core::{Feature, Framework, GenerationConfig, Optimization, PropValue, StylingStrategy};

/// Vue code generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct VueGenerator;

impl VueGenerator {
    pub fn new() -> Self {
        Self
    }

    /// `withDefaults` entry. Non-scalar defaults need a factory.
    fn default_entry(prop: &InferredProp) -> Option<String> {
        let value = prop.default.as_ref()?;
        let literal = js_single(value);
        Some(match value {
            PropValue::Structured(_) => format!("  {}: () => ({}),", prop.binding, literal),
            _ => format!("  {}: {},", prop.binding, literal),
        })
    }

    fn script_ts(unit: &ComponentUnit<'_>) -> Vec<String> {
        let mut lines = vec!["<script setup lang=\"ts\">".to_string()];
        if unit.interface.has(PropType::Style) {
            lines.push("import type { StyleValue } from 'vue';".to_string());
            lines.push(String::new());
        }

        lines.push("interface Props {".to_string());
        for prop in &unit.interface.props {
            let ty = match prop.ty {
                PropType::ClassName => "string | string[] | Record<string, boolean>",
                other => other.typescript(Framework::Vue),
            };
            lines.push(format!("  {}?: {};", prop.binding, ty));
        }
        lines.push("}".to_string());
        lines.push(String::new());

        let defaults: Vec<String> = unit.interface.props.iter().filter_map(Self::default_entry).collect();
        if defaults.is_empty() {
            lines.push("defineProps<Props>();".to_string());
        } else {
            lines.push("withDefaults(defineProps<Props>(), {".to_string());
            lines.extend(defaults);
            lines.push("});".to_string());
        }
        lines.push("</script>".to_string());
        lines
    }

    fn script_js(unit: &ComponentUnit<'_>) -> Vec<String> {
        let mut lines = vec!["<script setup>".to_string(), "defineProps({".to_string()];
        for prop in &unit.interface.props {
            let ty = match prop.ty {
                PropType::String => "String",
                PropType::Number => "Number",
                PropType::Boolean => "Boolean",
                PropType::Dynamic => "null",
                PropType::ClassName | PropType::Style => "[String, Array, Object]",
                PropType::Children => "null",
            };
            let default = match (&prop.default, prop.ty) {
                (Some(value @ PropValue::Structured(_)), _) => format!("() => ({})", js_single(value)),
                (Some(value), _) => js_single(value),
                (None, _) => "undefined".to_string(),
            };
            lines.push(format!("  {}: {{ type: {}, default: {} }},", prop.binding, ty, default));
        }
        lines.push("});".to_string());
        lines.push("</script>".to_string());
        lines
    }

    fn app_file(&self, units: &[ComponentUnit<'_>], config: &GenerationConfig) -> GeneratedFile {
        let lazy = config.optimizes(Optimization::LazyLoading) && !units.is_empty();
        let modules = config.styling_strategy == StylingStrategy::CssModules;

        let mut script = Vec::new();
        if lazy {
            script.push("import { defineAsyncComponent } from 'vue';".to_string());
        }
        if modules {
            script.push("import styles from './App.module.css';".to_string());
        }
        for unit in units {
            if lazy {
                script.push(format!(
                    "const {0} = defineAsyncComponent(() => import('./components/{0}.vue'));",
                    unit.ident()
                ));
            } else {
                script.push(format!("import {0} from './components/{0}.vue';", unit.ident()));
            }
        }

        let mut lines = Vec::new();
        if !script.is_empty() {
            lines.push(if config.typescript {
                "<script setup lang=\"ts\">".to_string()
            } else {
                "<script setup>".to_string()
            });
            lines.extend(script);
            lines.push("</script>".to_string());
            lines.push(String::new());
        }

        lines.push("<template>".to_string());
        let (open, close, inner) = if modules {
            ("  <div :class=\"styles.app\">", Some("  </div>"), "    ")
        } else {
            ("", None, "  ")
        };
        if !open.is_empty() {
            lines.push(open.to_string());
        }
        for unit in units {
            lines.push(format!("{}<{} />", inner, unit.ident()));
        }
        lines.extend(close.map(str::to_string));
        lines.push("</template>".to_string());
        lines.push(String::new());

        GeneratedFile::new("src/App.vue", lines.join("\n"), FileKind::Entry)
    }

    fn main_file(&self, config: &GenerationConfig) -> GeneratedFile {
        let create = if renders_on_server(config) { "createSSRApp" } else { "createApp" };
        let routing = config.has_feature(Feature::Routing);
        let mut imports = vec![format!("import {{ {} }} from 'vue';", create)];
        let mut uses = Vec::new();

        // With routing the router view is the root and App is the `/` route.
        if routing {
            imports.push("import { RouterView } from 'vue-router';".to_string());
            imports.push("import { router } from './router';".to_string());
            uses.push("app.use(router);");
        } else {
            imports.push("import App from './App.vue';".to_string());
        }
        if config.has_feature(Feature::StateManagement) {
            imports.push("import { createPinia } from 'pinia';".to_string());
            uses.push("app.use(createPinia());");
        }
        if config.has_feature(Feature::I18n) {
            imports.push("import { i18n } from './i18n';".to_string());
            uses.push("app.use(i18n);");
        }
        if imports_stylesheet(config) {
            imports.push("import './index.css';".to_string());
        }
        if config.has_feature(Feature::DarkMode) {
            imports.push("import { applyStoredTheme } from './darkMode';".to_string());
        }

        let mut lines = imports;
        lines.push(String::new());
        if config.has_feature(Feature::DarkMode) {
            lines.push("applyStoredTheme();".to_string());
            lines.push(String::new());
        }
        lines.push(format!(
            "const app = {}({});",
            create,
            if routing { "RouterView" } else { "App" }
        ));
        lines.extend(uses.into_iter().map(str::to_string));
        lines.push("app.mount('#app');".to_string());
        lines.push(String::new());

        GeneratedFile::new(entry_script(config), lines.join("\n"), FileKind::Entry)
    }

    fn server_entry_file(&self, config: &GenerationConfig) -> GeneratedFile {
        let signature = if config.typescript {
            "export async function render(_url: string): Promise<string> {"
        } else {
            "export async function render(_url) {"
        };
        let mut uses = String::new();
        let mut imports = String::new();
        if config.has_feature(Feature::StateManagement) {
            imports.push_str("import { createPinia } from 'pinia';\n");
            uses.push_str("  app.use(createPinia());\n");
        }
        if config.has_feature(Feature::I18n) {
            imports.push_str("import { i18n } from './i18n';\n");
            uses.push_str("  app.use(i18n);\n");
        }
        let content = format!(
            r#"import {{ createSSRApp }} from 'vue';
import {{ renderToString }} from 'vue/server-renderer';
{imports}import App from './App.vue';

{signature}
  const app = createSSRApp(App);
{uses}  return renderToString(app);
}}
"#,
            imports = imports,
            signature = signature,
            uses = uses,
        );
        GeneratedFile::new(server_entry(config), content, FileKind::Entry)
    }
}

impl Markup for VueGenerator {
    fn bound_attr(&self, name: &str, expr: &str) -> String {
        format!(":{}=\"{}\"", name, expr)
    }

    fn expr_literal(&self, value: &PropValue) -> String {
        js_single(value)
    }

    fn text_binding(&self, expr: &str) -> String {
        format!("{{{{ {} }}}}", expr)
    }


    fn class_attr(&self, authored: Option<&str>, scope: Scope<'_>) -> Option<String> {
        match (scope, authored) {
            (Scope::Component(_), Some(classes)) => {
                Some(format!(":class=\"[{}, className]\"", single_quoted(classes)))
            }
            (Scope::Component(_), None) => Some(":class=\"className\"".to_string()),
            (Scope::Nested, Some(classes)) => Some(self.literal_attr("class", classes)),
            (Scope::Nested, None) => None,
        }
    }

    fn style_attr(&self, style: &IndexMap<String, String>, scope: Scope<'_>) -> Option<String> {
        match scope {
            Scope::Component(_) if style.is_empty() => Some(":style=\"style\"".to_string()),
            Scope::Component(_) => {
                let entries: Vec<String> = style
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "{}: {}",
                            single_quoted(&crate::emit::css_property(k)),
                            single_quoted(v.trim())
                        )
                    })
                    .collect();
                Some(format!(":style=\"[style, {{ {} }}]\"", entries.join(", ")))
            }
            Scope::Nested if style.is_empty() => None,
            Scope::Nested => Some(format!("style=\"{}\"", escape_attr(&css_inline(style)))),
        }
    }

    fn child_slot(&self) -> Option<&'static str> {
        Some("<slot />")
    }
}

impl CodeGenerator for VueGenerator {
    fn framework(&self) -> Framework {
        Framework::Vue
    }

    fn generate_component(
        &self,
        unit: &ComponentUnit<'_>,
        ctx: &mut EmitContext<'_>,
    ) -> Result<GeneratedFile> {
        let config = ctx.config;
        let mut lines = if config.typescript {
            Self::script_ts(unit)
        } else {
            Self::script_js(unit)
        };
        lines.push(String::new());
        lines.push("<template>".to_string());
        lines.push(emit_element(self, ctx, unit.element, Scope::Component(&unit.interface), 1));
        lines.push("</template>".to_string());
        lines.push(String::new());

        tracing::debug!(component = unit.ident(), "emitted Vue component");
        Ok(GeneratedFile::new(
            format!("src/components/{}.vue", unit.ident()),
            lines.join("\n"),
            FileKind::Component,
        ))
    }

    fn generate_test(&self, unit: &ComponentUnit<'_>, ctx: &EmitContext<'_>) -> Option<GeneratedFile> {
        let name = unit.ident();
        let primitive = ctx.lookup(&unit.element.kind).primitive;
        let assertion = if primitive.renders_element() {
            vec![
                format!("    const {{ container }} = render({});", name),
                format!(
                    "    expect(container.querySelector({})).not.toBeNull();",
                    quoted(&primitive.tag)
                ),
            ]
        } else {
            vec![format!("    expect(() => render({})).not.toThrow();", name)]
        };

        let mut lines = vec![
            "import { render } from '@testing-library/vue';".to_string(),
            "import { describe, expect, it } from 'vitest';".to_string(),
            format!("import {0} from './{0}.vue';", name),
            String::new(),
            format!("describe({}, () => {{", quoted(name)),
            "  it('renders its root element', () => {".to_string(),
        ];
        lines.extend(assertion);
        lines.push("  });".to_string());
        lines.push("});".to_string());
        lines.push(String::new());

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
            let history = if renders_on_server(config) {
                "import.meta.env.SSR ? createMemoryHistory() : createWebHistory()"
            } else {
                "createWebHistory()"
            };
            let history_import = if renders_on_server(config) {
                "createMemoryHistory, createRouter, createWebHistory"
            } else {
                "createRouter, createWebHistory"
            };
            files.push(GeneratedFile::new(
                format!("src/router.{}", ext),
                format!(
                    r#"import {{ {} }} from 'vue-router';
import App from './App.vue';

export const router = createRouter({{
  history: {},
  routes: [{{ path: '/', component: App }}],
}});
"#,
                    history_import, history
                ),
                FileKind::Entry,
            ));
        }

        if config.has_feature(Feature::StateManagement) {
            let error = if config.typescript { "null as string | null" } else { "null" };
            let loading_param = if config.typescript { "loading: boolean" } else { "loading" };
            let error_param = if config.typescript { "error: string | null" } else { "error" };
            files.push(GeneratedFile::new(
                format!("src/stores/app.{}", ext),
                format!(
                    r#"import {{ defineStore }} from 'pinia';

export const useAppStore = defineStore('app', {{
  state: () => ({{
    loading: false,
    error: {error},
  }}),
  actions: {{
    setLoading({loading_param}) {{
      this.loading = loading;
    }},
    setError({error_param}) {{
      this.error = error;
    }},
  }},
}});
"#,
                    error = error,
                    loading_param = loading_param,
                    error_param = error_param,
                ),
                FileKind::Entry,
            ));
        }

        if config.has_feature(Feature::I18n) {
            files.push(GeneratedFile::new(
                format!("src/i18n.{}", ext),
                r#"import { createI18n } from 'vue-i18n';
import en from './locales/en.json';

export const i18n = createI18n({
  legacy: false,
  locale: 'en',
  fallbackLocale: 'en',
  messages: { en },
});
"#,
                FileKind::Entry,
            ));
        }

        files
    }

    fn packages(&self, config: &GenerationConfig) -> Packages {
        let mut packages = Packages::new();
        packages.dep("vue");
        if config.typescript {
            packages.dev("vue-tsc");
        }
        if config.has_feature(Feature::Routing) {
            packages.dep("vue-router");
        }
        if config.has_feature(Feature::StateManagement) {
            packages.dep("pinia");
        }
        if config.has_feature(Feature::I18n) {
            packages.dep("vue-i18n");
        }
        packages
    }
}
