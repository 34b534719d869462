//! Angular backend: standalone components with inline templates.

use super::{quoted, CodeGenerator, ComponentUnit, FileKind, GeneratedFile};
use crate::bundler::{entry_script, host_page};
use crate::deps::Packages;
use crate::emit::{css_property, emit_element, escape_attr, js_double, EmitContext, Markup, Scope};
use crate::error::Result;
use crate::infer::{PropType, STYLE_BINDING};
use crate::manifest::package_name;
use indexmap::IndexMap;
use serde_json::json;
use weft_core::{Feature, Framework, GenerationConfig, Optimization, PropValue};

/// Getter merging the caller's style with the authored declarations.
const MERGED_STYLE: &str = "rootStyle";

/// Angular code generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngularGenerator;

impl AngularGenerator {
    pub fn new() -> Self {
        Self
    }

    fn component_path(unit: &ComponentUnit<'_>) -> String {
        format!("src/app/components/{}.component.ts", unit.stem())
    }

    fn inputs(unit: &ComponentUnit<'_>) -> Vec<String> {
        unit.interface
            .props
            .iter()
            .map(|prop| {
                let decorator = if prop.binding == prop.name {
                    "@Input()".to_string()
                } else {
                    format!("@Input({})", quoted(&prop.name))
                };
                let (ty, default) = match prop.ty {
                    PropType::ClassName => ("string", "''".to_string()),
                    PropType::Style => ("Record<string, string>", "{}".to_string()),
                    other => (
                        other.typescript(Framework::Angular),
                        prop.default.as_ref().map(js_double).unwrap_or_else(|| "undefined".to_string()),
                    ),
                };
                format!("  {} {}: {} = {};", decorator, prop.binding, ty, default)
            })
            .collect()
    }

    /// `get rootStyle()` when the top-level element carries authored style.
    fn style_getter(style: &IndexMap<String, String>) -> Vec<String> {
        if style.is_empty() {
            return Vec::new();
        }
        let entries: Vec<String> = style
            .iter()
            .map(|(k, v)| format!("{}: {}", quoted(&css_property(k)), quoted(v.trim())))
            .collect();
        vec![
            String::new(),
            format!("  get {}(): Record<string, string> {{", MERGED_STYLE),
            format!("    return {{ ...this.{}, {} }};", STYLE_BINDING, entries.join(", ")),
            "  }".to_string(),
        ]
    }

    fn app_component(&self, units: &[ComponentUnit<'_>], config: &GenerationConfig) -> GeneratedFile {
        let routing = config.has_feature(Feature::Routing);
        let lazy = config.optimizes(Optimization::LazyLoading);

        let mut lines = vec!["import { Component } from '@angular/core';".to_string()];
        if routing {
            lines.push("import { RouterOutlet } from '@angular/router';".to_string());
        }
        for unit in units {
            lines.push(format!(
                "import {{ {} }} from './components/{}.component';",
                unit.ident(),
                unit.stem()
            ));
        }
        lines.push(String::new());

        let mut imports: Vec<&str> = units.iter().map(|u| u.ident()).collect();
        if routing {
            imports.push("RouterOutlet");
        }

        let mut template: Vec<String> = units
            .iter()
            .map(|u| {
                if lazy {
                    format!("    @defer {{ <app-{} /> }}", u.stem())
                } else {
                    format!("    <app-{} />", u.stem())
                }
            })
            .collect();
        if routing {
            template.push("    <router-outlet />".to_string());
        }

        lines.push("@Component({".to_string());
        lines.push("  selector: 'app-root',".to_string());
        lines.push("  standalone: true,".to_string());
        lines.push(format!("  imports: [{}],", imports.join(", ")));
        lines.push("  template: `".to_string());
        lines.extend(template);
        lines.push("  `,".to_string());
        lines.push("})".to_string());
        lines.push("export class AppComponent {}".to_string());
        lines.push(String::new());

        GeneratedFile::new("src/app/app.component.ts", lines.join("\n"), FileKind::Entry)
    }

    fn app_config(&self, config: &GenerationConfig) -> GeneratedFile {
        let pwa = config.has_feature(Feature::Pwa);
        let core = if pwa {
            "import { ApplicationConfig, isDevMode, provideZoneChangeDetection } from '@angular/core';"
        } else {
            "import { ApplicationConfig, provideZoneChangeDetection } from '@angular/core';"
        };
        let mut imports = vec![core.to_string()];
        let mut providers = vec!["    provideZoneChangeDetection({ eventCoalescing: true }),".to_string()];

        if config.has_feature(Feature::Routing) {
            imports.push("import { provideRouter } from '@angular/router';".to_string());
            imports.push("import { routes } from './app.routes';".to_string());
            providers.push("    provideRouter(routes),".to_string());
        }
        if config.has_feature(Feature::ApiIntegration) {
            imports.push("import { provideHttpClient } from '@angular/common/http';".to_string());
            providers.push("    provideHttpClient(),".to_string());
        }
        if pwa {
            imports.push("import { provideServiceWorker } from '@angular/service-worker';".to_string());
            providers.push("    provideServiceWorker('ngsw-worker.js', {".to_string());
            providers.push("      enabled: !isDevMode(),".to_string());
            providers.push("      registrationStrategy: 'registerWhenStable:30000',".to_string());
            providers.push("    }),".to_string());
        }

        let mut lines = imports;
        lines.push(String::new());
        lines.push("export const appConfig: ApplicationConfig = {".to_string());
        lines.push("  providers: [".to_string());
        lines.extend(providers);
        lines.push("  ],".to_string());
        lines.push("};".to_string());
        lines.push(String::new());

        GeneratedFile::new("src/app/app.config.ts", lines.join("\n"), FileKind::Entry)
    }

    fn main_file(&self, config: &GenerationConfig) -> GeneratedFile {
        let mut lines = vec![
            "import { bootstrapApplication } from '@angular/platform-browser';".to_string(),
            "import { AppComponent } from './app/app.component';".to_string(),
            "import { appConfig } from './app/app.config';".to_string(),
        ];
        if config.has_feature(Feature::DarkMode) {
            lines.push("import { applyStoredTheme } from './darkMode';".to_string());
            lines.push(String::new());
            lines.push("applyStoredTheme();".to_string());
        }
        lines.push(String::new());
        lines.push(
            "bootstrapApplication(AppComponent, appConfig).catch((err) => console.error(err));".to_string(),
        );
        lines.push(String::new());

        GeneratedFile::new(entry_script(config), lines.join("\n"), FileKind::Entry)
    }

    fn angular_json(&self, config: &GenerationConfig) -> Result<GeneratedFile> {
        let name = package_name(config);
        let pwa = config.has_feature(Feature::Pwa);

        let mut assets = vec![json!({ "glob": "**/*", "input": "public" })];
        if pwa {
            assets.push(json!("src/manifest.webmanifest"));
        }
        let mut build_options = json!({
            "outputPath": format!("dist/{}", name),
            "index": "src/index.html",
            "browser": "src/main.ts",
            "polyfills": ["zone.js"],
            "tsConfig": "tsconfig.app.json",
            "assets": assets,
            "styles": ["src/styles.css"],
        });
        if pwa {
            build_options["serviceWorker"] = json!("ngsw-config.json");
        }

        let mut architect = json!({
            "build": {
                "builder": "@angular-devkit/build-angular:application",
                "options": build_options,
                "configurations": {
                    "production": {
                        "outputHashing": "all",
                        "optimization": config.optimizes(Optimization::Minify),
                    },
                    "development": {
                        "optimization": false,
                        "extractLicenses": false,
                        "sourceMap": true,
                    },
                },
                "defaultConfiguration": "production",
            },
            "serve": {
                "builder": "@angular-devkit/build-angular:dev-server",
                "configurations": {
                    "production": { "buildTarget": format!("{}:build:production", name) },
                    "development": { "buildTarget": format!("{}:build:development", name) },
                },
                "defaultConfiguration": "development",
            },
        });
        if config.include_tests {
            architect["test"] = json!({
                "builder": "@angular-devkit/build-angular:karma",
                "options": {
                    "polyfills": ["zone.js", "zone.js/testing"],
                    "tsConfig": "tsconfig.spec.json",
                    "styles": ["src/styles.css"],
                },
            });
        }

        let mut projects = serde_json::Map::new();
        projects.insert(
            name,
            json!({
                "projectType": "application",
                "root": "",
                "sourceRoot": "src",
                "prefix": "app",
                "architect": architect,
            }),
        );
        let workspace = json!({
            "$schema": "./node_modules/@angular/cli/lib/config/schema.json",
            "version": 1,
            "newProjectRoot": "projects",
            "projects": projects,
        });
        Ok(GeneratedFile::new(
            "angular.json",
            serde_json::to_string_pretty(&workspace)? + "\n",
            FileKind::Config,
        ))
    }

    fn tsconfigs(&self, config: &GenerationConfig) -> Result<Vec<GeneratedFile>> {
        let base = json!({
            "compileOnSave": false,
            "compilerOptions": {
                "outDir": "./dist/out-tsc",
                "strict": true,
                "noImplicitOverride": true,
                "noImplicitReturns": true,
                "skipLibCheck": true,
                "esModuleInterop": true,
                "resolveJsonModule": true,
                "experimentalDecorators": true,
                "moduleResolution": "bundler",
                "importHelpers": true,
                "target": "ES2022",
                "module": "ES2022",
                "lib": ["ES2022", "dom"],
            },
            "angularCompilerOptions": {
                "strictInjectionParameters": true,
                "strictInputAccessModifiers": true,
                "strictTemplates": true,
            },
        });
        let app = json!({
            "extends": "./tsconfig.json",
            "compilerOptions": { "outDir": "./out-tsc/app", "types": [] },
            "files": ["src/main.ts"],
            "include": ["src/**/*.d.ts"],
        });

        let mut files = vec![
            GeneratedFile::new("tsconfig.json", serde_json::to_string_pretty(&base)? + "\n", FileKind::Config),
            GeneratedFile::new("tsconfig.app.json", serde_json::to_string_pretty(&app)? + "\n", FileKind::Config),
        ];
        if config.include_tests {
            let spec = json!({
                "extends": "./tsconfig.json",
                "compilerOptions": { "outDir": "./out-tsc/spec", "types": ["jasmine"] },
                "include": ["src/**/*.spec.ts", "src/**/*.d.ts"],
            });
            files.push(GeneratedFile::new(
                "tsconfig.spec.json",
                serde_json::to_string_pretty(&spec)? + "\n",
                FileKind::Config,
            ));
        }
        Ok(files)
    }
}

/// Escape markup for embedding in a TypeScript template literal.
fn template_literal(s: &str) -> String {
    s.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${")
}

/// Single-quoted string for Angular expressions. The expression lexer only
/// understands `\u` escapes, so braces and quotes are spelled that way.
fn expr_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '"' | '{' | '}' | '<' | '&' | '@' | '`' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn expr_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => expr_string(s),
        serde_json::Value::Array(items) => {
            format!("[{}]", items.iter().map(expr_value).collect::<Vec<_>>().join(", "))
        }
        serde_json::Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", expr_string(k), expr_value(v)))
                .collect();
            format!("{{ {} }}", entries.join(", "))
        }
        other => other.to_string(),
    }
}

impl Markup for AngularGenerator {
    fn literal_attr(&self, name: &str, value: &str) -> String {
        if value.contains("{{") {
            self.bound_attr(name, &expr_string(value))
        } else {
            format!("{}=\"{}\"", name, escape_attr(value))
        }
    }

    fn bound_attr(&self, name: &str, expr: &str) -> String {
        format!("[attr.{}]=\"{}\"", name, expr)
    }

    fn prop_attr(&self, name: &str, binding: &str, ty: PropType) -> String {
        match ty {
            PropType::Boolean => self.bound_attr(name, &format!("{} || null", binding)),
            _ => self.bound_attr(name, binding),
        }
    }

    fn value_attr(&self, name: &str, value: &PropValue) -> Option<String> {
        match value {
            PropValue::Boolean(true) => Some(name.to_string()),
            PropValue::Boolean(false) => None,
            PropValue::String(s) => Some(self.literal_attr(name, s)),
            other => Some(self.bound_attr(name, &self.expr_literal(other))),
        }
    }

    fn expr_literal(&self, value: &PropValue) -> String {
        match value {
            PropValue::String(s) => expr_string(s),
            PropValue::Number(n) => weft_core::format_number(*n),
            PropValue::Boolean(b) => b.to_string(),
            PropValue::Structured(v) => expr_value(v),
        }
    }

    fn text_binding(&self, expr: &str) -> String {
        format!("{{{{ {} }}}}", expr)
    }


    fn class_attr(&self, authored: Option<&str>, scope: Scope<'_>) -> Option<String> {
        match (scope, authored) {
            (Scope::Component(_), Some(classes)) => {
                Some(format!("[ngClass]=\"[{}, className]\"", expr_string(classes)))
            }
            (Scope::Component(_), None) => Some("[ngClass]=\"className\"".to_string()),
            (Scope::Nested, Some(classes)) => Some(self.literal_attr("class", classes)),
            (Scope::Nested, None) => None,
        }
    }

    fn style_attr(&self, style: &IndexMap<String, String>, scope: Scope<'_>) -> Option<String> {
        match scope {
            Scope::Component(_) if style.is_empty() => Some(format!("[ngStyle]=\"{}\"", STYLE_BINDING)),
            Scope::Component(_) => Some(format!("[ngStyle]=\"{}\"", MERGED_STYLE)),
            Scope::Nested if style.is_empty() => None,
            Scope::Nested => Some(self.literal_attr("style", &crate::emit::css_inline(style))),
        }
    }

    fn child_slot(&self) -> Option<&'static str> {
        Some("<ng-content />")
    }
}

impl CodeGenerator for AngularGenerator {
    fn framework(&self) -> Framework {
        Framework::Angular
    }

    fn generate_component(
        &self,
        unit: &ComponentUnit<'_>,
        ctx: &mut EmitContext<'_>,
    ) -> Result<GeneratedFile> {
        let markup = emit_element(self, ctx, unit.element, Scope::Component(&unit.interface), 2);

        let mut lines = vec![
            "import { Component, Input } from '@angular/core';".to_string(),
            "import { NgClass, NgStyle } from '@angular/common';".to_string(),
            String::new(),
            "@Component({".to_string(),
            format!("  selector: 'app-{}',", unit.stem()),
            "  standalone: true,".to_string(),
            "  imports: [NgClass, NgStyle],".to_string(),
            "  template: `".to_string(),
            template_literal(&markup),
            "  `,".to_string(),
            "})".to_string(),
            format!("export class {} {{", unit.ident()),
        ];
        lines.extend(Self::inputs(unit));
        lines.extend(Self::style_getter(&unit.element.style));
        lines.push("}".to_string());
        lines.push(String::new());

        tracing::debug!(component = unit.ident(), "emitted Angular component");
        Ok(GeneratedFile::new(Self::component_path(unit), lines.join("\n"), FileKind::Component))
    }

    fn generate_test(&self, unit: &ComponentUnit<'_>, ctx: &EmitContext<'_>) -> Option<GeneratedFile> {
        let name = unit.ident();
        let primitive = ctx.lookup(&unit.element.kind).primitive;
        let assertion = if primitive.renders_element() {
            vec![
                "    const root: HTMLElement = fixture.nativeElement;".to_string(),
                format!("    expect(root.querySelector({})).not.toBeNull();", quoted(&primitive.tag)),
            ]
        } else {
            vec!["    expect(fixture.componentInstance).toBeTruthy();".to_string()]
        };

        let mut lines = vec![
            "import { ComponentFixture, TestBed } from '@angular/core/testing';".to_string(),
            format!("import {{ {} }} from './{}.component';", name, unit.stem()),
            String::new(),
            format!("describe({}, () => {{", quoted(name)),
            format!("  let fixture: ComponentFixture<{}>;", name),
            String::new(),
            "  beforeEach(async () => {".to_string(),
            "    await TestBed.configureTestingModule({".to_string(),
            format!("      imports: [{}],", name),
            "    }).compileComponents();".to_string(),
            String::new(),
            format!("    fixture = TestBed.createComponent({});", name),
            "    fixture.detectChanges();".to_string(),
            "  });".to_string(),
            String::new(),
            "  it('renders its root element', () => {".to_string(),
        ];
        lines.extend(assertion);
        lines.push("  });".to_string());
        lines.push("});".to_string());
        lines.push(String::new());

        Some(GeneratedFile::new(
            format!("src/app/components/{}.component.spec.ts", unit.stem()),
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
        Ok(vec![
            self.app_component(units, config),
            self.app_config(config),
            self.main_file(config),
            host_page(config, "    <app-root></app-root>"),
        ])
    }

    fn feature_files(&self, _units: &[ComponentUnit<'_>], config: &GenerationConfig) -> Vec<GeneratedFile> {
        let mut files = Vec::new();

        if config.has_feature(Feature::Routing) {
            files.push(GeneratedFile::new(
                "src/app/app.routes.ts",
                "import { Routes } from '@angular/router';\n\nexport const routes: Routes = [];\n",
                FileKind::Entry,
            ));
        }

        if config.has_feature(Feature::StateManagement) {
            files.push(GeneratedFile::new(
                "src/app/app-state.service.ts",
                r#"import { Injectable, signal } from '@angular/core';

@Injectable({ providedIn: 'root' })
export class AppStateService {
  readonly loading = signal(false);
  readonly error = signal<string | null>(null);

  setLoading(loading: boolean): void {
    this.loading.set(loading);
  }

  setError(error: string | null): void {
    this.error.set(error);
  }
}
"#,
                FileKind::Entry,
            ));
        }

        if config.has_feature(Feature::I18n) {
            files.push(GeneratedFile::new(
                "src/app/i18n.service.ts",
                r#"import { Injectable, signal } from '@angular/core';
import en from '../locales/en.json';

@Injectable({ providedIn: 'root' })
export class I18nService {
  private readonly messages = signal<Record<string, string>>(en);

  t(key: string): string {
    return this.messages()[key] ?? key;
  }
}
"#,
                FileKind::Entry,
            ));
        }

        if config.has_feature(Feature::ApiIntegration) {
            files.push(GeneratedFile::new(
                "src/app/api.service.ts",
                r#"import { HttpClient } from '@angular/common/http';
import { Injectable, inject } from '@angular/core';
import { Observable } from 'rxjs';

@Injectable({ providedIn: 'root' })
export class ApiService {
  private readonly http = inject(HttpClient);
  private readonly baseUrl = '/api';

  get<T>(path: string): Observable<T> {
    return this.http.get<T>(`${this.baseUrl}${path}`);
  }

  post<T>(path: string, body: unknown): Observable<T> {
    return this.http.post<T>(`${this.baseUrl}${path}`, body);
  }
}
"#,
                FileKind::Entry,
            ));
        }

        if config.has_feature(Feature::Pwa) {
            files.push(GeneratedFile::new(
                "ngsw-config.json",
                r#"{
  "$schema": "./node_modules/@angular/service-worker/config/schema.json",
  "index": "/index.html",
  "assetGroups": [
    {
      "name": "app",
      "installMode": "prefetch",
      "resources": {
        "files": ["/favicon.ico", "/index.html", "/manifest.webmanifest", "/*.css", "/*.js"]
      }
    }
  ]
}
"#,
                FileKind::Config,
            ));
        }

        files
    }

    fn config_files(&self, config: &GenerationConfig) -> Result<Vec<GeneratedFile>> {
        let mut files = vec![self.angular_json(config)?];
        files.extend(self.tsconfigs(config)?);
        Ok(files)
    }

    fn packages(&self, config: &GenerationConfig) -> Packages {
        let mut packages = Packages::new();
        packages
            .deps(&[
                "@angular/common",
                "@angular/compiler",
                "@angular/core",
                "@angular/platform-browser",
                "rxjs",
                "tslib",
                "zone.js",
            ])
            .dev("@angular/compiler-cli");
        if config.has_feature(Feature::Routing) {
            packages.dep("@angular/router");
        }
        if config.has_feature(Feature::Pwa) {
            packages.dep("@angular/service-worker");
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

    fn component(element: &Element) -> String {
        let config = GenerationConfig::for_framework(Framework::Angular);
        let rules = ResponsiveRules::tailwind().unwrap();
        let mut ctx = EmitContext::new(&config, AngularGenerator.tag_table(), &rules);
        let interface = PropInferencer::new(Framework::Angular, true).infer(element, &mut Vec::new());
        let unit = ComponentUnit {
            element,
            name: name_components(std::slice::from_ref(element)).remove(0),
            interface,
        };
        AngularGenerator.generate_component(&unit, &mut ctx).unwrap().content
    }

    #[test]
    fn test_button_component() {
        let element = Element::new("b", "button")
            .with_prop("text", "Buy")
            .with_prop("disabled", false)
            .with_style("padding", "8px");
        insta::assert_snapshot!(component(&element), @r###"
        import { Component, Input } from '@angular/core';
        import { NgClass, NgStyle } from '@angular/common';

        @Component({
          selector: 'app-button',
          standalone: true,
          imports: [NgClass, NgStyle],
          template: `
            <button [ngClass]="className" [ngStyle]="rootStyle" type="button" [attr.disabled]="disabled || null">{{ text }}</button>
          `,
        })
        export class ButtonComponent {
          @Input() text: string = "Buy";
          @Input() disabled: boolean = false;
          @Input() className: string = '';
          @Input() style: Record<string, string> = {};

          get rootStyle(): Record<string, string> {
            return { ...this.style, 'padding': '8px' };
          }
        }
        "###);
    }

    #[test]
    fn test_template_syntax_in_text_is_escaped() {
        let element = Element::new("c", "container")
            .with_child(Element::new("t", "text").with_prop("text", "mail me @ {home}"))
            .with_child(Element::new("l", "link").with_prop("title", "`${x}`"));
        let code = component(&element);
        assert!(code.contains(r"<p>{{ 'mail me \\u0040 \\u007bhome\\u007d' }}</p>"));
        assert!(code.contains(r#"<a title="\`\${x}\`"></a>"#));
        assert!(code.contains("      <ng-content />"));
        assert!(!code.contains("children"));
    }

    #[test]
    fn test_non_identifier_input_is_aliased() {
        let element = Element::new("n", "navbar").with_prop("aria-label", "Main");
        let code = component(&element);
        assert!(code.contains(r#"@Input('aria-label') ariaLabel: string = "Main";"#));
        assert!(code.contains(r#"[attr.aria-label]="ariaLabel""#));
    }

    #[test]
    fn test_angular_json_uses_package_name() {
        let config = GenerationConfig {
            project_name: "Shop Front".to_string(),
            ..GenerationConfig::for_framework(Framework::Angular)
        }
        .with_feature(Feature::Pwa);
        let file = AngularGenerator.angular_json(&config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&file.content).unwrap();
        let build = &value["projects"]["shop-front"]["architect"]["build"]["options"];
        assert_eq!(build["outputPath"], "dist/shop-front");
        assert_eq!(build["serviceWorker"], "ngsw-config.json");
    }

    #[test]
    fn test_app_component_defers_when_lazy() {
        let elements = vec![Element::new("h", "heading")];
        let units = vec![ComponentUnit {
            element: &elements[0],
            name: name_components(&elements).remove(0),
            interface: Default::default(),
        }];
        let config = GenerationConfig::for_framework(Framework::Angular)
            .with_optimization(Optimization::LazyLoading)
            .with_feature(Feature::Routing);
        let app = AngularGenerator.app_component(&units, &config);
        assert!(app.content.contains("    @defer { <app-heading /> }"));
        assert!(app.content.contains("imports: [HeadingComponent, RouterOutlet],"));
        assert!(app.content.contains("    <router-outlet />"));
    }
}
