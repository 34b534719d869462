//! Package manifest, TypeScript configuration and README.

use crate::bundler::out_dir;
use crate::deps::{needs_server, ResolvedDependencies};
use crate::error::Result;
use crate::generators::{ComponentUnit, FileKind, GeneratedFile, TemplateEngine};
use crate::scaffold::is_esm;
use convert_case::{Case, Casing};
use indexmap::IndexMap;
use serde_json::{json, Value};
use weft_core::{Bundler, DeploymentTarget, Feature, Framework, GenerationConfig};

/// npm package name for the project.
pub fn package_name(config: &GenerationConfig) -> String {
    let cleaned: String = config
        .project_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let name = cleaned.to_case(Case::Kebab);
    if name.is_empty() {
        "weft-app".to_string()
    } else {
        name
    }
}

/// `package.json`.
pub fn package_json(
    config: &GenerationConfig,
    deps: &ResolvedDependencies,
    scripts: &IndexMap<String, String>,
) -> Result<GeneratedFile> {
    let mut manifest = json!({
        "name": package_name(config),
        "private": true,
        "version": "0.1.0",
    });
    if is_esm(config) {
        manifest["type"] = json!("module");
    }
    manifest["scripts"] = serde_json::to_value(scripts)?;
    manifest["dependencies"] = serde_json::to_value(&deps.dependencies)?;
    manifest["devDependencies"] = serde_json::to_value(&deps.dev_dependencies)?;

    let content = serde_json::to_string_pretty(&manifest)? + "\n";
    Ok(GeneratedFile::new("package.json", content, FileKind::Config))
}

/// `tsconfig.json` for Vite-style projects. Angular ships its own.
pub fn tsconfig(config: &GenerationConfig) -> Result<Option<GeneratedFile>> {
    if !config.typescript || config.framework == Framework::Angular {
        return Ok(None);
    }

    let mut options = json!({
        "target": "ES2020",
        "useDefineForClassFields": true,
        "lib": ["ES2020", "DOM", "DOM.Iterable"],
        "module": "ESNext",
        "moduleResolution": "bundler",
        "skipLibCheck": true,
        "resolveJsonModule": true,
        "isolatedModules": true,
        "strict": true,
    });
    // ts-loader needs to emit.
    if config.bundler != Bundler::Webpack {
        options["noEmit"] = json!(true);
    }
    match config.framework {
        Framework::React => options["jsx"] = json!("react-jsx"),
        Framework::Vue => options["jsx"] = json!("preserve"),
        Framework::Svelte => options["verbatimModuleSyntax"] = json!(true),
        Framework::Angular | Framework::Html => {}
    }
    if config.include_tests && config.framework != Framework::Html {
        options["types"] = json!(["vitest/globals", "@testing-library/jest-dom"]);
    }

    let include = match config.framework {
        Framework::Vue => json!(["src/**/*.ts", "src/**/*.vue"]),
        Framework::Svelte => json!(["src/**/*.ts", "src/**/*.svelte"]),
        _ => json!(["src"]),
    };
    let tsconfig = json!({ "compilerOptions": options, "include": include });
    let content = serde_json::to_string_pretty(&tsconfig)? + "\n";
    Ok(Some(GeneratedFile::new("tsconfig.json", content, FileKind::Config)))
}

/// Ambient declarations for assets the bundler resolves.
pub fn env_declarations(config: &GenerationConfig) -> Option<GeneratedFile> {
    if !config.typescript || config.framework == Framework::Angular {
        return None;
    }

    let mut lines = Vec::new();
    if config.bundler == Bundler::Vite {
        lines.push("/// <reference types=\"vite/client\" />".to_string());
        if config.framework == Framework::Svelte {
            lines.push("/// <reference types=\"svelte\" />".to_string());
        }
    } else {
        lines.push("declare module '*.module.css' {".to_string());
        lines.push("  const classes: Record<string, string>;".to_string());
        lines.push("  export default classes;".to_string());
        lines.push("}".to_string());
        lines.push(String::new());
        lines.push("declare module '*.css';".to_string());
    }
    if config.framework == Framework::Vue {
        lines.push(String::new());
        lines.push("declare module '*.vue' {".to_string());
        lines.push("  import type { DefineComponent } from 'vue';".to_string());
        lines.push("  const component: DefineComponent<object, object, unknown>;".to_string());
        lines.push("  export default component;".to_string());
        lines.push("}".to_string());
    }
    lines.push(String::new());

    Some(GeneratedFile::new("src/env.d.ts", lines.join("\n"), FileKind::Config))
}

const README_TEMPLATE: &str = r#"# {{name}}

{{framework}} project generated by Weft ({{language}}, {{styling}} styling, built with {{bundler}}).

## Getting started

```bash
npm install
npm run {{dev}}
```

## Scripts

{{scripts}}

## Components

{{components}}

## Configuration

- Features: {{features}}
- Optimizations: {{optimizations}}
- Deployment: {{deployment}}

{{deploy_notes}}
"#;

/// README summarising install, run and deploy instructions.
pub fn readme(
    engine: &TemplateEngine<'_>,
    config: &GenerationConfig,
    units: &[ComponentUnit<'_>],
    scripts: &IndexMap<String, String>,
) -> Result<String> {
    let script_list = scripts
        .iter()
        .map(|(name, command)| format!("- `npm run {}`: `{}`", name, command))
        .collect::<Vec<_>>()
        .join("\n");

    let components = if units.is_empty() {
        "No components.".to_string()
    } else {
        units
            .iter()
            .map(|u| format!("- `{}` (from `{}` element `{}`)", u.ident(), u.element.kind, u.element.id))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let features = if config.features.is_empty() {
        "none".to_string()
    } else {
        config
            .features
            .iter()
            .map(Feature::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let dev = if config.bundler == Bundler::AngularCli { "start" } else { "dev" };

    let data: Value = json!({
        "name": config.project_name,
        "framework": config.framework.display_name(),
        "language": if config.typescript { "TypeScript" } else { "JavaScript" },
        "styling": config.styling_strategy.as_str(),
        "bundler": config.bundler.as_str(),
        "dev": dev,
        "scripts": script_list,
        "components": components,
        "features": features,
        "optimizations": crate::bundler::optimization_summary(config),
        "deployment": config.deployment_target.as_str(),
        "deploy_notes": deploy_notes(config),
    });

    engine.render_string(README_TEMPLATE, &data)
}

fn deploy_notes(config: &GenerationConfig) -> String {
    let build = crate::scaffold::build_command(config);
    match config.deployment_target {
        DeploymentTarget::Static => format!(
            "Run `{}` and upload the contents of `{}` to any static host.",
            build,
            out_dir(config)
        ),
        DeploymentTarget::Vercel => "Deploy with `vercel deploy`; build settings are in `vercel.json`.".to_string(),
        DeploymentTarget::Netlify => {
            "Deploy with `netlify deploy`; build settings are in `netlify.toml`.".to_string()
        }
        DeploymentTarget::Node => {
            let serve = if config.has_feature(Feature::Ssr) { "serve:ssr" } else { "serve" };
            format!("Run `{}`, then start the server with `npm run {}`.", build, serve)
        }
        DeploymentTarget::Docker => {
            let ports = if needs_server(config) { "3000:3000" } else { "8080:80" };
            let image = package_name(config);
            format!(
                "```bash\ndocker build -t {image} .\ndocker run -p {ports} {image}\n```",
                image = image,
                ports = ports
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::{resolve, Packages};

    #[test]
    fn test_package_name_is_kebab() {
        let config = GenerationConfig {
            project_name: "My Shop App".to_string(),
            ..GenerationConfig::default()
        };
        assert_eq!(package_name(&config), "my-shop-app");
        let config = GenerationConfig {
            project_name: "!!".to_string(),
            ..GenerationConfig::default()
        };
        assert_eq!(package_name(&config), "weft-app");
    }

    #[test]
    fn test_package_json_key_order() {
        let config = GenerationConfig::default();
        let mut base = Packages::new();
        base.deps(&["react", "react-dom"]);
        let deps = resolve(base, &config);
        let scripts = crate::bundler::scripts(&config);
        let file = package_json(&config, &deps, &scripts).unwrap();

        let value: Value = serde_json::from_str(&file.content).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["name", "private", "version", "type", "scripts", "dependencies", "devDependencies"]
        );
        assert_eq!(value["dependencies"]["react"], "^18.3.1");
    }

    #[test]
    fn test_tsconfig_per_framework() {
        let file = tsconfig(&GenerationConfig::default()).unwrap().unwrap();
        assert!(file.content.contains("\"jsx\": \"react-jsx\""));
        assert!(file.content.contains("\"noEmit\": true"));

        let config = GenerationConfig::for_framework(Framework::Vue).with_bundler(Bundler::Webpack);
        let file = tsconfig(&config).unwrap().unwrap();
        assert!(!file.content.contains("noEmit"));
        assert!(file.content.contains("src/**/*.vue"));

        assert!(tsconfig(&GenerationConfig::default().with_typescript(false)).unwrap().is_none());
        assert!(tsconfig(&GenerationConfig::for_framework(Framework::Angular)).unwrap().is_none());
    }

    #[test]
    fn test_readme_lists_scripts_and_components() {
        let engine = TemplateEngine::new();
        let config = GenerationConfig::default().with_deployment(DeploymentTarget::Docker);
        let scripts = crate::bundler::scripts(&config);
        let element = weft_core::Element::new("h1", "heading");
        let units = vec![ComponentUnit {
            element: &element,
            name: crate::naming::name_components(std::slice::from_ref(&element)).remove(0),
            interface: Default::default(),
        }];
        let readme = readme(&engine, &config, &units, &scripts).unwrap();

        assert!(readme.starts_with("# weft-app\n"));
        assert!(readme.contains("- `npm run dev`: `vite`"));
        assert!(readme.contains("- `HeadingComponent` (from `heading` element `h1`)"));
        assert!(readme.contains("docker run -p 8080:80 weft-app"));
    }
}
