//! Framework-independent project files: styling setup, shared feature
//! modules and deployment descriptors.

use crate::bundler::{out_dir, renders_on_server};
use crate::deps::needs_server;
use crate::error::Result;
use crate::generators::{FileKind, GeneratedFile};
use serde_json::json;
use weft_core::{Bundler, DeploymentTarget, Element, Feature, Framework, GenerationConfig, StylingStrategy};

/// Global stylesheet path.
pub fn stylesheet_path(config: &GenerationConfig) -> &'static str {
    match config.framework {
        Framework::Angular => "src/styles.css",
        _ => "src/index.css",
    }
}

/// Whether the bootstrap script imports the global stylesheet.
/// Angular lists it in `angular.json`; styled-components injects its own.
pub fn imports_stylesheet(config: &GenerationConfig) -> bool {
    config.framework != Framework::Angular
        && config.styling_strategy != StylingStrategy::StyledComponents
}

/// Whether the emitted package is an ES module package (`"type": "module"`).
pub fn is_esm(config: &GenerationConfig) -> bool {
    !matches!(config.bundler, Bundler::Webpack | Bundler::AngularCli)
}

/// Command that produces the deployable output.
pub fn build_command(config: &GenerationConfig) -> &'static str {
    if config.has_feature(Feature::Ssg) {
        "npm run build && npm run prerender"
    } else {
        "npm run build"
    }
}

const RESET_CSS: &str = r#"*,
*::before,
*::after {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif;
  line-height: 1.5;
}

img,
video {
  max-width: 100%;
  display: block;
}
"#;

const DARK_CSS: &str = r#"
.dark body {
  background-color: #0f172a;
  color: #f8fafc;
}
"#;

/// Styling setup for the strategy.
pub fn styling_files(config: &GenerationConfig) -> Vec<GeneratedFile> {
    let mut files = Vec::new();
    let dark = config.has_feature(Feature::DarkMode);

    match config.styling_strategy {
        StylingStrategy::UtilityClasses => {
            files.push(GeneratedFile::new(
                "tailwind.config.js",
                tailwind_config(config),
                FileKind::Config,
            ));
            if !matches!(config.bundler, Bundler::AngularCli | Bundler::Esbuild) {
                let body = "{\n  plugins: {\n    tailwindcss: {},\n    autoprefixer: {},\n  },\n};\n";
                let content = if is_esm(config) {
                    format!("export default {}", body)
                } else {
                    format!("module.exports = {}", body)
                };
                files.push(GeneratedFile::new("postcss.config.js", content, FileKind::Config));
            }
            files.push(GeneratedFile::new(
                stylesheet_path(config),
                "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n",
                FileKind::Style,
            ));
        }
        StylingStrategy::CssModules => {
            files.push(GeneratedFile::new(
                "src/App.module.css",
                ".app {\n  display: flex;\n  flex-direction: column;\n  min-height: 100vh;\n}\n",
                FileKind::Style,
            ));
            files.push(reset_stylesheet(config, dark));
        }
        StylingStrategy::StyledComponents => {
            let ext = config.script_ext();
            files.push(GeneratedFile::new(
                format!("src/styles/theme.{}", ext),
                styled_theme(config),
                FileKind::Style,
            ));
            files.push(GeneratedFile::new(
                format!("src/styles/GlobalStyle.{}", ext),
                global_style(dark),
                FileKind::Style,
            ));
        }
        StylingStrategy::Inline => files.push(reset_stylesheet(config, dark)),
    }
    files
}

fn reset_stylesheet(config: &GenerationConfig, dark: bool) -> GeneratedFile {
    let mut css = RESET_CSS.to_string();
    if dark {
        css.push_str(DARK_CSS);
    }
    GeneratedFile::new(stylesheet_path(config), css, FileKind::Style)
}

fn tailwind_config(config: &GenerationConfig) -> String {
    let content = match config.framework {
        Framework::React => "['./index.html', './src/**/*.{js,ts,jsx,tsx}']",
        Framework::Vue => "['./index.html', './src/**/*.{vue,js,ts}']",
        Framework::Svelte => "['./index.html', './src/**/*.{svelte,js,ts}']",
        Framework::Angular => "['./src/**/*.{html,ts}']",
        Framework::Html => "['./index.html', './src/**/*.{html,js,ts}']",
    };
    let export = if is_esm(config) { "export default" } else { "module.exports =" };

    let mut lines = vec![
        "/** @type {import('tailwindcss').Config} */".to_string(),
        format!("{} {{", export),
        format!("  content: {},", content),
    ];
    if config.has_feature(Feature::DarkMode) {
        lines.push("  darkMode: 'class',".to_string());
    }
    lines.push("  theme: {".to_string());
    lines.push("    extend: {},".to_string());
    lines.push("  },".to_string());
    lines.push("  plugins: [],".to_string());
    lines.push("};".to_string());
    lines.push(String::new());
    lines.join("\n")
}

fn styled_theme(config: &GenerationConfig) -> String {
    let mut out = String::from(
        r#"export const theme = {
  colors: {
    background: '#ffffff',
    foreground: '#0f172a',
    primary: '#2563eb',
    muted: '#64748b',
  },
  breakpoints: {
    sm: '640px',
    md: '768px',
    lg: '1024px',
    xl: '1280px',
  },
  spacing: (factor: number) => `${factor * 0.25}rem`,
};
"#,
    );
    if config.typescript {
        out.push_str("\nexport type Theme = typeof theme;\n");
    } else {
        out = out.replace("(factor: number)", "(factor)");
    }
    if config.has_feature(Feature::DarkMode) {
        out.push_str(
            r#"
export const darkTheme = {
  ...theme,
  colors: {
    ...theme.colors,
    background: '#0f172a',
    foreground: '#f8fafc',
  },
};
"#,
        );
    }
    out
}

fn global_style(dark: bool) -> String {
    let mut css = RESET_CSS.to_string();
    if dark {
        css.push_str(DARK_CSS);
    }
    let body = css
        .lines()
        .map(|line| if line.is_empty() { String::new() } else { format!("  {}", line) })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "import {{ createGlobalStyle }} from 'styled-components';\n\nexport const GlobalStyle = createGlobalStyle`\n{}\n`;\n",
        body
    )
}

const DARK_MODE_TS: &str = r#"const STORAGE_KEY = 'theme';

export function setDarkMode(enabled: boolean): void {
  document.documentElement.classList.toggle('dark', enabled);
  localStorage.setItem(STORAGE_KEY, enabled ? 'dark' : 'light');
}

export function applyStoredTheme(): void {
  const stored = localStorage.getItem(STORAGE_KEY);
  const prefersDark = window.matchMedia('(prefers-color-scheme: dark)').matches;
  setDarkMode(stored ? stored === 'dark' : prefersDark);
}

export function toggleDarkMode(): boolean {
  const enabled = !document.documentElement.classList.contains('dark');
  setDarkMode(enabled);
  return enabled;
}
"#;

const DARK_MODE_JS: &str = r#"const STORAGE_KEY = 'theme';

export function setDarkMode(enabled) {
  document.documentElement.classList.toggle('dark', enabled);
  localStorage.setItem(STORAGE_KEY, enabled ? 'dark' : 'light');
}

export function applyStoredTheme() {
  const stored = localStorage.getItem(STORAGE_KEY);
  const prefersDark = window.matchMedia('(prefers-color-scheme: dark)').matches;
  setDarkMode(stored ? stored === 'dark' : prefersDark);
}

export function toggleDarkMode() {
  const enabled = !document.documentElement.classList.contains('dark');
  setDarkMode(enabled);
  return enabled;
}
"#;

const API_CLIENT_TS: &str = r#"export class ApiError extends Error {
  constructor(
    public readonly status: number,
    message: string,
  ) {
    super(message);
  }
}

let baseUrl = '/api';

export function setBaseUrl(url: string): void {
  baseUrl = url.replace(/\/$/, '');
}

export async function request<T>(path: string, init: RequestInit = {}): Promise<T> {
  const response = await fetch(`${baseUrl}${path}`, {
    ...init,
    headers: { 'Content-Type': 'application/json', ...init.headers },
  });
  if (!response.ok) {
    throw new ApiError(response.status, await response.text());
  }
  return (await response.json()) as T;
}

export const api = {
  get: <T>(path: string) => request<T>(path),
  post: <T>(path: string, body: unknown) =>
    request<T>(path, { method: 'POST', body: JSON.stringify(body) }),
  put: <T>(path: string, body: unknown) =>
    request<T>(path, { method: 'PUT', body: JSON.stringify(body) }),
  delete: <T>(path: string) => request<T>(path, { method: 'DELETE' }),
};
"#;

const API_CLIENT_JS: &str = r#"export class ApiError extends Error {
  constructor(status, message) {
    super(message);
    this.status = status;
  }
}

let baseUrl = '/api';

export function setBaseUrl(url) {
  baseUrl = url.replace(/\/$/, '');
}

export async function request(path, init = {}) {
  const response = await fetch(`${baseUrl}${path}`, {
    ...init,
    headers: { 'Content-Type': 'application/json', ...init.headers },
  });
  if (!response.ok) {
    throw new ApiError(response.status, await response.text());
  }
  return response.json();
}

export const api = {
  get: (path) => request(path),
  post: (path, body) => request(path, { method: 'POST', body: JSON.stringify(body) }),
  put: (path, body) => request(path, { method: 'PUT', body: JSON.stringify(body) }),
  delete: (path) => request(path, { method: 'DELETE' }),
};
"#;

/// Path of the locale file built from authored text.
pub const LOCALE_PATH: &str = "src/locales/en.json";

/// Feature modules shared by every framework.
pub fn feature_files(elements: &[Element], config: &GenerationConfig) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::new();
    let ext = config.script_ext();
    let ts = config.typescript;

    if config.has_feature(Feature::DarkMode) {
        files.push(GeneratedFile::new(
            format!("src/darkMode.{}", ext),
            if ts { DARK_MODE_TS } else { DARK_MODE_JS },
            FileKind::Entry,
        ));
    }

    if config.has_feature(Feature::I18n) {
        files.push(GeneratedFile::new(LOCALE_PATH, locale_messages(elements)?, FileKind::Config));
    }

    if config.has_feature(Feature::Pwa) {
        let path = match config.framework {
            Framework::Angular => "src/manifest.webmanifest",
            _ => "public/manifest.webmanifest",
        };
        let manifest = json!({
            "name": config.project_name,
            "short_name": config.project_name,
            "start_url": "/",
            "display": "standalone",
            "background_color": "#ffffff",
            "theme_color": "#ffffff",
            "icons": [],
        });
        files.push(GeneratedFile::new(
            path,
            serde_json::to_string_pretty(&manifest)? + "\n",
            FileKind::Config,
        ));
    }

    if config.has_feature(Feature::ApiIntegration) && config.framework != Framework::Angular {
        files.push(GeneratedFile::new(
            format!("src/api/client.{}", ext),
            if ts { API_CLIENT_TS } else { API_CLIENT_JS },
            FileKind::Entry,
        ));
    }

    if needs_server(config) {
        files.push(GeneratedFile::new("server.js", server_script(config), FileKind::Entry));
    }

    if config.has_feature(Feature::Ssg) {
        files.push(GeneratedFile::new("scripts/prerender.js", PRERENDER_JS, FileKind::Entry));
    }

    Ok(files)
}

/// Authored text keyed by element id, in tree order.
pub fn locale_messages(elements: &[Element]) -> Result<String> {
    let mut messages = serde_json::Map::new();
    for element in elements.iter().flat_map(Element::walk) {
        if let Some(text) = element.text() {
            messages.insert(element.id.to_string(), json!(text.to_plain_text()));
        }
    }
    Ok(serde_json::to_string_pretty(&serde_json::Value::Object(messages))? + "\n")
}

const SSR_SERVER_JS: &str = r#"import fs from 'node:fs/promises';
import express from 'express';
import compression from 'compression';
import sirv from 'sirv';

const port = process.env.PORT || 3000;
const template = await fs.readFile('./dist/client/index.html', 'utf-8');
const { render } = await import('./dist/server/entry-server.js');

const app = express();
app.use(compression());
app.use(sirv('./dist/client', { extensions: [], gzip: true }));

app.use('*', async (req, res) => {
  try {
    const html = await render(req.originalUrl);
    res
      .status(200)
      .set({ 'Content-Type': 'text/html' })
      .send(template.replace('<!--app-html-->', html));
  } catch (error) {
    console.error(error);
    res.status(500).end('Internal Server Error');
  }
});

app.listen(port, () => {
  console.log(`Server started at http://localhost:${port}`);
});
"#;

const PRERENDER_JS: &str = r#"import fs from 'node:fs/promises';
import path from 'node:path';

const routes = ['/'];
const template = await fs.readFile('dist/client/index.html', 'utf-8');
const { render } = await import('../dist/server/entry-server.js');

for (const route of routes) {
  const html = template.replace('<!--app-html-->', await render(route));
  const file = route === '/' ? 'index.html' : `${route.slice(1)}/index.html`;
  const target = path.join('dist/client', file);
  await fs.mkdir(path.dirname(target), { recursive: true });
  await fs.writeFile(target, html);
  console.log(`prerendered ${target}`);
}
"#;

fn server_script(config: &GenerationConfig) -> String {
    if config.has_feature(Feature::Ssr) {
        return SSR_SERVER_JS.to_string();
    }

    let imports = if is_esm(config) {
        "import express from 'express';\nimport compression from 'compression';\nimport sirv from 'sirv';"
    } else {
        "const express = require('express');\nconst compression = require('compression');\nconst sirv = require('sirv');"
    };
    format!(
        r#"{imports}

const port = process.env.PORT || 3000;
const app = express();

app.use(compression());
app.use(sirv('{dir}', {{ single: true, gzip: true }}));

app.listen(port, () => {{
  console.log(`Server started at http://localhost:${{port}}`);
}});
"#,
        imports = imports,
        dir = out_dir(config),
    )
}

/// Deployment descriptors for the target.
pub fn deployment_files(config: &GenerationConfig) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::new();
    let output = out_dir(config);
    let spa = config.framework != Framework::Html && !renders_on_server(config);

    match config.deployment_target {
        DeploymentTarget::Static | DeploymentTarget::Node => {}
        DeploymentTarget::Vercel => {
            let mut vercel = json!({
                "buildCommand": build_command(config),
                "outputDirectory": output,
            });
            if spa {
                vercel["rewrites"] = json!([{ "source": "/(.*)", "destination": "/index.html" }]);
            }
            files.push(GeneratedFile::new(
                "vercel.json",
                serde_json::to_string_pretty(&vercel)? + "\n",
                FileKind::Config,
            ));
        }
        DeploymentTarget::Netlify => {
            let mut lines = vec![
                "[build]".to_string(),
                format!("  command = \"{}\"", build_command(config)),
                format!("  publish = \"{}\"", output),
            ];
            if spa {
                lines.push(String::new());
                lines.push("[[redirects]]".to_string());
                lines.push("  from = \"/*\"".to_string());
                lines.push("  to = \"/index.html\"".to_string());
                lines.push("  status = 200".to_string());
            }
            lines.push(String::new());
            files.push(GeneratedFile::new("netlify.toml", lines.join("\n"), FileKind::Config));
        }
        DeploymentTarget::Docker => {
            files.push(GeneratedFile::new("Dockerfile", dockerfile(config), FileKind::Config));
            files.push(GeneratedFile::new(
                ".dockerignore",
                "node_modules\ndist\n.git\nnpm-debug.log\n",
                FileKind::Config,
            ));
        }
    }

    tracing::debug!(target = %config.deployment_target, files = files.len(), "deployment files");
    Ok(files)
}

fn dockerfile(config: &GenerationConfig) -> String {
    let build = format!(
        "FROM node:20-alpine AS build\nWORKDIR /app\nCOPY package*.json ./\nRUN npm ci\nCOPY . .\nRUN {}\n",
        build_command(config)
    );
    let runtime = if needs_server(config) {
        "FROM node:20-alpine\nWORKDIR /app\nENV NODE_ENV=production\nCOPY package*.json ./\nRUN npm ci --omit=dev\nCOPY --from=build /app/dist ./dist\nCOPY server.js ./\nEXPOSE 3000\nCMD [\"node\", \"server.js\"]\n"
            .to_string()
    } else {
        format!(
            "FROM nginx:1.27-alpine\nCOPY --from=build /app/{} /usr/share/nginx/html\nEXPOSE 80\nCMD [\"nginx\", \"-g\", \"daemon off;\"]\n",
            out_dir(config)
        )
    };
    format!("{}\n{}", build, runtime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tailwind_files() {
        let config = GenerationConfig::default().with_feature(Feature::DarkMode);
        let files = styling_files(&config);
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["tailwind.config.js", "postcss.config.js", "src/index.css"]);
        assert!(files[0].content.contains("darkMode: 'class',"));
        assert!(files[0].content.starts_with("/** @type"));
        assert!(files[1].content.starts_with("export default"));
    }

    #[test]
    fn test_webpack_configs_are_commonjs() {
        let config = GenerationConfig::default().with_bundler(Bundler::Webpack);
        let files = styling_files(&config);
        assert!(files.iter().all(|f| !f.content.contains("export default")));
    }

    #[test]
    fn test_angular_tailwind_has_no_postcss_config() {
        let config = GenerationConfig::for_framework(Framework::Angular);
        let files = styling_files(&config);
        assert!(files.iter().all(|f| f.path != "postcss.config.js"));
        assert!(files.iter().any(|f| f.path == "src/styles.css"));
    }

    #[test]
    fn test_styled_components_files() {
        let config = GenerationConfig::default()
            .with_styling(StylingStrategy::StyledComponents)
            .with_typescript(false);
        let files = styling_files(&config);
        assert_eq!(files[0].path, "src/styles/theme.js");
        assert!(files[0].content.contains("spacing: (factor) =>"));
        assert!(files[1].content.contains("createGlobalStyle`"));
    }

    #[test]
    fn test_locale_messages_in_tree_order() {
        let tree = vec![
            Element::new("hero", "section")
                .with_child(Element::new("title", "heading").with_prop("text", "Welcome")),
            Element::new("cta", "button").with_prop("text", "Buy"),
        ];
        let json = locale_messages(&tree).unwrap();
        assert_eq!(json, "{\n  \"title\": \"Welcome\",\n  \"cta\": \"Buy\"\n}\n");
    }

    #[test]
    fn test_deployment_descriptors() {
        let config = GenerationConfig::default().with_deployment(DeploymentTarget::Netlify);
        let files = deployment_files(&config).unwrap();
        assert_eq!(files[0].path, "netlify.toml");
        assert!(files[0].content.contains("publish = \"dist\""));
        assert!(files[0].content.contains("[[redirects]]"));

        let config = GenerationConfig::default().with_deployment(DeploymentTarget::Docker);
        let files = deployment_files(&config).unwrap();
        assert!(files[0].content.contains("FROM nginx"));
        assert_eq!(files[1].path, ".dockerignore");
    }

    #[test]
    fn test_node_target_ships_static_server() {
        let config = GenerationConfig::default().with_deployment(DeploymentTarget::Node);
        let files = feature_files(&[], &config).unwrap();
        let server = files.iter().find(|f| f.path == "server.js").unwrap();
        assert!(server.content.contains("sirv('dist', { single: true, gzip: true })"));
    }

    #[test]
    fn test_ssr_server_renders_template() {
        let config = GenerationConfig::default()
            .with_feature(Feature::Ssr)
            .with_deployment(DeploymentTarget::Docker);
        let files = feature_files(&[], &config).unwrap();
        let server = files.iter().find(|f| f.path == "server.js").unwrap();
        assert!(server.content.contains("<!--app-html-->"));
        let docker = deployment_files(&config).unwrap();
        assert!(docker[0].content.contains("CMD [\"node\", \"server.js\"]"));
    }
}
