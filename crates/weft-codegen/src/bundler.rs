//! Build tool files: bundler configuration, npm scripts and the host page.
//!
//! Optimization flags are advisory. They are written into the bundler's own
//! options (and listed in a header comment) and the emitted build tool acts on
//! them; the generator itself never bundles anything.

use crate::error::Result;
use crate::generators::{FileKind, GeneratedFile, TemplateEngine};
use indexmap::IndexMap;
use serde_json::json;
use weft_core::{Bundler, Feature, Framework, GenerationConfig, Optimization};

/// A framework's Vite plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitePlugin {
    pub import: &'static str,
    pub call: &'static str,
    pub package: &'static str,
}

pub fn vite_plugin(framework: Framework) -> Option<VitePlugin> {
    match framework {
        Framework::React => Some(VitePlugin {
            import: "import react from '@vitejs/plugin-react';",
            call: "react()",
            package: "@vitejs/plugin-react",
        }),
        Framework::Vue => Some(VitePlugin {
            import: "import vue from '@vitejs/plugin-vue';",
            call: "vue()",
            package: "@vitejs/plugin-vue",
        }),
        Framework::Svelte => Some(VitePlugin {
            import: "import { svelte } from '@sveltejs/vite-plugin-svelte';",
            call: "svelte()",
            package: "@sveltejs/vite-plugin-svelte",
        }),
        Framework::Angular | Framework::Html => None,
    }
}

/// Path of the bootstrap script.
pub fn entry_script(config: &GenerationConfig) -> String {
    match config.framework {
        Framework::React => format!("src/main.{}x", config.script_ext()),
        _ => format!("src/main.{}", config.script_ext()),
    }
}

/// Path of the server-side render entry (ssr and ssg).
pub fn server_entry(config: &GenerationConfig) -> String {
    match config.framework {
        Framework::React => format!("src/entry-server.{}x", config.script_ext()),
        _ => format!("src/entry-server.{}", config.script_ext()),
    }
}

/// Whether the project renders on the server at build or request time.
pub fn renders_on_server(config: &GenerationConfig) -> bool {
    config.has_feature(Feature::Ssr) || config.has_feature(Feature::Ssg)
}

/// Directory holding the built client bundle.
pub fn out_dir(config: &GenerationConfig) -> String {
    if renders_on_server(config) {
        return "dist/client".to_string();
    }
    match config.bundler {
        Bundler::AngularCli => format!("dist/{}/browser", crate::manifest::package_name(config)),
        Bundler::Esbuild => "public".to_string(),
        _ => "dist".to_string(),
    }
}

/// Comma-separated optimization flags, or `none`.
pub fn optimization_summary(config: &GenerationConfig) -> String {
    if config.optimization.is_empty() {
        return "none".to_string();
    }
    config
        .optimization
        .iter()
        .map(Optimization::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// npm scripts for the config, in manifest order.
pub fn scripts(config: &GenerationConfig) -> IndexMap<String, String> {
    let mut scripts = IndexMap::new();
    let mut add = |name: &str, command: String| {
        scripts.insert(name.to_string(), command);
    };

    match config.bundler {
        Bundler::Vite => {
            add("dev", "vite".to_string());
            if renders_on_server(config) {
                add(
                    "build",
                    format!(
                        "vite build --outDir dist/client && vite build --ssr {} --outDir dist/server",
                        server_entry(config)
                    ),
                );
            } else {
                add("build", "vite build".to_string());
            }
            add("preview", "vite preview".to_string());
        }
        Bundler::Webpack => {
            add("dev", "webpack serve --mode development".to_string());
            add("build", "webpack --mode production".to_string());
        }
        Bundler::Parcel => {
            let mut build = "parcel build index.html".to_string();
            if !config.optimizes(Optimization::Minify) {
                build.push_str(" --no-optimize");
            }
            if !config.optimizes(Optimization::TreeShaking) {
                build.push_str(" --no-scope-hoist");
            }
            add("dev", "parcel index.html".to_string());
            add("build", build);
        }
        Bundler::Esbuild => {
            add("dev", "node esbuild.config.mjs --serve".to_string());
            add("build", "node esbuild.config.mjs".to_string());
        }
        Bundler::AngularCli => {
            add("ng", "ng".to_string());
            add("start", "ng serve".to_string());
            add("build", "ng build".to_string());
            add("watch", "ng build --watch --configuration development".to_string());
        }
    }

    if config.include_tests {
        match config.framework {
            Framework::Angular => add("test", "ng test".to_string()),
            Framework::Html => {}
            _ => add("test", "vitest run".to_string()),
        }
    }

    if config.typescript {
        match config.framework {
            Framework::React | Framework::Html => add("typecheck", "tsc --noEmit".to_string()),
            Framework::Vue => add("typecheck", "vue-tsc --noEmit".to_string()),
            Framework::Svelte => add("typecheck", "svelte-check --tsconfig ./tsconfig.json".to_string()),
            Framework::Angular => {}
        }
    }

    if config.has_feature(Feature::Ssr) {
        add("serve:ssr", "node server.js".to_string());
    } else if crate::deps::needs_server(config) {
        add("serve", "node server.js".to_string());
    }
    if config.has_feature(Feature::Ssg) {
        add("prerender", "node scripts/prerender.js".to_string());
    }

    scripts
}

/// Bundler configuration files. Angular CLI projects get `angular.json`
/// from the Angular backend instead.
pub fn config_files(engine: &TemplateEngine<'_>, config: &GenerationConfig) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::new();
    match config.bundler {
        Bundler::Vite => files.push(vite_config(engine, config)?),
        Bundler::Webpack => files.push(webpack_config(engine, config)?),
        Bundler::Parcel => files.push(GeneratedFile::new(
            ".parcelrc",
            serde_json::to_string_pretty(&json!({ "extends": "@parcel/config-default" }))? + "\n",
            FileKind::Config,
        )),
        Bundler::Esbuild => files.push(esbuild_config(engine, config)?),
        Bundler::AngularCli => {}
    }

    let vitest_outside_vite = config.include_tests
        && config.bundler != Bundler::Vite
        && !matches!(config.framework, Framework::Angular | Framework::Html);
    if vitest_outside_vite {
        files.push(vitest_config(config));
    }

    tracing::debug!(bundler = %config.bundler, files = files.len(), "bundler config");
    Ok(files)
}

const VITE_TEMPLATE: &str = r#"{{imports}}

// Optimizations: {{optimizations}}
export default defineConfig({
  plugins: [{{join plugins ", "}}],
  build: {
    outDir: '{{out_dir}}',
    minify: {{minify}},
    rollupOptions: {
      treeshake: {{tree_shaking}},
{{#if manual_chunks}}      output: {
        manualChunks: { vendor: [{{join manual_chunks ", "}}] },
      },
{{/if}}    },
  },
{{#if test}}  test: {
    environment: 'jsdom',
    globals: true,
  },
{{/if}}});
"#;

fn vite_config(engine: &TemplateEngine<'_>, config: &GenerationConfig) -> Result<GeneratedFile> {
    let mut imports = Vec::new();
    let mut plugins = Vec::new();
    let test = config.include_tests && config.framework != Framework::Html;

    if test && config.typescript {
        imports.push("/// <reference types=\"vitest/config\" />".to_string());
    }
    imports.push("import { defineConfig } from 'vite';".to_string());
    if let Some(plugin) = vite_plugin(config.framework) {
        imports.push(plugin.import.to_string());
        plugins.push(plugin.call.to_string());
    }
    if config.has_feature(Feature::Pwa) {
        imports.push("import { VitePWA } from 'vite-plugin-pwa';".to_string());
        plugins.push("VitePWA({ registerType: 'autoUpdate', manifest: false })".to_string());
    }
    if config.optimizes(Optimization::ImageOptimization) {
        imports.push("import { ViteImageOptimizer } from 'vite-plugin-image-optimizer';".to_string());
        plugins.push("ViteImageOptimizer()".to_string());
    }

    let manual_chunks: Vec<String> = if config.optimizes(Optimization::CodeSplitting) {
        vendor_packages(config.framework)
            .iter()
            .map(|p| format!("'{}'", p))
            .collect()
    } else {
        Vec::new()
    };

    let data = json!({
        "imports": imports.join("\n"),
        "optimizations": optimization_summary(config),
        "plugins": plugins,
        "out_dir": out_dir(config),
        "minify": if config.optimizes(Optimization::Minify) { "'esbuild'" } else { "false" },
        "tree_shaking": config.optimizes(Optimization::TreeShaking),
        "manual_chunks": manual_chunks,
        "test": test,
    });

    let path = format!("vite.config.{}", config.script_ext());
    let content = engine.render_string(VITE_TEMPLATE, &data)?;
    Ok(GeneratedFile::new(path, content, FileKind::Config))
}

const WEBPACK_TEMPLATE: &str = r#"{{requires}}

// Optimizations: {{optimizations}}
module.exports = {
  entry: './{{entry}}',
  output: {
    path: path.resolve(__dirname, 'dist'),
    filename: '[name].[contenthash].js',
    clean: true,
  },
  resolve: {
    extensions: [{{join extensions ", "}}],
{{#if condition_names}}    conditionNames: ['svelte', 'browser', 'import'],
{{/if}}  },
  module: {
    rules: [
{{indent rules 6}}
    ],
  },
  plugins: [
{{indent plugins 4}}
  ],
  optimization: {
    minimize: {{minify}},
    usedExports: {{tree_shaking}},
    splitChunks: {{split_chunks}},
  },
  devServer: {
    historyApiFallback: true,
  },
};
"#;

fn webpack_config(engine: &TemplateEngine<'_>, config: &GenerationConfig) -> Result<GeneratedFile> {
    let framework = config.framework;
    let mut requires = vec![
        "const path = require('path');".to_string(),
        "const HtmlWebpackPlugin = require('html-webpack-plugin');".to_string(),
    ];
    let mut plugins = vec!["new HtmlWebpackPlugin({ template: './public/index.html' }),".to_string()];
    let mut rules = Vec::new();

    let extensions: &[&str] = match framework {
        Framework::React => &["'.tsx'", "'.ts'", "'.jsx'", "'.js'"],
        Framework::Vue => &["'.ts'", "'.js'", "'.vue'"],
        Framework::Svelte => &["'.ts'", "'.js'", "'.svelte'", "'.mjs'"],
        Framework::Angular | Framework::Html => &["'.ts'", "'.js'"],
    };

    match (framework, config.typescript) {
        (Framework::React, true) => {
            rules.push("{ test: /\\.tsx?$/, exclude: /node_modules/, use: 'ts-loader' },".to_string());
        }
        (Framework::React, false) => rules.push(
            "{\n  test: /\\.jsx?$/,\n  exclude: /node_modules/,\n  use: {\n    loader: 'babel-loader',\n    options: { presets: ['@babel/preset-env', ['@babel/preset-react', { runtime: 'automatic' }]] },\n  },\n},"
                .to_string(),
        ),
        (Framework::Vue, ts) => {
            requires.push("const { VueLoaderPlugin } = require('vue-loader');".to_string());
            plugins.push("new VueLoaderPlugin(),".to_string());
            rules.push("{ test: /\\.vue$/, loader: 'vue-loader' },".to_string());
            if ts {
                rules.push(
                    "{ test: /\\.ts$/, loader: 'ts-loader', options: { appendTsSuffixTo: [/\\.vue$/] } },"
                        .to_string(),
                );
            }
        }
        (Framework::Svelte, ts) => {
            rules.push("{ test: /\\.svelte$/, use: 'svelte-loader' },".to_string());
            rules.push(
                "{ test: /node_modules\\/svelte\\/.*\\.mjs$/, resolve: { fullySpecified: false } },".to_string(),
            );
            if ts {
                rules.push("{ test: /\\.ts$/, exclude: /node_modules/, use: 'ts-loader' },".to_string());
            }
        }
        (_, true) => rules.push("{ test: /\\.ts$/, exclude: /node_modules/, use: 'ts-loader' },".to_string()),
        (_, false) => {}
    }

    let css_loaders = if config.styling_strategy == weft_core::StylingStrategy::UtilityClasses {
        "['style-loader', 'css-loader', 'postcss-loader']"
    } else {
        "['style-loader', 'css-loader']"
    };
    rules.push(format!("{{ test: /\\.css$/, use: {} }},", css_loaders));

    let data = json!({
        "requires": requires.join("\n"),
        "optimizations": optimization_summary(config),
        "entry": entry_script(config),
        "extensions": extensions,
        "condition_names": framework == Framework::Svelte,
        "rules": rules.join("\n"),
        "plugins": plugins.join("\n"),
        "minify": config.optimizes(Optimization::Minify),
        "tree_shaking": config.optimizes(Optimization::TreeShaking),
        "split_chunks": if config.optimizes(Optimization::CodeSplitting) { "{ chunks: 'all' }" } else { "false" },
    });

    let content = engine.render_string(WEBPACK_TEMPLATE, &data)?;
    Ok(GeneratedFile::new("webpack.config.js", content, FileKind::Config))
}

const ESBUILD_TEMPLATE: &str = r#"{{imports}}

// Optimizations: {{optimizations}}
const options = {
  entryPoints: ['{{entry}}'],
  bundle: true,
  outdir: 'public/dist',
  format: 'esm',
  splitting: {{code_splitting}},
  minify: {{minify}},
  treeShaking: {{tree_shaking}},
  sourcemap: true,
  jsx: 'automatic',
  loader: { '.svg': 'file', '.png': 'file' },
  plugins: [{{join plugins ", "}}],
};

if (process.argv.includes('--serve')) {
  const ctx = await esbuild.context(options);
  await ctx.watch();
  const { host, port } = await ctx.serve({ servedir: 'public' });
  console.log(`Serving on http://${host}:${port}`);
} else {
  await esbuild.build(options);
}
"#;

fn esbuild_config(engine: &TemplateEngine<'_>, config: &GenerationConfig) -> Result<GeneratedFile> {
    let mut imports = vec!["import * as esbuild from 'esbuild';".to_string()];
    let mut plugins = Vec::new();
    if config.styling_strategy == weft_core::StylingStrategy::UtilityClasses {
        imports.push("import stylePlugin from 'esbuild-style-plugin';".to_string());
        imports.push("import tailwindcss from 'tailwindcss';".to_string());
        imports.push("import autoprefixer from 'autoprefixer';".to_string());
        plugins.push("stylePlugin({ postcss: { plugins: [tailwindcss, autoprefixer] } })".to_string());
    }

    let data = json!({
        "imports": imports.join("\n"),
        "optimizations": optimization_summary(config),
        "entry": entry_script(config),
        "code_splitting": config.optimizes(Optimization::CodeSplitting),
        "minify": config.optimizes(Optimization::Minify),
        "tree_shaking": config.optimizes(Optimization::TreeShaking),
        "plugins": plugins,
    });

    let content = engine.render_string(ESBUILD_TEMPLATE, &data)?;
    Ok(GeneratedFile::new("esbuild.config.mjs", content, FileKind::Config))
}

fn vitest_config(config: &GenerationConfig) -> GeneratedFile {
    let mut lines = vec!["import { defineConfig } from 'vitest/config';".to_string()];
    let mut plugins = Vec::new();
    if let Some(plugin) = vite_plugin(config.framework) {
        lines.push(plugin.import.to_string());
        plugins.push(plugin.call);
    }
    lines.push(String::new());
    lines.push("export default defineConfig({".to_string());
    lines.push(format!("  plugins: [{}],", plugins.join(", ")));
    lines.push("  test: {".to_string());
    lines.push("    environment: 'jsdom',".to_string());
    lines.push("    globals: true,".to_string());
    lines.push("  },".to_string());
    lines.push("});".to_string());
    lines.push(String::new());

    GeneratedFile::new(
        format!("vitest.config.{}", config.script_ext()),
        lines.join("\n"),
        FileKind::Config,
    )
}

/// Runtime packages grouped into the vendor chunk when code splitting.
fn vendor_packages(framework: Framework) -> &'static [&'static str] {
    match framework {
        Framework::React => &["react", "react-dom"],
        Framework::Vue => &["vue"],
        Framework::Svelte => &["svelte"],
        Framework::Angular => &["@angular/core", "@angular/common"],
        Framework::Html => &[],
    }
}

/// Where the host page lives for the bundler.
pub fn host_page_path(config: &GenerationConfig) -> &'static str {
    match config.bundler {
        Bundler::Webpack | Bundler::Esbuild => "public/index.html",
        Bundler::AngularCli => "src/index.html",
        Bundler::Vite | Bundler::Parcel => "index.html",
    }
}

/// The HTML page that hosts the application.
///
/// `body` is the page content (a mount point, or the inlined markup of a
/// static site), already indented by two levels.
pub fn host_page(config: &GenerationConfig, body: &str) -> GeneratedFile {
    let mut head = vec![
        "    <meta charset=\"UTF-8\" />".to_string(),
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />".to_string(),
        format!("    <title>{}</title>", crate::emit::escape_text(&config.project_name)),
    ];
    if config.bundler == Bundler::AngularCli {
        head.push("    <base href=\"/\" />".to_string());
    }
    if config.has_feature(Feature::Pwa) {
        head.push("    <link rel=\"manifest\" href=\"/manifest.webmanifest\" />".to_string());
        head.push("    <meta name=\"theme-color\" content=\"#ffffff\" />".to_string());
    }

    let script = match config.bundler {
        Bundler::Vite => Some(format!(
            "    <script type=\"module\" src=\"/{}\"></script>",
            entry_script(config)
        )),
        Bundler::Parcel => Some(format!(
            "    <script type=\"module\" src=\"./{}\"></script>",
            entry_script(config)
        )),
        Bundler::Esbuild => {
            head.push("    <link rel=\"stylesheet\" href=\"/dist/main.css\" />".to_string());
            Some("    <script type=\"module\" src=\"/dist/main.js\"></script>".to_string())
        }
        Bundler::Webpack | Bundler::AngularCli => None,
    };

    let mut lines = vec![
        "<!DOCTYPE html>".to_string(),
        "<html lang=\"en\">".to_string(),
        "  <head>".to_string(),
    ];
    lines.extend(head);
    lines.push("  </head>".to_string());
    lines.push("  <body>".to_string());
    lines.push(body.to_string());
    lines.extend(script);
    lines.push("  </body>".to_string());
    lines.push("</html>".to_string());
    lines.push(String::new());

    GeneratedFile::new(host_page_path(config), lines.join("\n"), FileKind::Entry)
}

/// Mount point markup for single-page frameworks.
pub fn mount_point(config: &GenerationConfig, id: &str) -> String {
    if renders_on_server(config) {
        format!("    <div id=\"{}\"><!--app-html--></div>", id)
    } else {
        format!("    <div id=\"{}\"></div>", id)
    }
}
