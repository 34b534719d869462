//! Project assembly.
//!
//! [`ProjectAssembler`] drives one backend over a validated element tree and
//! wraps the emitted components into a complete project: root and bootstrap
//! files, styling and feature modules, deployment descriptors, manifest,
//! bundler configuration, README and metrics.
//!
//! Assembly is all-or-nothing. Configuration and tree errors are reported
//! before anything is emitted; non-fatal conditions are collected into
//! [`Generation::diagnostics`].

use crate::bundler;
use crate::deps;
use crate::emit::EmitContext;
use crate::error::{CodegenError, Result};
use crate::generators::{
    CodeGenerator, ComponentUnit, FileKind, GeneratedFile, GeneratedProject, TemplateEngine,
};
use crate::infer::PropInferencer;
use crate::manifest;
use crate::metrics::ProjectMetrics;
use crate::naming::name_components;
use crate::responsive::ResponsiveRules;
use crate::scaffold;
use crate::tags::TagTable;
use crate::validate::validate_request;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use weft_core::{Diagnostic, Element, GenerationConfig};

/// A successful generation: the project plus the warnings raised on the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub project: GeneratedProject,
    pub diagnostics: Vec<Diagnostic>,
}

/// Assembles projects with one backend.
pub struct ProjectAssembler<'g> {
    backend: &'g dyn CodeGenerator,
    rules: Option<ResponsiveRules>,
    tags: Option<TagTable>,
}

impl<'g> ProjectAssembler<'g> {
    pub fn new(backend: &'g dyn CodeGenerator) -> Self {
        Self {
            backend,
            rules: None,
            tags: None,
        }
    }

    /// Replace the built-in responsive rewrite table.
    pub fn with_rules(mut self, rules: ResponsiveRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Replace the backend's tag table.
    pub fn with_tags(mut self, tags: TagTable) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn assemble(&self, elements: &[Element], config: &GenerationConfig) -> Result<Generation> {
        let backend = self.backend;
        if backend.framework() != config.framework {
            return Err(CodegenError::BackendMismatch {
                backend: backend.framework(),
                requested: config.framework,
            });
        }

        let stats = validate_request(elements, config)?;
        info!(
            framework = %config.framework,
            elements = stats.element_count,
            components = elements.len(),
            "generating project"
        );

        let builtin;
        let rules = match &self.rules {
            Some(rules) => rules,
            None => {
                builtin = ResponsiveRules::tailwind()?;
                &builtin
            }
        };
        let tags = self.tags.clone().unwrap_or_else(|| backend.tag_table());
        let mut ctx = EmitContext::new(config, tags, rules);

        let inferencer = PropInferencer::new(config.framework, config.typescript);
        let mut widened = Vec::new();
        let units: Vec<ComponentUnit<'_>> = elements
            .iter()
            .zip(name_components(elements))
            .map(|(element, name)| ComponentUnit {
                element,
                name,
                interface: inferencer.infer(element, &mut widened),
            })
            .collect();
        for diagnostic in widened {
            ctx.diagnose(diagnostic);
        }

        let mut files = Vec::new();
        for unit in &units {
            files.push(backend.generate_component(unit, &mut ctx)?);
        }
        if config.include_tests {
            files.extend(units.iter().filter_map(|unit| backend.generate_test(unit, &ctx)));
        }
        files.extend(backend.generate_entry(&units, &mut ctx)?);
        files.extend(backend.feature_files(&units, config));
        files.extend(scaffold::styling_files(config));
        files.extend(scaffold::feature_files(elements, config)?);
        files.extend(scaffold::deployment_files(config)?);

        let resolved = deps::resolve(backend.packages(config), config);
        let scripts = bundler::scripts(config);
        let engine = TemplateEngine::new();

        files.push(manifest::package_json(config, &resolved, &scripts)?);
        files.extend(bundler::config_files(&engine, config)?);
        files.extend(backend.config_files(config)?);
        files.extend(manifest::tsconfig(config)?);
        files.extend(manifest::env_declarations(config));

        let readme = manifest::readme(&engine, config, &units, &scripts)?;
        files.push(GeneratedFile::new("README.md", readme.clone(), FileKind::Doc));
        debug!(files = files.len(), "emitted project files");

        let metrics = ProjectMetrics::compute(&files, stats, config.framework);
        let diagnostics = ctx.into_diagnostics();
        info!(
            framework = %config.framework,
            files = files.len(),
            bytes = metrics.bundle_size,
            diagnostics = diagnostics.len(),
            "generated project"
        );

        Ok(Generation {
            project: GeneratedProject {
                framework: config.framework,
                files,
                dependencies: resolved.dependencies,
                dev_dependencies: resolved.dev_dependencies,
                scripts,
                readme,
                metrics,
            },
            diagnostics,
        })
    }
}

#[cfg(all(test, feature = "react", feature = "vue"))]
mod tests {
    use super::*;
    use crate::generators::{ReactGenerator, VueGenerator};
    use crate::tags::TargetPrimitive;
    use std::collections::HashSet;
    use weft_core::{DiagnosticKind, Feature, Framework};

    fn hero() -> Vec<Element> {
        vec![Element::new("h1", "heading").with_prop("text", "Hello")]
    }

    #[test]
    fn test_react_project_layout() {
        let generation = ProjectAssembler::new(&ReactGenerator)
            .assemble(&hero(), &GenerationConfig::default())
            .unwrap();
        let project = &generation.project;

        for path in [
            "src/components/HeadingComponent.tsx",
            "src/App.tsx",
            "src/main.tsx",
            "index.html",
            "src/index.css",
            "tailwind.config.js",
            "postcss.config.js",
            "package.json",
            "vite.config.ts",
            "tsconfig.json",
            "src/env.d.ts",
            "README.md",
        ] {
            assert!(project.file(path).is_some(), "missing {}", path);
        }
        assert_eq!(project.files_of(FileKind::Component).count(), 1);
        assert_eq!(project.metrics.component_count, 1);
        assert!(generation.diagnostics.is_empty());
    }

    #[test]
    fn test_paths_are_unique() {
        let config = GenerationConfig::default()
            .with_feature(Feature::Routing)
            .with_feature(Feature::I18n)
            .with_feature(Feature::DarkMode)
            .with_tests(true);
        let project = ProjectAssembler::new(&ReactGenerator)
            .assemble(&hero(), &config)
            .unwrap()
            .project;
        let mut seen = HashSet::new();
        for file in &project.files {
            assert!(seen.insert(file.path.as_str()), "duplicate {}", file.path);
        }
        assert!(project.file("src/components/HeadingComponent.test.tsx").is_some());
    }

    #[test]
    fn test_backend_mismatch_is_rejected() {
        let err = ProjectAssembler::new(&VueGenerator)
            .assemble(&hero(), &GenerationConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CodegenError::BackendMismatch {
                backend: Framework::Vue,
                requested: Framework::React
            }
        ));
    }

    #[test]
    fn test_invalid_config_emits_nothing() {
        let config = GenerationConfig::for_framework(Framework::Vue).with_feature(Feature::Ssr);
        let err = ProjectAssembler::new(&VueGenerator)
            .assemble(&hero(), &config)
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_custom_tags_and_diagnostics() {
        let mut tags = TagTable::for_framework(Framework::React);
        tags.register("carousel", TargetPrimitive::new("section"));
        let elements = vec![
            Element::new("c", "carousel"),
            Element::new("w", "widget3d").with_prop("data", serde_json::json!({"a": 1})),
        ];
        let generation = ProjectAssembler::new(&ReactGenerator)
            .with_tags(tags)
            .assemble(&elements, &GenerationConfig::default())
            .unwrap();

        let kinds: Vec<DiagnosticKind> = generation.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DiagnosticKind::DynamicProp, DiagnosticKind::UnknownKind]);
        let carousel = generation
            .project
            .file("src/components/CarouselComponent.tsx")
            .unwrap();
        assert!(carousel.content.contains("<section"));
    }
}
