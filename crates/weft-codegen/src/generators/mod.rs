//! Framework backends and the shared generator contract.

#[cfg(feature = "angular")]
mod angular;
#[cfg(feature = "html")]
mod html;
#[cfg(feature = "react")]
mod react;
#[cfg(feature = "svelte")]
mod svelte;
#[cfg(feature = "vue")]
mod vue;

mod templates;

#[cfg(feature = "angular")]
pub use angular::AngularGenerator;
#[cfg(feature = "html")]
pub use html::HtmlGenerator;
#[cfg(feature = "react")]
pub use react::ReactGenerator;
#[cfg(feature = "svelte")]
pub use svelte::SvelteGenerator;
#[cfg(feature = "vue")]
pub use vue::VueGenerator;

pub use templates::TemplateEngine;

use crate::deps::Packages;
use crate::emit::{emit_element, EmitContext, Markup, Scope};
use crate::error::Result;
use crate::infer::PropInterface;
use crate::metrics::ProjectMetrics;
use crate::naming::ComponentName;
use crate::tags::TagTable;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use weft_core::{Element, Framework, GenerationConfig};

/// One framework backend.
///
/// A backend knows its template grammar (through [`Markup`]) and how to wrap
/// emitted markup into component, test and entry files. Everything shared by
/// all frameworks (validation, naming, dependency resolution, manifests,
/// metrics) lives in [`crate::ProjectAssembler`].
pub trait CodeGenerator: Markup + Send + Sync {
    fn framework(&self) -> Framework;

    /// Target framework name.
    fn framework_name(&self) -> &'static str {
        self.framework().display_name()
    }

    /// Tag table used for lookups.
    fn tag_table(&self) -> TagTable {
        TagTable::for_framework(self.framework())
    }

    /// Emit one element subtree as a markup fragment, literals only.
    fn emit(&self, element: &Element, ctx: &mut EmitContext<'_>, indent: usize) -> String {
        emit_element(self, ctx, element, Scope::Nested, indent)
    }

    /// Component file for one top-level element.
    fn generate_component(
        &self,
        unit: &ComponentUnit<'_>,
        ctx: &mut EmitContext<'_>,
    ) -> Result<GeneratedFile>;

    /// Test file for one component, if the framework has a test setup.
    fn generate_test(&self, unit: &ComponentUnit<'_>, ctx: &EmitContext<'_>)
        -> Option<GeneratedFile>;

    /// Root application file composing every component, plus bootstrap files.
    fn generate_entry(
        &self,
        units: &[ComponentUnit<'_>],
        ctx: &mut EmitContext<'_>,
    ) -> Result<Vec<GeneratedFile>>;

    /// Framework-specific feature modules (router, store, i18n setup...).
    fn feature_files(&self, _units: &[ComponentUnit<'_>], _config: &GenerationConfig) -> Vec<GeneratedFile> {
        Vec::new()
    }

    /// Framework-specific configuration files.
    fn config_files(&self, _config: &GenerationConfig) -> Result<Vec<GeneratedFile>> {
        Ok(Vec::new())
    }

    /// Framework base packages and feature packages.
    fn packages(&self, config: &GenerationConfig) -> Packages;
}

/// A top-level element with its assigned name and inferred interface.
#[derive(Debug, Clone)]
pub struct ComponentUnit<'e> {
    pub element: &'e Element,
    pub name: ComponentName,
    pub interface: PropInterface,
}

impl<'e> ComponentUnit<'e> {
    pub fn ident(&self) -> &str {
        &self.name.ident
    }

    pub fn stem(&self) -> &str {
        &self.name.stem
    }
}

/// Kind of a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Component,
    Style,
    Test,
    Config,
    Doc,
    /// Root application, bootstrap and host page.
    Entry,
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// File name, the last path segment.
    pub name: String,
    /// Path relative to the project root.
    pub path: String,
    pub content: String,
    pub kind: FileKind,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>, kind: FileKind) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        Self {
            name,
            path,
            content: content.into(),
            kind,
        }
    }

    pub fn lines(&self) -> usize {
        self.content.lines().count()
    }
}

/// Output of one generation: a pure function of the element tree and config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProject {
    pub framework: Framework,
    pub files: Vec<GeneratedFile>,
    /// Package name to version constraint.
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    /// Script name to command, in manifest order.
    pub scripts: IndexMap<String, String>,
    pub readme: String,
    pub metrics: ProjectMetrics,
}

impl GeneratedProject {
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn files_of(&self, kind: FileKind) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }
}

/// Quote and escape a test description or literal for single-quoted JS.
pub(crate) fn quoted(s: &str) -> String {
    crate::emit::single_quoted(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_path() {
        let file = GeneratedFile::new("src/components/HeadingComponent.tsx", "", FileKind::Component);
        assert_eq!(file.name, "HeadingComponent.tsx");
        let file = GeneratedFile::new("README.md", "", FileKind::Doc);
        assert_eq!(file.name, "README.md");
    }

    #[test]
    fn test_file_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FileKind::Entry).unwrap(), "\"entry\"");
    }
}
