//! Code generation from Weft element trees to web framework projects.
//!
//! An element tree from the visual editor plus a [`GenerationConfig`] goes
//! in; a complete, buildable [`GeneratedProject`] comes out. Each top-level
//! element becomes one component with an inferred prop interface, and the
//! project is wrapped with a root component, bootstrap, styling, feature
//! modules, bundler configuration, a package manifest and a README.
//!
//! # Features
//!
//! - `react` - React function components (TSX/JSX)
//! - `vue` - Vue 3 single-file components
//! - `angular` - Angular standalone components
//! - `svelte` - Svelte 5 components
//! - `html` - Static HTML pages
//! - `parallel` - Run [`generate_many`] on the rayon pool
//!
//! # Example
//!
//! ```
//! use weft_codegen::weft_core::{Element, Framework, GenerationConfig};
//! use weft_codegen::GeneratorRegistry;
//!
//! let elements = vec![Element::new("title", "heading").with_prop("text", "Hello")];
//! let config = GenerationConfig::for_framework(Framework::React);
//!
//! let generation = GeneratorRegistry::new().generate(&elements, &config)?;
//! assert!(generation
//!     .project
//!     .file("src/components/HeadingComponent.tsx")
//!     .is_some());
//! # Ok::<(), weft_codegen::CodegenError>(())
//! ```

pub mod assembler;
pub mod batch;
pub mod bundler;
pub mod cache;
pub mod deps;
pub mod emit;
pub mod error;
pub mod generators;
pub mod infer;
pub mod manifest;
pub mod metrics;
pub mod naming;
pub mod registry;
pub mod responsive;
pub mod scaffold;
pub mod tags;
pub mod validate;

pub use weft_core;

pub use assembler::{Generation, ProjectAssembler};
pub use batch::generate_many;
pub use cache::{cache_key, GenerationCache};
pub use emit::{EmitContext, Markup, Scope};
pub use error::{CodegenError, Result};
pub use generators::{
    CodeGenerator, ComponentUnit, FileKind, GeneratedFile, GeneratedProject, TemplateEngine,
};
pub use infer::{PropInferencer, PropInterface, PropType};
pub use metrics::ProjectMetrics;
pub use registry::GeneratorRegistry;
pub use responsive::{ResponsiveRules, RewriteRule};
pub use tags::{TagTable, TargetPrimitive};
pub use validate::{config_problems, validate_config, validate_tree, TreeStats};

pub use weft_core::{Diagnostic, DiagnosticKind, Element, Framework, GenerationConfig};

// Re-export framework-specific generators
#[cfg(feature = "react")]
pub use generators::ReactGenerator;

#[cfg(feature = "vue")]
pub use generators::VueGenerator;

#[cfg(feature = "angular")]
pub use generators::AngularGenerator;

#[cfg(feature = "svelte")]
pub use generators::SvelteGenerator;

#[cfg(feature = "html")]
pub use generators::HtmlGenerator;
