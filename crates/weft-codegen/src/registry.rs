//! Backend selection by framework.

use crate::assembler::{Generation, ProjectAssembler};
use crate::emit::EmitContext;
use crate::error::{CodegenError, Result};
use crate::generators::CodeGenerator;
use crate::responsive::ResponsiveRules;
use weft_core::{Diagnostic, Element, Framework, GenerationConfig};

/// The compiled-in backends, one per framework.
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn CodeGenerator>>,
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorRegistry {
    /// Registry holding every backend enabled at compile time.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        #[cfg(feature = "react")]
        registry.register(Box::new(crate::generators::ReactGenerator::new()));
        #[cfg(feature = "vue")]
        registry.register(Box::new(crate::generators::VueGenerator::new()));
        #[cfg(feature = "angular")]
        registry.register(Box::new(crate::generators::AngularGenerator::new()));
        #[cfg(feature = "svelte")]
        registry.register(Box::new(crate::generators::SvelteGenerator::new()));
        #[cfg(feature = "html")]
        registry.register(Box::new(crate::generators::HtmlGenerator::new()));
        registry
    }

    pub fn empty() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    /// Add a backend, replacing any existing one for the same framework.
    pub fn register(&mut self, generator: Box<dyn CodeGenerator>) {
        let framework = generator.framework();
        self.generators.retain(|g| g.framework() != framework);
        self.generators.push(generator);
    }

    pub fn get(&self, framework: Framework) -> Option<&dyn CodeGenerator> {
        self.generators
            .iter()
            .find(|g| g.framework() == framework)
            .map(|g| g.as_ref())
    }

    /// Registered frameworks, in registration order.
    pub fn frameworks(&self) -> Vec<Framework> {
        self.generators.iter().map(|g| g.framework()).collect()
    }

    fn backend(&self, framework: Framework) -> Result<&dyn CodeGenerator> {
        self.get(framework)
            .ok_or(CodegenError::UnsupportedFramework(framework))
    }

    /// Generate a project with the backend the config names.
    pub fn generate(&self, elements: &[Element], config: &GenerationConfig) -> Result<Generation> {
        ProjectAssembler::new(self.backend(config.framework)?).assemble(elements, config)
    }

    /// Emit one element subtree as a standalone markup fragment with literal
    /// values, e.g. for preview rendering. Nothing is validated beyond the tag
    /// lookup.
    pub fn emit_fragment(
        &self,
        element: &Element,
        config: &GenerationConfig,
        indent: usize,
    ) -> Result<(String, Vec<Diagnostic>)> {
        let backend = self.backend(config.framework)?;
        let rules = ResponsiveRules::tailwind()?;
        let mut ctx = EmitContext::new(config, backend.tag_table(), &rules);
        let markup = backend.emit(element, &mut ctx, indent);
        Ok((markup, ctx.into_diagnostics()))
    }
}
