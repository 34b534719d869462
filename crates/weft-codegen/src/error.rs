//! Error types for code generation.

use thiserror::Error;
use weft_core::{Framework, TreeError, ValidationError, WeftError};

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Fatal errors; a failed generation returns no project at all.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Invalid configuration combination.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// Broken element tree invariant.
    #[error("Invalid element tree: {0}")]
    Tree(#[from] TreeError),

    /// No backend registered for the requested framework.
    #[error("No generator registered for {0}")]
    UnsupportedFramework(Framework),

    /// A backend was asked to assemble a config for another framework.
    #[error("{backend} generator cannot assemble a {requested} project")]
    BackendMismatch {
        backend: Framework,
        requested: Framework,
    },

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid responsive rewrite pattern.
    #[error("Invalid rewrite pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl From<WeftError> for CodegenError {
    fn from(err: WeftError) -> Self {
        match err {
            WeftError::Validation(e) => CodegenError::Validation(e),
            WeftError::Tree(e) => CodegenError::Tree(e),
        }
    }
}

impl CodegenError {
    /// Configuration and tree errors are caller-facing; the rest are engine bugs.
    pub fn is_input_error(&self) -> bool {
        matches!(self, CodegenError::Validation(_) | CodegenError::Tree(_))
    }
}
