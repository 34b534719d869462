//! Core types for the Weft code generation engine.
//!
//! This crate provides the data model shared by the generator backends and
//! the bindings:
//! - The canonical element tree produced by the visual editor
//! - The generation config describing one export request
//! - Diagnostics recorded during generation
//! - Error types

pub mod config;
pub mod diagnostics;
pub mod element;
pub mod errors;

pub use config::*;
pub use diagnostics::*;
pub use element::*;
pub use errors::*;
