//! Exporting one element tree to several targets at once.
//!
//! Generations share nothing mutable, so each config runs independently;
//! with the `parallel` feature they run on the rayon pool. Results keep the
//! order of `configs` and one failing config does not affect the others.

use crate::assembler::Generation;
use crate::error::Result;
use crate::registry::GeneratorRegistry;
use weft_core::{Element, GenerationConfig};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One generation per config, in input order.
#[cfg(feature = "parallel")]
pub fn generate_many(
    registry: &GeneratorRegistry,
    elements: &[Element],
    configs: &[GenerationConfig],
) -> Vec<Result<Generation>> {
    tracing::debug!(targets = configs.len(), "parallel export");
    configs
        .par_iter()
        .map(|config| registry.generate(elements, config))
        .collect()
}

/// One generation per config, in input order.
#[cfg(not(feature = "parallel"))]
pub fn generate_many(
    registry: &GeneratorRegistry,
    elements: &[Element],
    configs: &[GenerationConfig],
) -> Vec<Result<Generation>> {
    tracing::debug!(targets = configs.len(), "sequential export");
    configs
        .iter()
        .map(|config| registry.generate(elements, config))
        .collect()
}
