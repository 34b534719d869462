//! Error types for the Weft engine.

use crate::config::{Bundler, DeploymentTarget, Feature, Framework, StylingStrategy};
use thiserror::Error;

/// Top-level fatal error for one generation request.
#[derive(Debug, Error)]
pub enum WeftError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// An invalid configuration combination, rejected before emission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{framework} requires TypeScript")]
    TypeScriptRequired { framework: Framework },

    #[error("Bundler '{bundler}' is not supported for {framework}")]
    IncompatibleBundler { framework: Framework, bundler: Bundler },

    #[error("Styling strategy '{styling}' is not supported for {framework}")]
    IncompatibleStyling {
        framework: Framework,
        styling: StylingStrategy,
    },

    #[error("Feature '{feature}' is not supported for {framework}")]
    IncompatibleFeature { framework: Framework, feature: Feature },

    #[error("Features '{first}' and '{second}' cannot be combined")]
    ConflictingFeatures { first: Feature, second: Feature },

    #[error("Feature '{feature}' is not supported with bundler '{bundler}'")]
    FeatureNeedsBundler { feature: Feature, bundler: Bundler },

    #[error("Feature '{feature}' cannot be deployed to '{target}'")]
    FeatureNeedsTarget {
        feature: Feature,
        target: DeploymentTarget,
    },

    #[error("{framework} cannot be deployed to '{target}'")]
    IncompatibleTarget {
        framework: Framework,
        target: DeploymentTarget,
    },
}

impl ValidationError {
    /// The offending pair as `(left, right)` config values.
    pub fn pair(&self) -> (String, String) {
        match self {
            Self::TypeScriptRequired { framework } => {
                (framework.to_string(), "typescript=false".to_string())
            }
            Self::IncompatibleBundler { framework, bundler } => {
                (framework.to_string(), bundler.to_string())
            }
            Self::IncompatibleStyling { framework, styling } => {
                (framework.to_string(), styling.to_string())
            }
            Self::IncompatibleFeature { framework, feature } => {
                (framework.to_string(), feature.to_string())
            }
            Self::ConflictingFeatures { first, second } => (first.to_string(), second.to_string()),
            Self::FeatureNeedsBundler { feature, bundler } => {
                (feature.to_string(), bundler.to_string())
            }
            Self::FeatureNeedsTarget { feature, target } => {
                (feature.to_string(), target.to_string())
            }
            Self::IncompatibleTarget { framework, target } => {
                (framework.to_string(), target.to_string())
            }
        }
    }
}

/// A broken tree invariant. Indicates an upstream editor bug; never repaired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Duplicate element id: {id}")]
    DuplicateId { id: String },

    #[error("Element of kind '{kind}' has an empty id")]
    EmptyId { kind: String },

    #[error("Maximum nesting depth ({depth}) exceeded at element {id}")]
    MaxDepthExceeded { depth: usize, id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_pair() {
        let err = ValidationError::IncompatibleFeature {
            framework: Framework::Html,
            feature: Feature::Ssr,
        };
        assert_eq!(err.to_string(), "Feature 'ssr' is not supported for html");
        assert_eq!(err.pair(), ("html".to_string(), "ssr".to_string()));
    }
}
