//! Request validation, run before any emission.
//!
//! Configuration pairs are checked in a fixed order and the first invalid
//! pair is reported:
//!
//! 1. Angular without TypeScript.
//! 2. `(framework, bundler)`.
//! 3. `(framework, stylingStrategy)`.
//! 4. `(framework, feature)`, features in declaration order.
//! 5. `(feature, feature)`: ssr and ssg are exclusive.
//! 6. `(feature, bundler)`: ssr and ssg need Vite.
//! 7. `(feature, deploymentTarget)`: ssr needs a server target.
//! 8. `(framework, deploymentTarget)`.
//!
//! The element tree is checked afterwards for its invariants.

use std::collections::HashSet;
use weft_core::{
    Bundler, DeploymentTarget, Element, Feature, Framework, GenerationConfig, StylingStrategy,
    TreeError, ValidationError, WeftError,
};

/// Deepest nesting accepted from the editor.
pub const MAX_DEPTH: usize = 64;

/// Facts gathered while validating the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub element_count: usize,
    pub max_depth: usize,
}

/// Validate config and tree together, config first.
pub fn validate_request(
    elements: &[Element],
    config: &GenerationConfig,
) -> Result<TreeStats, WeftError> {
    validate_config(config)?;
    Ok(validate_tree(elements)?)
}

/// Reject the first invalid configuration pair.
pub fn validate_config(config: &GenerationConfig) -> Result<(), ValidationError> {
    let framework = config.framework;

    if framework == Framework::Angular && !config.typescript {
        return Err(ValidationError::TypeScriptRequired { framework });
    }

    if !supported_bundlers(framework).contains(&config.bundler) {
        return Err(ValidationError::IncompatibleBundler {
            framework,
            bundler: config.bundler,
        });
    }

    if !supports_styling(framework, config.styling_strategy) {
        return Err(ValidationError::IncompatibleStyling {
            framework,
            styling: config.styling_strategy,
        });
    }

    for &feature in &config.features {
        if !supports_feature(framework, feature) {
            return Err(ValidationError::IncompatibleFeature { framework, feature });
        }
    }

    if config.has_feature(Feature::Ssr) && config.has_feature(Feature::Ssg) {
        return Err(ValidationError::ConflictingFeatures {
            first: Feature::Ssr,
            second: Feature::Ssg,
        });
    }

    for feature in [Feature::Ssr, Feature::Ssg] {
        if config.has_feature(feature) && config.bundler != Bundler::Vite {
            return Err(ValidationError::FeatureNeedsBundler {
                feature,
                bundler: config.bundler,
            });
        }
    }

    if config.has_feature(Feature::Ssr) && !config.deployment_target.runs_server() {
        return Err(ValidationError::FeatureNeedsTarget {
            feature: Feature::Ssr,
            target: config.deployment_target,
        });
    }

    if framework == Framework::Html && config.deployment_target == DeploymentTarget::Node {
        return Err(ValidationError::IncompatibleTarget {
            framework,
            target: config.deployment_target,
        });
    }

    Ok(())
}

/// Every invalid pair, in check order. Useful for surfacing all problems at once.
pub fn config_problems(config: &GenerationConfig) -> Vec<ValidationError> {
    let mut problems = Vec::new();
    let mut probe = config.clone();

    // Repair each reported pair on a scratch copy until the config passes.
    while let Err(err) = validate_config(&probe) {
        match &err {
            ValidationError::TypeScriptRequired { .. } => probe.typescript = true,
            ValidationError::IncompatibleBundler { framework, .. } => {
                probe.bundler = supported_bundlers(*framework)[0]
            }
            ValidationError::IncompatibleStyling { .. } => {
                probe.styling_strategy = StylingStrategy::Inline
            }
            ValidationError::IncompatibleFeature { feature, .. }
            | ValidationError::FeatureNeedsBundler { feature, .. }
            | ValidationError::FeatureNeedsTarget { feature, .. } => {
                probe.features.remove(feature);
            }
            ValidationError::ConflictingFeatures { second, .. } => {
                probe.features.remove(second);
            }
            ValidationError::IncompatibleTarget { .. } => {
                probe.deployment_target = DeploymentTarget::Static
            }
        }
        problems.push(err);
    }
    problems
}

/// Bundlers supported per framework; the first is the default.
pub fn supported_bundlers(framework: Framework) -> &'static [Bundler] {
    match framework {
        Framework::React => &[Bundler::Vite, Bundler::Webpack, Bundler::Parcel, Bundler::Esbuild],
        Framework::Vue | Framework::Svelte => &[Bundler::Vite, Bundler::Webpack],
        Framework::Angular => &[Bundler::AngularCli],
        Framework::Html => &[Bundler::Vite, Bundler::Parcel],
    }
}

pub fn supports_styling(framework: Framework, styling: StylingStrategy) -> bool {
    match styling {
        StylingStrategy::UtilityClasses | StylingStrategy::Inline => true,
        StylingStrategy::StyledComponents => framework == Framework::React,
        StylingStrategy::CssModules => !matches!(framework, Framework::Angular | Framework::Html),
    }
}

pub fn supports_feature(framework: Framework, feature: Feature) -> bool {
    match framework {
        Framework::Html => matches!(feature, Feature::DarkMode | Feature::Pwa),
        Framework::Angular => !matches!(feature, Feature::Ssr | Feature::Ssg),
        _ => true,
    }
}

/// Check tree invariants: non-empty unique ids and bounded depth.
pub fn validate_tree(elements: &[Element]) -> Result<TreeStats, TreeError> {
    let mut ids: HashSet<&str> = HashSet::new();
    let mut stats = TreeStats::default();
    let mut stack: Vec<(&Element, usize)> = elements.iter().rev().map(|e| (e, 1)).collect();

    while let Some((element, depth)) = stack.pop() {
        if depth > MAX_DEPTH {
            return Err(TreeError::MaxDepthExceeded {
                depth: MAX_DEPTH,
                id: element.id.to_string(),
            });
        }
        if element.id.as_str().trim().is_empty() {
            return Err(TreeError::EmptyId {
                kind: element.kind.clone(),
            });
        }
        if !ids.insert(element.id.as_str()) {
            return Err(TreeError::DuplicateId {
                id: element.id.to_string(),
            });
        }

        stats.element_count += 1;
        stats.max_depth = stats.max_depth.max(depth);
        for child in element.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        for framework in Framework::ALL {
            let config = GenerationConfig::for_framework(framework);
            assert!(validate_config(&config).is_ok(), "{framework}");
        }
    }

    #[test]
    fn test_html_rejects_ssr() {
        let config = GenerationConfig::for_framework(Framework::Html)
            .with_feature(Feature::Ssr)
            .with_deployment(DeploymentTarget::Node);
        assert_eq!(
            validate_config(&config),
            Err(ValidationError::IncompatibleFeature {
                framework: Framework::Html,
                feature: Feature::Ssr
            })
        );
    }

    #[test]
    fn test_angular_requires_typescript() {
        let config = GenerationConfig::for_framework(Framework::Angular).with_typescript(false);
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::TypeScriptRequired { .. })
        ));
    }

    #[test]
    fn test_bundler_pairs() {
        let config = GenerationConfig::for_framework(Framework::Vue).with_bundler(Bundler::Parcel);
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::IncompatibleBundler { .. })
        ));
        let config = GenerationConfig::for_framework(Framework::React).with_bundler(Bundler::AngularCli);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_styled_components_react_only() {
        let config = GenerationConfig::for_framework(Framework::Svelte)
            .with_styling(StylingStrategy::StyledComponents);
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::IncompatibleStyling { .. })
        ));
    }

    #[test]
    fn test_ssr_needs_server_target() {
        let config = GenerationConfig::default().with_feature(Feature::Ssr);
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::FeatureNeedsTarget { .. })
        ));
        let config = config.with_deployment(DeploymentTarget::Node);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_ssr_ssg_conflict() {
        let config = GenerationConfig::default()
            .with_feature(Feature::Ssr)
            .with_feature(Feature::Ssg)
            .with_deployment(DeploymentTarget::Node);
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::ConflictingFeatures { .. })
        ));
    }

    #[test]
    fn test_config_problems_lists_all() {
        let config = GenerationConfig::for_framework(Framework::Html)
            .with_bundler(Bundler::Webpack)
            .with_feature(Feature::Routing)
            .with_feature(Feature::I18n);
        let problems = config_problems(&config);
        assert_eq!(problems.len(), 3);
        assert!(matches!(problems[0], ValidationError::IncompatibleBundler { .. }));
    }

    #[test]
    fn test_duplicate_id() {
        let tree = vec![
            Element::new("a", "container").with_child(Element::new("b", "text")),
            Element::new("b", "button"),
        ];
        assert_eq!(validate_tree(&tree), Err(TreeError::DuplicateId { id: "b".into() }));
    }

    #[test]
    fn test_empty_id() {
        let tree = vec![Element::new(" ", "text")];
        assert!(matches!(validate_tree(&tree), Err(TreeError::EmptyId { .. })));
    }

    #[test]
    fn test_depth_limit() {
        let mut element = Element::new("leaf", "text");
        for i in 0..MAX_DEPTH {
            element = Element::new(format!("n{}", i), "container").with_child(element);
        }
        assert!(matches!(
            validate_tree(&[element]),
            Err(TreeError::MaxDepthExceeded { .. })
        ));
    }

    #[test]
    fn test_stats() {
        let tree = vec![
            Element::new("a", "container").with_child(Element::new("b", "text")),
            Element::new("c", "button"),
        ];
        assert_eq!(
            validate_tree(&tree).unwrap(),
            TreeStats {
                element_count: 3,
                max_depth: 2
            }
        );
    }
}
