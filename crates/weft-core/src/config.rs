//! Generation config: the immutable description of one export request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Target framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    React,
    Vue,
    Angular,
    Svelte,
    Html,
}

impl Framework {
    pub const ALL: [Framework; 5] = [
        Framework::React,
        Framework::Vue,
        Framework::Angular,
        Framework::Svelte,
        Framework::Html,
    ];

    /// Config value, e.g. `react`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue => "vue",
            Self::Angular => "angular",
            Self::Svelte => "svelte",
            Self::Html => "html",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::React => "React",
            Self::Vue => "Vue",
            Self::Angular => "Angular",
            Self::Svelte => "Svelte",
            Self::Html => "HTML",
        }
    }

    /// Whether components receive caller children as a prop.
    pub fn has_children_prop(&self) -> bool {
        matches!(self, Self::React | Self::Vue | Self::Svelte)
    }

    /// Whether the framework has a component model at all.
    pub fn has_components(&self) -> bool {
        !matches!(self, Self::Html)
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How styling is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StylingStrategy {
    #[default]
    UtilityClasses,
    CssModules,
    StyledComponents,
    Inline,
}

impl StylingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UtilityClasses => "utility-classes",
            Self::CssModules => "css-modules",
            Self::StyledComponents => "styled-components",
            Self::Inline => "inline",
        }
    }
}

impl std::fmt::Display for StylingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build tool driving the emitted project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bundler {
    #[default]
    Vite,
    Webpack,
    Parcel,
    Esbuild,
    AngularCli,
}

impl Bundler {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vite => "vite",
            Self::Webpack => "webpack",
            Self::Parcel => "parcel",
            Self::Esbuild => "esbuild",
            Self::AngularCli => "angular-cli",
        }
    }
}

impl std::fmt::Display for Bundler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the emitted project is meant to be deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentTarget {
    #[default]
    Static,
    Vercel,
    Netlify,
    Node,
    Docker,
}

impl DeploymentTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Vercel => "vercel",
            Self::Netlify => "netlify",
            Self::Node => "node",
            Self::Docker => "docker",
        }
    }

    /// Targets that run a server process.
    pub fn runs_server(&self) -> bool {
        matches!(self, Self::Vercel | Self::Node | Self::Docker)
    }
}

impl std::fmt::Display for DeploymentTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent feature toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    Routing,
    StateManagement,
    DarkMode,
    I18n,
    Pwa,
    Ssr,
    Ssg,
    ApiIntegration,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Routing => "routing",
            Self::StateManagement => "state-management",
            Self::DarkMode => "dark-mode",
            Self::I18n => "i18n",
            Self::Pwa => "pwa",
            Self::Ssr => "ssr",
            Self::Ssg => "ssg",
            Self::ApiIntegration => "api-integration",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory optimization flags, embedded into the emitted build config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Optimization {
    Minify,
    TreeShaking,
    CodeSplitting,
    LazyLoading,
    ImageOptimization,
}

impl Optimization {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minify => "minify",
            Self::TreeShaking => "tree-shaking",
            Self::CodeSplitting => "code-splitting",
            Self::LazyLoading => "lazy-loading",
            Self::ImageOptimization => "image-optimization",
        }
    }
}

/// One export request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    /// Package name used in the manifest and README.
    pub project_name: String,
    pub framework: Framework,
    pub typescript: bool,
    pub styling_strategy: StylingStrategy,
    pub bundler: Bundler,
    pub deployment_target: DeploymentTarget,
    pub features: BTreeSet<Feature>,
    pub optimization: BTreeSet<Optimization>,
    /// Emit one test file per component.
    pub include_tests: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            project_name: "weft-app".to_string(),
            framework: Framework::React,
            typescript: true,
            styling_strategy: StylingStrategy::UtilityClasses,
            bundler: Bundler::Vite,
            deployment_target: DeploymentTarget::Static,
            features: BTreeSet::new(),
            optimization: BTreeSet::new(),
            include_tests: false,
        }
    }
}

impl GenerationConfig {
    /// Config for a framework with its conventional bundler.
    pub fn for_framework(framework: Framework) -> Self {
        let bundler = match framework {
            Framework::Angular => Bundler::AngularCli,
            _ => Bundler::Vite,
        };
        Self {
            framework,
            bundler,
            ..Self::default()
        }
    }

    pub fn with_typescript(mut self, typescript: bool) -> Self {
        self.typescript = typescript;
        self
    }

    pub fn with_styling(mut self, strategy: StylingStrategy) -> Self {
        self.styling_strategy = strategy;
        self
    }

    pub fn with_bundler(mut self, bundler: Bundler) -> Self {
        self.bundler = bundler;
        self
    }

    pub fn with_deployment(mut self, target: DeploymentTarget) -> Self {
        self.deployment_target = target;
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn with_optimization(mut self, optimization: Optimization) -> Self {
        self.optimization.insert(optimization);
        self
    }

    pub fn with_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn optimizes(&self, optimization: Optimization) -> bool {
        self.optimization.contains(&optimization)
    }

    /// Script extension, `ts` or `js`.
    pub fn script_ext(&self) -> &'static str {
        if self.typescript {
            "ts"
        } else {
            "js"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{"framework":"vue","stylingStrategy":"css-modules"}"#).unwrap();

        assert_eq!(config.framework, Framework::Vue);
        assert_eq!(config.styling_strategy, StylingStrategy::CssModules);
        assert!(config.typescript);
        assert_eq!(config.project_name, "weft-app");
    }

    #[test]
    fn test_feature_sets_deserialize_kebab_case() {
        let config: GenerationConfig = serde_json::from_str(
            r#"{"features":["state-management","routing"],"optimization":["tree-shaking"],"deploymentTarget":"netlify"}"#,
        )
        .unwrap();

        let features: Vec<_> = config.features.iter().copied().collect();
        assert_eq!(features, vec![Feature::Routing, Feature::StateManagement]);
        assert!(config.optimizes(Optimization::TreeShaking));
        assert_eq!(config.deployment_target, DeploymentTarget::Netlify);
    }

    #[test]
    fn test_for_framework_picks_bundler() {
        assert_eq!(GenerationConfig::for_framework(Framework::Angular).bundler, Bundler::AngularCli);
        assert_eq!(GenerationConfig::for_framework(Framework::Svelte).bundler, Bundler::Vite);
    }
}
