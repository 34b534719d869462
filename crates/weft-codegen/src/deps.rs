//! Dependency resolution.
//!
//! Resolution is pure set union: the backend's base packages, then styling,
//! bundler, TypeScript, test and deployment packages. Versions come from a
//! static compatibility table; nothing is looked up over the network.

use std::collections::{BTreeMap, BTreeSet};
use weft_core::{
    Bundler, DeploymentTarget, Feature, Framework, GenerationConfig, Optimization, StylingStrategy,
};

/// Constraint used for packages missing from the table.
pub const UNPINNED: &str = "latest";

/// Pinned constraints, sorted by package name.
const VERSIONS: &[(&str, &str)] = &[
    ("@angular-devkit/build-angular", "^18.2.0"),
    ("@angular/cli", "^18.2.0"),
    ("@angular/common", "^18.2.0"),
    ("@angular/compiler", "^18.2.0"),
    ("@angular/compiler-cli", "^18.2.0"),
    ("@angular/core", "^18.2.0"),
    ("@angular/platform-browser", "^18.2.0"),
    ("@angular/router", "^18.2.0"),
    ("@angular/service-worker", "^18.2.0"),
    ("@babel/core", "^7.25.2"),
    ("@babel/preset-env", "^7.25.3"),
    ("@babel/preset-react", "^7.24.7"),
    ("@sveltejs/vite-plugin-svelte", "^4.0.0"),
    ("@testing-library/jest-dom", "^6.4.8"),
    ("@testing-library/react", "^16.0.0"),
    ("@testing-library/svelte", "^5.2.1"),
    ("@testing-library/vue", "^8.1.0"),
    ("@types/express", "^4.17.21"),
    ("@types/jasmine", "~5.1.4"),
    ("@types/node", "^22.5.0"),
    ("@types/react", "^18.3.3"),
    ("@types/react-dom", "^18.3.0"),
    ("@vitejs/plugin-react", "^4.3.1"),
    ("@vitejs/plugin-vue", "^5.1.2"),
    ("autoprefixer", "^10.4.20"),
    ("babel-loader", "^9.1.3"),
    ("compression", "^1.7.4"),
    ("css-loader", "^7.1.2"),
    ("esbuild", "^0.23.1"),
    ("esbuild-style-plugin", "^1.6.3"),
    ("express", "^4.19.2"),
    ("html-webpack-plugin", "^5.6.0"),
    ("i18next", "^23.14.0"),
    ("jasmine-core", "~5.2.0"),
    ("jsdom", "^25.0.0"),
    ("karma", "~6.4.4"),
    ("karma-chrome-launcher", "~3.2.0"),
    ("karma-coverage", "~2.2.1"),
    ("karma-jasmine", "~5.1.0"),
    ("karma-jasmine-html-reporter", "~2.1.0"),
    ("parcel", "^2.12.0"),
    ("pinia", "^2.2.2"),
    ("postcss", "^8.4.41"),
    ("postcss-loader", "^8.1.1"),
    ("react", "^18.3.1"),
    ("react-dom", "^18.3.1"),
    ("react-i18next", "^15.0.1"),
    ("react-router-dom", "^6.26.1"),
    ("rxjs", "~7.8.1"),
    ("sharp", "^0.33.5"),
    ("sirv", "^2.0.4"),
    ("style-loader", "^4.0.0"),
    ("styled-components", "^6.1.12"),
    ("svelte", "^5.0.0"),
    ("svelte-check", "^4.0.0"),
    ("svelte-i18n", "^4.0.0"),
    ("svelte-loader", "^3.2.3"),
    ("svelte-spa-router", "^4.0.1"),
    ("tailwindcss", "^3.4.10"),
    ("ts-loader", "^9.5.1"),
    ("tslib", "^2.6.3"),
    ("typescript", "^5.5.4"),
    ("vite", "^5.4.2"),
    ("vite-plugin-image-optimizer", "^1.1.8"),
    ("vite-plugin-pwa", "^0.20.5"),
    ("vitest", "^2.0.5"),
    ("vue", "^3.4.38"),
    ("vue-i18n", "^9.14.0"),
    ("vue-loader", "^17.4.2"),
    ("vue-router", "^4.4.3"),
    ("vue-tsc", "^2.1.4"),
    ("webpack", "^5.94.0"),
    ("webpack-cli", "^5.1.4"),
    ("webpack-dev-server", "^5.0.4"),
    ("zone.js", "~0.14.10"),
    ("zustand", "^4.5.5"),
];

/// Version constraint for a package.
pub fn version_of(name: &str) -> &'static str {
    VERSIONS
        .binary_search_by(|(pkg, _)| (*pkg).cmp(name))
        .map(|i| VERSIONS[i].1)
        .unwrap_or(UNPINNED)
}

/// Unpinned package names, split into runtime and development sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packages {
    pub dependencies: BTreeSet<&'static str>,
    pub dev_dependencies: BTreeSet<&'static str>,
}

impl Packages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dep(&mut self, name: &'static str) -> &mut Self {
        self.dependencies.insert(name);
        self
    }

    pub fn deps(&mut self, names: &[&'static str]) -> &mut Self {
        self.dependencies.extend(names.iter().copied());
        self
    }

    pub fn dev(&mut self, name: &'static str) -> &mut Self {
        self.dev_dependencies.insert(name);
        self
    }

    pub fn devs(&mut self, names: &[&'static str]) -> &mut Self {
        self.dev_dependencies.extend(names.iter().copied());
        self
    }

    pub fn merge(&mut self, other: Packages) -> &mut Self {
        self.dependencies.extend(other.dependencies);
        self.dev_dependencies.extend(other.dev_dependencies);
        self
    }
}

/// Pinned dependency sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDependencies {
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

/// Union the backend's packages with everything the config pulls in and pin them.
pub fn resolve(base: Packages, config: &GenerationConfig) -> ResolvedDependencies {
    let mut packages = base;
    packages
        .merge(styling_packages(config))
        .merge(bundler_packages(config))
        .merge(support_packages(config));

    let pin = |names: &BTreeSet<&'static str>| -> BTreeMap<String, String> {
        names
            .iter()
            .map(|name| (name.to_string(), version_of(name).to_string()))
            .collect()
    };

    let dependencies = pin(&packages.dependencies);
    let mut dev_dependencies = pin(&packages.dev_dependencies);
    // A runtime dependency is never also listed as a dev dependency.
    dev_dependencies.retain(|name, _| !dependencies.contains_key(name));

    tracing::debug!(
        dependencies = dependencies.len(),
        dev_dependencies = dev_dependencies.len(),
        "resolved dependencies"
    );

    ResolvedDependencies {
        dependencies,
        dev_dependencies,
    }
}

/// Packages required by the styling strategy.
pub fn styling_packages(config: &GenerationConfig) -> Packages {
    let mut packages = Packages::new();
    match config.styling_strategy {
        StylingStrategy::UtilityClasses => {
            packages.devs(&["tailwindcss", "postcss", "autoprefixer"]);
            match config.bundler {
                Bundler::Webpack => {
                    packages.dev("postcss-loader");
                }
                Bundler::Esbuild => {
                    packages.dev("esbuild-style-plugin");
                }
                _ => {}
            }
        }
        StylingStrategy::StyledComponents => {
            packages.dep("styled-components");
        }
        StylingStrategy::CssModules | StylingStrategy::Inline => {}
    }
    packages
}

/// Build tool packages, including framework loaders and plugins.
pub fn bundler_packages(config: &GenerationConfig) -> Packages {
    let mut packages = Packages::new();
    let framework = config.framework;
    match config.bundler {
        Bundler::Vite => {
            packages.dev("vite");
            if let Some(plugin) = crate::bundler::vite_plugin(framework) {
                packages.dev(plugin.package);
            }
            if config.has_feature(Feature::Pwa) {
                packages.dev("vite-plugin-pwa");
            }
            if config.optimizes(Optimization::ImageOptimization) {
                packages.devs(&["vite-plugin-image-optimizer", "sharp"]);
            }
        }
        Bundler::Webpack => {
            packages.devs(&[
                "webpack",
                "webpack-cli",
                "webpack-dev-server",
                "html-webpack-plugin",
                "css-loader",
                "style-loader",
            ]);
            if config.typescript {
                packages.dev("ts-loader");
            } else if framework == Framework::React {
                packages.devs(&["babel-loader", "@babel/core", "@babel/preset-env", "@babel/preset-react"]);
            }
            match framework {
                Framework::Vue => {
                    packages.dev("vue-loader");
                }
                Framework::Svelte => {
                    packages.dev("svelte-loader");
                }
                _ => {}
            }
        }
        Bundler::Parcel => {
            packages.dev("parcel");
        }
        Bundler::Esbuild => {
            packages.dev("esbuild");
        }
        Bundler::AngularCli => {
            packages.devs(&["@angular/cli", "@angular-devkit/build-angular"]);
        }
    }
    packages
}

/// TypeScript, test runner and server packages.
pub fn support_packages(config: &GenerationConfig) -> Packages {
    let mut packages = Packages::new();
    let framework = config.framework;

    if config.typescript {
        packages.dev("typescript");
    }

    if config.include_tests {
        match framework {
            Framework::React => {
                packages.devs(&["vitest", "jsdom", "@testing-library/react", "@testing-library/jest-dom"]);
            }
            Framework::Vue => {
                packages.devs(&["vitest", "jsdom", "@testing-library/vue", "@testing-library/jest-dom"]);
            }
            Framework::Svelte => {
                packages.devs(&["vitest", "jsdom", "@testing-library/svelte", "@testing-library/jest-dom"]);
            }
            Framework::Angular => {
                packages.devs(&[
                    "jasmine-core",
                    "karma",
                    "karma-chrome-launcher",
                    "karma-coverage",
                    "karma-jasmine",
                    "karma-jasmine-html-reporter",
                    "@types/jasmine",
                ]);
            }
            Framework::Html => {}
        }
        // Vitest outside Vite still needs the framework's Vite plugin.
        if config.bundler != Bundler::Vite {
            if let Some(plugin) = crate::bundler::vite_plugin(framework) {
                packages.dev(plugin.package);
            }
        }
    }

    if needs_server(config) {
        packages.deps(&["express", "compression", "sirv"]);
        if config.typescript {
            packages.devs(&["@types/express", "@types/node"]);
        }
    }

    packages
}

/// Whether the project ships `server.js`.
pub fn needs_server(config: &GenerationConfig) -> bool {
    config.has_feature(Feature::Ssr) || config.deployment_target == DeploymentTarget::Node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_table_is_sorted() {
        let names: Vec<&str> = VERSIONS.iter().map(|(n, _)| *n).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_unknown_package_is_unpinned() {
        assert_eq!(version_of("react"), "^18.3.1");
        assert_eq!(version_of("left-pad"), UNPINNED);
    }

    #[test]
    fn test_union_without_duplicates() {
        let mut base = Packages::new();
        base.deps(&["react", "react-dom"]).dev("typescript");
        let config = GenerationConfig::default();
        let resolved = resolve(base, &config);

        assert!(resolved.dependencies.contains_key("react"));
        assert!(resolved.dev_dependencies.contains_key("tailwindcss"));
        assert!(resolved.dev_dependencies.contains_key("vite"));
        assert_eq!(
            resolved.dev_dependencies.keys().filter(|k| *k == "typescript").count(),
            1
        );
    }

    #[test]
    fn test_runtime_wins_over_dev() {
        let mut base = Packages::new();
        base.dep("vite");
        let resolved = resolve(base, &GenerationConfig::default());
        assert!(resolved.dependencies.contains_key("vite"));
        assert!(!resolved.dev_dependencies.contains_key("vite"));
    }

    #[test]
    fn test_styled_components_is_runtime() {
        let config = GenerationConfig::default().with_styling(StylingStrategy::StyledComponents);
        let resolved = resolve(Packages::new(), &config);
        assert!(resolved.dependencies.contains_key("styled-components"));
        assert!(!resolved.dev_dependencies.contains_key("tailwindcss"));
    }

    #[test]
    fn test_server_packages_for_node_target() {
        let config = GenerationConfig::default().with_deployment(DeploymentTarget::Node);
        let resolved = resolve(Packages::new(), &config);
        assert!(resolved.dependencies.contains_key("express"));
        assert!(resolved.dev_dependencies.contains_key("@types/express"));
    }
}
