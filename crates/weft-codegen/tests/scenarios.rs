//! End-to-end generation scenarios across every backend.

use weft_codegen::weft_core::{
    DeploymentTarget, Element, Feature, Framework, GenerationConfig, StylingStrategy,
    ValidationError,
};
use weft_codegen::{generate_many, CodegenError, DiagnosticKind, FileKind, GeneratorRegistry};

const INVALID_FEATURES: &[(Framework, Feature)] = &[
    (Framework::Angular, Feature::Ssr),
    (Framework::Angular, Feature::Ssg),
    (Framework::Html, Feature::Routing),
    (Framework::Html, Feature::StateManagement),
    (Framework::Html, Feature::I18n),
    (Framework::Html, Feature::Ssr),
    (Framework::Html, Feature::Ssg),
    (Framework::Html, Feature::ApiIntegration),
];

fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn landing_page() -> Vec<Element> {
    vec![
        Element::new("nav", "navbar")
            .with_child(Element::new("home", "link").with_prop("href", "/").with_prop("text", "Home")),
        Element::new("hero", "hero")
            .with_prop("className", "p-8 text-center")
            .with_child(Element::new("title", "heading").with_prop("text", "Ship faster"))
            .with_child(
                Element::new("cta", "button")
                    .with_prop("text", "Get started")
                    .with_prop("disabled", false),
            ),
        Element::new("pricing", "card")
            .with_style("border-radius", "8px")
            .with_child(Element::new("price", "text").with_prop("text", 19.99)),
        Element::new("rule", "divider"),
    ]
}

#[test]
fn test_react_heading_scenario() {
    init_test_logging();
    let elements = vec![Element::new("h", "heading").with_prop("text", "Hello")];
    let config = GenerationConfig::for_framework(Framework::React)
        .with_typescript(true)
        .with_styling(StylingStrategy::UtilityClasses);

    let generation = GeneratorRegistry::new().generate(&elements, &config).unwrap();
    let project = &generation.project;

    let components: Vec<_> = project.files_of(FileKind::Component).collect();
    assert_eq!(components.len(), 1);
    let component = components[0];
    assert_eq!(component.path, "src/components/HeadingComponent.tsx");
    assert!(component.content.contains("export interface HeadingComponentProps"));
    assert!(component.content.contains("export default function HeadingComponent("));
    assert!(component.content.contains("text = \"Hello\""));
    assert!(component.content.contains("<h1 className={className} style={style}>{text}</h1>"));

    assert!(project.has_dependency("react"));
    assert!(project.has_dependency("react-dom"));
    assert!(!project.has_dependency("vue"));
    assert!(!project.has_dependency("@angular/core"));
    assert!(generation.diagnostics.is_empty());
}

#[test]
fn test_duplicate_kinds_get_distinct_names() {
    let elements = vec![
        Element::new("save", "button").with_prop("text", "Save"),
        Element::new("cancel", "button").with_prop("text", "Cancel"),
    ];
    let config = GenerationConfig::for_framework(Framework::React);
    let project = GeneratorRegistry::new().generate(&elements, &config).unwrap().project;

    assert!(project.file("src/components/ButtonComponent.tsx").is_some());
    assert!(project.file("src/components/ButtonComponent2.tsx").is_some());

    let app = &project.file("src/App.tsx").unwrap().content;
    assert!(app.contains("import ButtonComponent from './components/ButtonComponent';"));
    assert!(app.contains("import ButtonComponent2 from './components/ButtonComponent2';"));
    assert!(app.contains("<ButtonComponent />"));
    assert!(app.contains("<ButtonComponent2 />"));
}

#[test]
fn test_duplicate_kinds_in_file_based_frameworks() {
    let elements = vec![Element::new("a", "card"), Element::new("b", "card")];
    let registry = GeneratorRegistry::new();

    let angular = registry
        .generate(&elements, &GenerationConfig::for_framework(Framework::Angular))
        .unwrap()
        .project;
    assert!(angular.file("src/app/components/card.component.ts").is_some());
    assert!(angular.file("src/app/components/card-2.component.ts").is_some());

    let html = registry
        .generate(&elements, &GenerationConfig::for_framework(Framework::Html))
        .unwrap()
        .project;
    assert!(html.file("src/components/card.html").is_some());
    assert!(html.file("src/components/card-2.html").is_some());
}

#[test]
fn test_invalid_feature_pairs_are_fatal() {
    let registry = GeneratorRegistry::new();
    for &(framework, feature) in INVALID_FEATURES {
        let config = GenerationConfig::for_framework(framework).with_feature(feature);
        match registry.generate(&landing_page(), &config) {
            Err(CodegenError::Validation(ValidationError::IncompatibleFeature {
                framework: f,
                feature: g,
            })) => {
                assert_eq!((f, g), (framework, feature));
            }
            other => panic!("{} + {} should be rejected, got {:?}", framework, feature, other.map(|_| ())),
        }
    }
}

#[test]
fn test_server_rendering_needs_server_target() {
    let registry = GeneratorRegistry::new();
    let config = GenerationConfig::for_framework(Framework::Vue).with_feature(Feature::Ssr);
    let err = registry.generate(&landing_page(), &config).unwrap_err();
    assert!(err.is_input_error());

    let config = config.with_deployment(DeploymentTarget::Node);
    let project = registry.generate(&landing_page(), &config).unwrap().project;
    assert!(project.file("src/entry-server.ts").is_some());
    assert!(project.file("server.js").is_some());
}

#[test]
fn test_every_framework_covers_every_element() {
    init_test_logging();
    let registry = GeneratorRegistry::new();
    let elements = landing_page();
    let expected_tags = ["nav", "section", "article", "hr"];

    for framework in Framework::ALL {
        let config = GenerationConfig::for_framework(framework).with_tests(true);
        let generation = registry.generate(&elements, &config).unwrap();
        let project = &generation.project;

        let components: Vec<_> = project.files_of(FileKind::Component).collect();
        assert_eq!(components.len(), elements.len(), "{}", framework);
        for (file, tag) in components.iter().zip(expected_tags) {
            assert!(
                file.content.contains(&format!("<{}", tag)),
                "{} component {} does not render <{}>",
                framework,
                file.path,
                tag
            );
        }

        assert_eq!(project.metrics.component_count, elements.len());
        assert_eq!(project.metrics.element_count, 8);
        assert!(project.file("package.json").is_some());
        assert!(project.file("README.md").is_some());
        assert!(generation.diagnostics.is_empty(), "{}: {:?}", framework, generation.diagnostics);

        let tests = project.files_of(FileKind::Test).count();
        if framework.has_components() {
            assert_eq!(tests, elements.len(), "{}", framework);
        } else {
            assert_eq!(tests, 0);
        }
    }
}

#[test]
fn test_unknown_kind_falls_back_everywhere() {
    init_test_logging();
    let registry = GeneratorRegistry::new();
    let elements = vec![Element::new("m", "model3d").with_prop("text", "Spin")];

    for framework in Framework::ALL {
        let config = GenerationConfig::for_framework(framework);
        let generation = registry.generate(&elements, &config).unwrap();
        let component = generation.project.files_of(FileKind::Component).next().unwrap();
        assert!(component.content.contains("<div"), "{}", framework);
        assert_eq!(generation.diagnostics.len(), 1);
        assert_eq!(generation.diagnostics[0].kind, DiagnosticKind::UnknownKind);
        assert_eq!(
            generation.diagnostics[0].element_id.as_ref().map(|id| id.as_str()),
            Some("m")
        );
    }
}

#[test]
fn test_batch_export_matches_individual_runs() {
    let registry = GeneratorRegistry::new();
    let elements = landing_page();
    let configs: Vec<GenerationConfig> = Framework::ALL
        .iter()
        .map(|&framework| GenerationConfig::for_framework(framework))
        .collect();

    let batch = generate_many(&registry, &elements, &configs);
    for (result, config) in batch.into_iter().zip(&configs) {
        let single = registry.generate(&elements, config).unwrap();
        assert_eq!(result.unwrap(), single);
    }
}

#[test]
fn test_generation_serializes_camel_case() {
    let elements = vec![Element::new("h", "heading").with_prop("text", "Hello")];
    let generation = GeneratorRegistry::new()
        .generate(&elements, &GenerationConfig::default())
        .unwrap();
    let json = serde_json::to_value(&generation).unwrap();

    assert!(json["project"]["devDependencies"].is_object());
    assert_eq!(json["project"]["framework"], "react");
    assert_eq!(json["project"]["files"][0]["kind"], "component");
    assert!(json["project"]["metrics"]["estimatedRenderTimeMs"].is_number());
    assert!(json["diagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn test_shell_names_are_not_reused_by_components() {
    let elements = vec![Element::new("a", "app"), Element::new("r", "root")];
    let config = GenerationConfig::for_framework(Framework::Angular);
    let project = GeneratorRegistry::new().generate(&elements, &config).unwrap().project;

    let shell = project.file("src/app/app.component.ts").unwrap();
    assert_eq!(shell.content.matches("class AppComponent ").count(), 1);
    assert!(shell.content.contains("import { AppComponent2 } from './components/app-2.component';"));
    assert!(shell.content.contains("<app-root-2 />"));
    assert!(!shell.content.contains("<app-root />"));

    let root = project.file("src/app/components/root-2.component.ts").unwrap();
    assert!(root.content.contains("selector: 'app-root-2',"));
    assert!(root.content.contains("export class RootComponent {"));
}

#[test]
fn test_reserved_props_are_skipped_everywhere() {
    let elements = vec![Element::new("c", "container")
        .with_prop("children", "x")
        .with_prop("class", "y")
        .with_child(Element::new("t", "text"))];

    for framework in Framework::ALL {
        let config = GenerationConfig::for_framework(framework);
        let generation = GeneratorRegistry::new().generate(&elements, &config).unwrap();
        let component = generation.project.files_of(FileKind::Component).next().unwrap();

        assert!(!component.content.contains("children2"), "{}", framework);
        assert!(!component.content.contains("classProp"), "{}", framework);
        assert!(component.content.matches("children?:").count() <= 1, "{}", framework);
        let reserved: Vec<&str> = generation
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::ReservedProp)
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(reserved.len(), 2, "{}: {:?}", framework, generation.diagnostics);
    }
}

#[test]
fn test_nested_text_is_a_bound_expression() {
    let elements =
        vec![Element::new("c", "container").with_child(Element::new("t", "text").with_prop("text", "Hi"))];
    let expected = [
        (Framework::React, r#"<p>{"Hi"}</p>"#),
        (Framework::Vue, "<p>{{ 'Hi' }}</p>"),
        (Framework::Angular, "<p>{{ 'Hi' }}</p>"),
        (Framework::Svelte, r#"<p>{"Hi"}</p>"#),
        (Framework::Html, "<p>Hi</p>"),
    ];

    for (framework, text) in expected {
        let config = GenerationConfig::for_framework(framework);
        let project = GeneratorRegistry::new().generate(&elements, &config).unwrap().project;
        let component = project.files_of(FileKind::Component).next().unwrap();
        assert!(component.content.contains(text), "{}: {}", framework, component.content);
    }
}
