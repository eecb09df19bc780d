/*
 * parallel_mode.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Fixture-based tests for a full section: substitution, addition,
 * transposition, comments and translation together.
 */

use std::path::Path;

use pretty_assertions::assert_eq;
use stemma_apparatus::{
    Annotation, Diagnostic, Edition, OutputMode, Reading, RenderOptions, VariantList, render,
};

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> std::path::PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir).join("test-fixtures").join(name)
}

fn load<T: serde::de::DeserializeOwned>(name: &str) -> T {
    let path = fixture_path(name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to read fixture: {}", name));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse {}: {}", name, e))
}

fn load_edition() -> Edition {
    let base: Vec<Reading> = load("base.json");
    let variants: VariantList = load("variants.json");
    let annotations: Vec<Annotation> = load("annotations.json");
    Edition::new(base, variants, annotations)
}

#[test]
fn test_parallel_document() {
    let edition = load_edition();
    let options = RenderOptions {
        language: None,
        mode: OutputMode::Parallel,
    };
    let rendered = render(&edition, &options).unwrap();
    assert!(rendered.diagnostics.is_empty(), "{:?}", rendered.diagnostics);
    insta::assert_snapshot!("parallel_document", rendered.document.trim_end());
}

#[test]
fn test_basic_document_from_same_section() {
    let edition = load_edition();
    let rendered = render(&edition, &RenderOptions::default()).unwrap();
    assert_eq!(
        rendered.document,
        "In principio \\edtext{erat}{{\\lemma{erat} \\Afootnote{A B fuit}}} verbum, et \
         \\edtext{verbum}{{\\lemma{et verbum} \\Afootnote{A (a.c.) C ipsum \\emph{add.}}}} erat apud \
         \\edtext{Deum}{{\\lemma{apud Deum} \\Afootnote{D \\emph{transp. post} erat; E \\emph{om.}}}}."
    );
    assert_eq!(
        rendered.diagnostics,
        vec![Diagnostic::AnnotationsIgnored { count: 5 }]
    );
}
