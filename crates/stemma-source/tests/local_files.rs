/*
 * local_files.rs
 * Copyright (c) 2025 Posit, PBC
 */

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use stemma_source::{EditionSource, LocalFiles, SourceConfig, SourceError};
use tempfile::TempDir;

const BASE: &str = r#"[
    {"id": "1", "text": "the", "rank": 1, "witnesses": ["A", "B"]},
    {"id": "2", "text": "dog", "rank": 2, "is_lacuna": false}
]"#;

const VARIANTS: &str = r#"{"variantlist": [{
    "base": [{"id": "2", "text": "dog"}],
    "variants": [{"witnesses": {"witnesses": ["A"]}, "readings": [{"text": "cat"}]}]
}]}"#;

const ANNOTATIONS: &str = r#"[{
    "id": 55,
    "label": "TRANSLATION",
    "links": [{"type": "BEGIN", "target": 1}, {"type": "END", "target": 2}],
    "properties": {"text": "le chien"}
}]"#;

fn write_section(dir: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
    let base = dir.path().join("base.json");
    let variants = dir.path().join("variants.json");
    let annotations = dir.path().join("annotations.json");
    fs::write(&base, BASE).unwrap();
    fs::write(&variants, VARIANTS).unwrap();
    fs::write(&annotations, ANNOTATIONS).unwrap();
    (base, variants, annotations)
}

#[test]
fn test_load_without_annotation_file() {
    let dir = TempDir::new().unwrap();
    let (base, variants, _) = write_section(&dir);

    let edition = LocalFiles::new(base, variants).load(true).unwrap();
    assert_eq!(edition.base.len(), 2);
    assert_eq!(edition.variants.len(), 1);
    assert!(edition.annotations.is_empty());
}

#[test]
fn test_load_with_annotations() {
    let dir = TempDir::new().unwrap();
    let (base, variants, annotations) = write_section(&dir);

    let source = SourceConfig::Local {
        base,
        variants,
        annotations: Some(annotations),
    }
    .into_source();
    let edition = source.load(true).unwrap();
    assert_eq!(edition.annotations.len(), 1);
    assert_eq!(edition.annotations[0].text(), Some("le chien"));
    assert_eq!(edition.annotations[0].end().map(|id| id.as_str()), Some("2"));

    let edition = source.load(false).unwrap();
    assert!(edition.annotations.is_empty());
}

#[test]
fn test_missing_file_names_the_list() {
    let dir = TempDir::new().unwrap();
    let (base, _, _) = write_section(&dir);
    let missing = dir.path().join("nope.json");

    let err = LocalFiles::new(base, &missing).load(false).unwrap_err();
    assert!(matches!(err, SourceError::Read { list: "variant list", .. }));
    assert!(err.to_string().contains("nope.json"), "{}", err);
}

#[test]
fn test_malformed_variant_location_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let (base, variants, _) = write_section(&dir);
    fs::write(&variants, r#"{"variantlist": [{"after": {"id": "2", "text": "dog"}, "variants": []}]}"#)
        .unwrap();

    let err = LocalFiles::new(base, variants).load(false).unwrap_err();
    match err {
        SourceError::Parse { list, source, .. } => {
            assert_eq!(list, "variant list");
            assert!(source.to_string().contains("`base` and `before`"), "{}", source);
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}
