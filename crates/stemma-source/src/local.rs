/*
 * local.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Sections stored as JSON files on disk.

use std::path::{Path, PathBuf};

use stemma_apparatus::{Annotation, Reading, VariantList};
use tracing::debug;

use crate::error::{Result, SourceError};
use crate::{EditionSource, parse_json};

/// Base readings, variant list and (optionally) annotations as files in
/// Stemmarest's JSON format.
#[derive(Debug, Clone)]
pub struct LocalFiles {
    base: PathBuf,
    variants: PathBuf,
    annotations: Option<PathBuf>,
}

impl LocalFiles {
    pub fn new(base: impl Into<PathBuf>, variants: impl Into<PathBuf>) -> Self {
        LocalFiles {
            base: base.into(),
            variants: variants.into(),
            annotations: None,
        }
    }

    pub fn with_annotations(mut self, annotations: impl Into<PathBuf>) -> Self {
        self.annotations = Some(annotations.into());
        self
    }
}

fn read_json<T: serde::de::DeserializeOwned>(list: &'static str, path: &Path) -> Result<T> {
    debug!(path = %path.display(), "Reading {}", list);
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        list,
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(list, &path.display().to_string(), &content)
}

impl EditionSource for LocalFiles {
    fn base_readings(&self) -> Result<Vec<Reading>> {
        read_json("base readings", &self.base)
    }

    fn variant_list(&self) -> Result<VariantList> {
        read_json("variant list", &self.variants)
    }

    /// No annotation file means no annotations.
    fn annotations(&self) -> Result<Vec<Annotation>> {
        match &self.annotations {
            Some(path) => read_json("annotations", path),
            None => Ok(Vec::new()),
        }
    }
}
