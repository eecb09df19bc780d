/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Loading tradition sections for apparatus assembly.
//!
//! A section is three lists: the base (lemma) readings, the variant list and
//! the annotations. [`EditionSource`] abstracts over where they come from:
//!
//! - [`LocalFiles`]: JSON files exported from a repository
//! - [`RemoteRepository`]: a live Stemmarest server, optionally behind
//!   HTTP basic auth
//!
//! Every list is decoded into the typed model of `stemma-apparatus`, so
//! malformed data is rejected here, before any output is produced.

pub mod config;
pub mod error;
pub mod local;
pub mod remote;

pub use config::{Credentials, DEFAULT_TIMEOUT, QueryOption, RemoteConfig, SourceConfig};
pub use error::{Result, SourceError};
pub use local::LocalFiles;
pub use remote::RemoteRepository;

use stemma_apparatus::{Annotation, Edition, Reading, VariantList};

/// A place the lists of one tradition section can be fetched from.
pub trait EditionSource {
    /// The edited text, in order.
    fn base_readings(&self) -> Result<Vec<Reading>>;

    fn variant_list(&self) -> Result<VariantList>;

    fn annotations(&self) -> Result<Vec<Annotation>>;

    /// Fetch everything needed for one document.
    ///
    /// Annotations are only fetched when `with_annotations` is set.
    fn load(&self, with_annotations: bool) -> Result<Edition> {
        let base = self.base_readings()?;
        let variants = self.variant_list()?;
        let annotations = if with_annotations {
            self.annotations()?
        } else {
            Vec::new()
        };
        Ok(Edition::new(base, variants, annotations))
    }
}

pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(
    list: &'static str,
    origin: &str,
    content: &str,
) -> Result<T> {
    serde_json::from_str(content).map_err(|source| SourceError::Parse {
        list,
        origin: origin.to_string(),
        source,
    })
}
