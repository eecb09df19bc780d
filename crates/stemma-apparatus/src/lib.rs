/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Critical apparatus assembly for scholarly editions.
//!
//! Takes the edited text of a tradition section (a sequence of lemma
//! readings), the variant locations found by collation, and optional
//! comment and translation annotations, and typesets them as a
//! [reledmac](https://ctan.org/pkg/reledmac) fragment, or as a
//! [reledpar](https://ctan.org/pkg/reledpar) two-page spread with the
//! translation facing the text.
//!
//! # Architecture
//!
//! ```text
//!   witness ──┐
//!             ├── variant ──┐
//!   reading ──┘             ├── writer ──▶ LaTeX
//!                  index ───┘
//! ```
//!
//! - [`witness`]: sorted sigla strings
//! - [`reading`]: joining readings, language wrapping
//! - [`variant`]: one lemma/footnote pair per variant location
//! - [`index`]: apparatus keyed by anchor reading
//! - [`writer`]: the single pass over the base text
//!
//! The crate does no I/O of its own; loading editions from files or from a
//! Stemmarest server lives in `stemma-source`.
//!
//! # Example
//!
//! ```rust
//! use stemma_apparatus::{Edition, Reading, RenderOptions, render};
//!
//! let edition = Edition {
//!     base: vec![Reading::new("1", "the"), Reading::new("2", "dog")],
//!     ..Default::default()
//! };
//! let rendered = render(&edition, &RenderOptions::default()).unwrap();
//! assert_eq!(rendered.document, "the dog");
//! ```

pub mod diagnostics;
pub mod error;
pub mod index;
pub mod model;
pub mod reading;
pub mod variant;
pub mod witness;
pub mod writer;

pub use diagnostics::Diagnostic;
pub use error::{ApparatusError, Result};
pub use index::{AnnotationIndex, VariantIndex};
pub use model::{
    Annotation, AnnotationLabel, AnnotationLink, AnnotationProperties, Edition, LinkType, NodeId,
    Placement, Reading, Variant, VariantList, VariantLocation, WitnessGroups,
};
pub use variant::{ApparatusEntry, LocationKind, resolve_location};
pub use witness::format_witnesses;
pub use writer::{DocumentWriter, OutputMode, RenderOptions, Rendered, render, write};
