/*
 * diagnostics.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Non-fatal problems found while assembling a document.
//!
//! These do not stop assembly, but each one means part of the apparatus is
//! missing or truncated in the output, so callers should surface them.

use std::fmt;

use crate::model::{AnnotationLabel, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Variant locations anchored at a reading outside the base text.
    UnanchoredVariants { anchor: NodeId, count: usize },

    /// An annotation ends at a reading outside the base text.
    UnanchoredAnnotation {
        anchor: NodeId,
        label: AnnotationLabel,
    },

    /// A comment's BEGIN reading is not in the base text; its lemma is empty.
    MissingCommentStart { begin: NodeId, end: NodeId },

    /// Annotations were supplied for a document that has no place for them.
    AnnotationsIgnored { count: usize },
}

impl Diagnostic {
    /// Stable short code, for filtering and for tests.
    pub fn code(&self) -> &'static str {
        match self {
            Diagnostic::UnanchoredVariants { .. } => "A-1",
            Diagnostic::UnanchoredAnnotation { .. } => "A-2",
            Diagnostic::MissingCommentStart { .. } => "A-3",
            Diagnostic::AnnotationsIgnored { .. } => "A-4",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnanchoredVariants { anchor, count } => write!(
                f,
                "{} variant location(s) anchored at reading {}, which is not in the base text; \
                 they are left out of the apparatus",
                count, anchor
            ),
            Diagnostic::UnanchoredAnnotation { anchor, label } => write!(
                f,
                "{} annotation ends at reading {}, which is not in the base text; \
                 it is left out of the document",
                label, anchor
            ),
            Diagnostic::MissingCommentStart { begin, end } => write!(
                f,
                "comment ending at reading {} starts at reading {}, which is not in the base text; \
                 its lemma is empty",
                end, begin
            ),
            Diagnostic::AnnotationsIgnored { count } => write!(
                f,
                "{} annotation(s) ignored: basic output has no comments or translation",
                count
            ),
        }
    }
}
