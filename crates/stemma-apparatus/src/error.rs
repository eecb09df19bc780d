/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for apparatus assembly.

use thiserror::Error;

use crate::model::NodeId;

/// Errors that abort apparatus assembly.
///
/// There is no recovery from any of these: a document built from broken
/// data would silently misreport the tradition, so nothing is emitted.
#[derive(Debug, Error)]
pub enum ApparatusError {
    /// Input is missing a key or carries a value the apparatus cannot use.
    #[error("Malformed {what}: {message}")]
    Malformed { what: &'static str, message: String },

    /// More than one translation annotation ends at the same reading.
    #[error("Multiple translations terminating at reading {reading}")]
    MultipleTranslations { reading: NodeId },

    /// Formatting into the in-memory document failed.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Writing the finished document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApparatusError {
    pub(crate) fn malformed(what: &'static str, message: impl Into<String>) -> Self {
        ApparatusError::Malformed {
            what,
            message: message.into(),
        }
    }
}

/// Result type for apparatus operations.
pub type Result<T> = std::result::Result<T, ApparatusError>;
