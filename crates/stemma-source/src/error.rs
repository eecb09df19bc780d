/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for loading editions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching or decoding a tradition section.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A local file could not be read.
    #[error("Failed to read {list} from {}: {source}", .path.display())]
    Read {
        list: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON did not match the expected shape. This includes the typed
    /// validation of readings, variant locations and annotations.
    #[error("Failed to parse {list} from {origin}: {source}")]
    Parse {
        list: &'static str,
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request never produced an HTTP response.
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The repository answered with a non-success status.
    #[error("{url} returned HTTP status {status}")]
    Status { url: String, status: u16 },

    /// A variant list query option was not of the form `name=value`.
    #[error("Invalid query option '{option}': expected name=value")]
    InvalidOption { option: String },
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
