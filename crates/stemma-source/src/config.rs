/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Where to load a tradition section from.
//!
//! This is the only configuration the loaders see; the apparatus writer
//! takes plain data and its own render options.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use base64::Engine;

use crate::error::SourceError;
use crate::local::LocalFiles;
use crate::remote::RemoteRepository;
use crate::EditionSource;

/// Default timeout for each request to a repository.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP basic auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One `name=value` query parameter for the variant list endpoint.
///
/// These select how the repository builds the list, e.g.
/// `significant=yes` or `exclude_type1=no`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOption {
    pub name: String,
    pub value: String,
}

impl FromStr for QueryOption {
    type Err = SourceError;

    fn from_str(option: &str) -> Result<Self, Self::Err> {
        match option.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok(QueryOption {
                name: name.to_string(),
                value: value.to_string(),
            }),
            _ => Err(SourceError::InvalidOption {
                option: option.to_string(),
            }),
        }
    }
}

/// Connection details for a Stemmarest repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Base URL of the repository, e.g. `https://example.org/stemmarest`.
    pub repository: String,
    pub tradition: String,
    pub section: String,
    pub credentials: Option<Credentials>,
    pub variant_options: Vec<QueryOption>,
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(
        repository: impl Into<String>,
        tradition: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        RemoteConfig {
            repository: repository.into(),
            tradition: tradition.into(),
            section: section.into(),
            credentials: None,
            variant_options: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// `<repository>/tradition/<tradition>/section/<section>`
    pub fn section_url(&self) -> String {
        format!(
            "{}/tradition/{}/section/{}",
            self.repository.trim_end_matches('/'),
            self.tradition,
            self.section
        )
    }
}

/// Where the three lists of a section come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Local {
        base: PathBuf,
        variants: PathBuf,
        annotations: Option<PathBuf>,
    },
    Remote(RemoteConfig),
}

impl SourceConfig {
    pub fn into_source(self) -> Box<dyn EditionSource> {
        match self {
            SourceConfig::Local {
                base,
                variants,
                annotations,
            } => {
                let files = LocalFiles::new(base, variants);
                Box::new(match annotations {
                    Some(path) => files.with_annotations(path),
                    None => files,
                })
            }
            SourceConfig::Remote(config) => Box::new(RemoteRepository::new(config)),
        }
    }
}
