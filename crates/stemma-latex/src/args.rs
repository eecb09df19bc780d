/*
 * args.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Command-line arguments and their validation
 */

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{ArgGroup, Parser, ValueEnum};
use stemma_apparatus::{OutputMode, RenderOptions};
use stemma_source::{Credentials, QueryOption, RemoteConfig, SourceConfig};

#[derive(Parser, Debug)]
#[command(name = "stemma-latex")]
#[command(version)]
#[command(about = "Typeset a Stemmarest tradition section as a reledmac critical apparatus")]
#[command(group(ArgGroup::new("origin").args(["remote", "local"]).multiple(false)))]
pub struct Args {
    /// Get the data from a remote Stemmarest repository
    #[arg(long)]
    pub remote: bool,

    /// Get the data from local JSON files (the default)
    #[arg(long)]
    pub local: bool,

    /// URL of the tradition repository
    #[arg(short = 'r', long, help_heading = "Remote server connection")]
    pub repository: Option<String>,

    /// HTTP basic auth username for the tradition repository
    #[arg(short = 'u', long, help_heading = "Remote server connection")]
    pub username: Option<String>,

    /// HTTP basic auth password for the tradition repository
    #[arg(
        short = 'p',
        long,
        env = "STEMMA_PASSWORD",
        hide_env_values = true,
        help_heading = "Remote server connection"
    )]
    pub password: Option<String>,

    /// ID of the tradition to process
    #[arg(short = 't', long, help_heading = "Remote server connection")]
    pub tradition: Option<String>,

    /// ID of the section to process
    #[arg(short = 's', long, help_heading = "Remote server connection")]
    pub section: Option<String>,

    /// Query parameter for generating the variant list (can be repeated)
    #[arg(
        short = 'o',
        long = "option",
        value_name = "NAME=VALUE",
        help_heading = "Remote server connection"
    )]
    pub options: Vec<QueryOption>,

    /// Seconds to wait for each request to the repository
    #[arg(long, default_value = "30", help_heading = "Remote server connection")]
    pub timeout: u64,

    /// File containing the base readings in Stemmarest JSON format
    #[arg(short = 'b', long, help_heading = "Data from local files")]
    pub base: Option<PathBuf>,

    /// File containing the variant list in Stemmarest JSON format
    #[arg(short = 'v', long = "variantlist", help_heading = "Data from local files")]
    pub variantlist: Option<PathBuf>,

    /// File containing the annotations in Stemmarest JSON format
    #[arg(short = 'a', long = "annotationlist", help_heading = "Data from local files")]
    pub annotationlist: Option<PathBuf>,

    /// Polyglossia language macro for wrapping non-ASCII readings
    #[arg(long)]
    pub language: Option<String>,

    /// Document layout
    #[arg(long, value_enum, default_value_t = Mode::Basic)]
    pub mode: Mode,

    /// Write output to FILE (use '--output -' for stdout)
    #[arg(long, value_name = "FILE")]
    pub output: Option<String>,

    /// Fail instead of writing a document when any apparatus entry is lost
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Edited text with the variant apparatus
    Basic,
    /// Edited text with variants and comments, facing the translation
    Parallel,
}

impl From<Mode> for OutputMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Basic => OutputMode::Basic,
            Mode::Parallel => OutputMode::Parallel,
        }
    }
}

impl Args {
    /// Check that the arguments describe one complete data source.
    pub fn source_config(&self) -> Result<SourceConfig> {
        if self.remote {
            let (Some(repository), Some(tradition), Some(section)) =
                (&self.repository, &self.tradition, &self.section)
            else {
                bail!("For remote runs please specify repository URL and tradition / section IDs");
            };

            let mut config = RemoteConfig::new(repository, tradition, section);
            config.credentials = match (&self.username, &self.password) {
                (Some(username), Some(password)) => Some(Credentials::new(username, password)),
                (Some(_), None) => bail!("A username was given without a password"),
                (None, _) => None,
            };
            config.variant_options = self.options.clone();
            config.timeout = Duration::from_secs(self.timeout);
            Ok(SourceConfig::Remote(config))
        } else {
            let (Some(base), Some(variants)) = (&self.base, &self.variantlist) else {
                bail!(
                    "For local runs please specify a file containing base readings, \
                     and a file containing variants"
                );
            };

            Ok(SourceConfig::Local {
                base: base.clone(),
                variants: variants.clone(),
                annotations: self.annotationlist.clone(),
            })
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            language: self.language.clone(),
            mode: self.mode.into(),
        }
    }

    /// Whether the annotation list should be loaded at all.
    ///
    /// A local annotation file is always read so that basic mode can
    /// report it as ignored; remote annotations are only fetched when the
    /// layout uses them.
    pub fn wants_annotations(&self) -> bool {
        self.mode == Mode::Parallel || (!self.remote && self.annotationlist.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("stemma-latex").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_local_is_default() {
        let args = parse(&["-b", "base.json", "-v", "variants.json"]);
        match args.source_config().unwrap() {
            SourceConfig::Local {
                base, annotations, ..
            } => {
                assert_eq!(base, PathBuf::from("base.json"));
                assert!(annotations.is_none());
            }
            other => panic!("expected a local source, got {:?}", other),
        }
        assert_eq!(args.render_options(), RenderOptions::default());
        assert!(!args.wants_annotations());
    }

    #[test]
    fn test_local_requires_both_files() {
        let args = parse(&["--local", "-b", "base.json"]);
        let err = args.source_config().unwrap_err();
        assert!(err.to_string().contains("For local runs"), "{}", err);
    }

    #[test]
    fn test_remote_requires_ids() {
        let args = parse(&["--remote", "-r", "http://localhost:8080/stemmarest", "-t", "T1"]);
        let err = args.source_config().unwrap_err();
        assert!(err.to_string().contains("For remote runs"), "{}", err);
    }

    #[test]
    fn test_remote_and_local_conflict() {
        let result = Args::try_parse_from(["stemma-latex", "--remote", "--local"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_remote_config() {
        let args = parse(&[
            "--remote",
            "-r",
            "http://localhost:8080/stemmarest",
            "-t",
            "T1",
            "-s",
            "S2",
            "-u",
            "reader",
            "-p",
            "secret",
            "-o",
            "significant=yes",
            "-o",
            "combine_dislocations=true",
            "--mode",
            "parallel",
            "--language",
            "armenian",
        ]);
        let SourceConfig::Remote(config) = args.source_config().unwrap() else {
            panic!("expected a remote source");
        };
        assert_eq!(
            config.section_url(),
            "http://localhost:8080/stemmarest/tradition/T1/section/S2"
        );
        assert_eq!(config.credentials, Some(Credentials::new("reader", "secret")));
        assert_eq!(config.variant_options.len(), 2);
        assert_eq!(config.variant_options[1].name, "combine_dislocations");
        assert_eq!(
            args.render_options(),
            RenderOptions {
                language: Some("armenian".to_string()),
                mode: OutputMode::Parallel,
            }
        );
        assert!(args.wants_annotations());
    }

    #[test]
    fn test_bad_query_option_is_rejected_by_parser() {
        let result = Args::try_parse_from(["stemma-latex", "--remote", "-o", "novalue"]);
        assert!(result.is_err());
    }
}
