/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Typeset a Stemmarest tradition section as a reledmac/reledpar fragment
 */

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stemma_apparatus::render;

mod args;

use args::Args;

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the document.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stemma_latex=info,stemma_source=info,stemma_apparatus=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let config = args.source_config()?;
    let options = args.render_options();

    let source = config.into_source();
    let edition = source
        .load(args.wants_annotations())
        .context("Failed to load tradition section")?;
    info!(
        readings = edition.base.len(),
        variant_locations = edition.variants.len(),
        annotations = edition.annotations.len(),
        "Loaded tradition section"
    );

    let rendered = render(&edition, &options).context("Failed to assemble apparatus")?;
    for diagnostic in &rendered.diagnostics {
        warn!(code = diagnostic.code(), "{}", diagnostic);
    }
    if args.strict && !rendered.diagnostics.is_empty() {
        anyhow::bail!(
            "{} apparatus warning(s) with --strict; no output written",
            rendered.diagnostics.len()
        );
    }

    write_output(args.output.as_deref(), &rendered.document)
}

fn write_output(output: Option<&str>, document: &str) -> Result<()> {
    let mut content = document.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }

    match output {
        None | Some("-") => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write to stdout")?;
        }
        Some(path) => {
            fs::write(path, content).context(format!("Failed to write output file: {}", path))?;
            info!(path, "Wrote document");
        }
    }
    Ok(())
}
