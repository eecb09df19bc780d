/*
 * writer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! reledmac/reledpar document writer.
//!
//! Walks the base text once. A reading with nothing anchored at it is
//! written as-is; otherwise it is wrapped in `\edtext{...}{...}` with one
//! lemma/footnote pair per variant location (series A) and per comment
//! (series B). In parallel mode translation fragments are collected along
//! the way and set on the right-hand page.
//!
//! Output is built in memory and handed out only when the whole walk has
//! succeeded, so a failure never leaves a truncated document behind.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::io::Write;

use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::error::{ApparatusError, Result};
use crate::index::{AnnotationIndex, VariantIndex};
use crate::model::{Annotation, AnnotationLabel, Edition, NodeId, Reading, VariantLocation};
use crate::reading::{needs_separator, render_readings};
use crate::variant::resolve_location;

const PARALLEL_OPEN: &str = "\\begin{pairs}\n\\begin{Leftside}\n\\beginnumbering\n\\pstart\n";
const PARALLEL_SWITCH: &str = "\n\\pend\n\\endnumbering\n\\end{Leftside}\n\
                               \\begin{Rightside}\n\\beginnumbering\n\\pstart\n";
const PARALLEL_CLOSE: &str = "\n\\pend\n\\endnumbering\n\\end{Rightside}\n\\end{pairs}\n";

/// Which document shape to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Edited text with the variant apparatus only.
    #[default]
    Basic,
    /// Edited text with variants and comments on the left, translation on
    /// the right.
    Parallel,
}

/// Options for rendering a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Polyglossia language macro for non-ASCII text, e.g. `armenian`.
    pub language: Option<String>,
    pub mode: OutputMode,
}

/// A finished document and the problems noticed while writing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub document: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Render `edition` to a document string.
pub fn render(edition: &Edition, options: &RenderOptions) -> Result<Rendered> {
    DocumentWriter::new(edition, options)?.finish()
}

/// Render `edition` and write the document to `buf`.
pub fn write<T: Write>(edition: &Edition, options: &RenderOptions, buf: &mut T) -> Result<Vec<Diagnostic>> {
    let rendered = render(edition, options)?;
    buf.write_all(rendered.document.as_bytes())?;
    Ok(rendered.diagnostics)
}

/// Readings from `begin` through `end`, inclusive.
///
/// If `begin` never occurs the span is empty; if `end` never occurs (or comes
/// first) the span runs to the end of the text.
pub fn reading_span<'a>(base: &'a [Reading], begin: &NodeId, end: &NodeId) -> Vec<&'a Reading> {
    let mut span = Vec::new();
    let mut inside = false;
    for reading in base {
        if &reading.id == begin {
            inside = true;
        }
        if inside {
            span.push(reading);
        }
        if &reading.id == end {
            inside = false;
        }
    }
    span
}

/// Single-use writer for one edition.
pub struct DocumentWriter<'a> {
    base: &'a [Reading],
    variants: VariantIndex<'a>,
    /// Only built in parallel mode.
    annotations: Option<AnnotationIndex<'a>>,
    language: Option<&'a str>,
    mode: OutputMode,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> DocumentWriter<'a> {
    /// Index the apparatus of `edition` and check it against the base text.
    pub fn new(edition: &'a Edition, options: &'a RenderOptions) -> Result<Self> {
        if let Some(position) = edition.base.iter().position(|r| r.id.is_empty()) {
            return Err(ApparatusError::malformed(
                "base text",
                format!("reading at position {} has no `id`", position),
            ));
        }

        let variants = VariantIndex::build(&edition.variants)?;
        let mut diagnostics = Vec::new();
        let annotations = match options.mode {
            OutputMode::Basic => {
                if !edition.annotations.is_empty() {
                    diagnostics.push(Diagnostic::AnnotationsIgnored {
                        count: edition.annotations.len(),
                    });
                }
                None
            }
            OutputMode::Parallel => Some(AnnotationIndex::build(&edition.annotations)),
        };

        debug!(
            readings = edition.base.len(),
            variant_locations = edition.variants.len(),
            annotations = edition.annotations.len(),
            mode = ?options.mode,
            "Indexed apparatus"
        );

        let mut writer = DocumentWriter {
            base: &edition.base,
            variants,
            annotations,
            language: options.language.as_deref(),
            mode: options.mode,
            diagnostics,
        };
        writer.check_anchors();
        Ok(writer)
    }

    /// Report apparatus hung on readings that the walk will never visit.
    fn check_anchors(&mut self) {
        let base = self.base;
        let known: HashSet<&str> = base.iter().map(|r| r.id.as_str()).collect();

        let mut orphans: Vec<(NodeId, usize)> = self
            .variants
            .anchors()
            .filter(|id| !known.contains(id.as_str()))
            .map(|id| (id.clone(), self.variants.at(id.as_str()).len()))
            .collect();
        orphans.sort();
        for (anchor, count) in orphans {
            self.diagnostics
                .push(Diagnostic::UnanchoredVariants { anchor, count });
        }

        if let Some(annotations) = &self.annotations {
            let mut orphans: Vec<(NodeId, AnnotationLabel)> = annotations
                .anchors()
                .filter(|(id, _)| !known.contains(id.as_str()))
                .flat_map(|(id, bucket)| {
                    bucket
                        .iter()
                        .filter(|a| {
                            matches!(a.label, AnnotationLabel::Comment | AnnotationLabel::Translation)
                        })
                        .map(move |a| (id.clone(), a.label.clone()))
                })
                .collect();
            orphans.sort_by(|a, b| a.0.cmp(&b.0));
            for (anchor, label) in orphans {
                self.diagnostics
                    .push(Diagnostic::UnanchoredAnnotation { anchor, label });
            }
        }
    }

    /// Walk the base text and produce the document.
    pub fn finish(mut self) -> Result<Rendered> {
        let mut text = String::new();
        let mut translation: Vec<&'a str> = Vec::new();
        let mut previous: Option<&'a Reading> = None;

        for reading in self.base {
            if needs_separator(previous, reading) {
                text.push(' ');
            }
            self.write_reading(reading, &mut text, &mut translation)?;
            previous = Some(reading);
        }

        let document = match self.mode {
            OutputMode::Basic => text,
            OutputMode::Parallel => {
                let translation = translation.join(" ");
                let mut document = String::with_capacity(
                    PARALLEL_OPEN.len()
                        + text.len()
                        + PARALLEL_SWITCH.len()
                        + translation.len()
                        + PARALLEL_CLOSE.len(),
                );
                document.push_str(PARALLEL_OPEN);
                document.push_str(&text);
                document.push_str(PARALLEL_SWITCH);
                document.push_str(&translation);
                document.push_str(PARALLEL_CLOSE);
                document
            }
        };

        Ok(Rendered {
            document,
            diagnostics: self.diagnostics,
        })
    }

    fn write_reading(
        &mut self,
        reading: &'a Reading,
        out: &mut String,
        translation: &mut Vec<&'a str>,
    ) -> Result<()> {
        let id = reading.id.as_str();
        let locations: Vec<&'a VariantLocation> = self.variants.at(id).to_vec();
        let comments: Vec<&'a Annotation> = match &self.annotations {
            Some(annotations) => {
                if let Some(text) = annotations.translation_at(id)? {
                    translation.push(text);
                }
                annotations.comments_at(id)
            }
            None => Vec::new(),
        };

        let rendered = render_readings(self.language, [reading]);
        if locations.is_empty() && comments.is_empty() {
            out.push_str(&rendered);
            return Ok(());
        }

        write!(out, "\\edtext{{{}}}{{", rendered)?;
        for location in locations {
            let entry = resolve_location(location, self.language)?;
            push_note(out, &entry.lemma, "Afootnote", &entry.variants)?;
        }
        for comment in comments {
            let lemma = self.comment_lemma(comment)?;
            let body = comment.text().ok_or_else(|| {
                ApparatusError::malformed(
                    "annotation",
                    format!("{} has no `properties.text`", comment.describe()),
                )
            })?;
            push_note(out, &lemma, "Bfootnote", body)?;
        }
        out.push('}');
        Ok(())
    }

    fn comment_lemma(&mut self, comment: &Annotation) -> Result<String> {
        let (begin, end) = match (comment.begin(), comment.end()) {
            (Some(begin), Some(end)) => (begin, end),
            _ => {
                return Err(ApparatusError::malformed(
                    "annotation",
                    format!("{} needs both BEGIN and END links", comment.describe()),
                ));
            }
        };
        let span = reading_span(self.base, begin, end);
        if span.is_empty() {
            self.diagnostics.push(Diagnostic::MissingCommentStart {
                begin: begin.clone(),
                end: end.clone(),
            });
        }
        Ok(render_readings(self.language, span))
    }
}

/// `{\lemma{<lemma>} \<series>{<body>}}`
fn push_note(out: &mut String, lemma: &str, series: &str, body: &str) -> Result<()> {
    write!(out, "{{\\lemma{{{}}} \\{}{{{}}}}}", lemma, series, body)?;
    Ok(())
}
