/*
 * variant.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Apparatus entries for single variant locations.
//!
//! A location becomes one `\lemma{...} \Afootnote{...}` pair: the lemma is
//! the base text the variants depart from, and the footnote lists every
//! variant with its witnesses, separated by semicolons.

use crate::error::{ApparatusError, Result};
use crate::model::{Placement, Reading, Variant, VariantLocation};
use crate::reading::render_readings;
use crate::witness::format_witnesses;

/// Omission marker for variants without readings.
const OMISSION: &str = "\\emph{om.}";

/// Marker appended to every variant of an addition.
const ADDITION: &str = "\\emph{add.}";

/// How a location relates to the base text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    /// Variants replace the base readings.
    Substitution,
    /// Variants add text where the base has none.
    Addition,
    /// Some witnesses carry the base text elsewhere.
    Transposition,
}

impl LocationKind {
    pub fn of(location: &VariantLocation) -> Self {
        match location.placement {
            Placement::Addition { .. } => LocationKind::Addition,
            Placement::Base(_) if location.has_displacement => LocationKind::Transposition,
            Placement::Base(_) => LocationKind::Substitution,
        }
    }
}

/// The rendered lemma and variant list for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApparatusEntry {
    pub kind: LocationKind,
    pub lemma: String,
    pub variants: String,
}

/// Readings that make up the lemma of `location`.
///
/// For an addition there is nothing in the base to cite, so the readings on
/// either side of the insertion point stand in for it.
pub fn lemma_readings(location: &VariantLocation) -> Vec<&Reading> {
    match &location.placement {
        Placement::Base(readings) => readings.iter().collect(),
        Placement::Addition { before, after } => vec![before, after],
    }
}

/// Classify `location` and render its lemma and variant list.
pub fn resolve_location(location: &VariantLocation, language: Option<&str>) -> Result<ApparatusEntry> {
    let kind = LocationKind::of(location);
    let lemma = render_readings(language, lemma_readings(location));
    let variants = location
        .variants
        .iter()
        .map(|variant| render_variant(variant, kind, language))
        .collect::<Result<Vec<_>>>()?
        .join("; ");

    Ok(ApparatusEntry {
        kind,
        lemma,
        variants,
    })
}

/// Render one variant as `<witnesses> <text>`.
pub fn render_variant(variant: &Variant, kind: LocationKind, language: Option<&str>) -> Result<String> {
    let mut text = match &variant.readings {
        None => OMISSION.to_string(),
        Some(readings) if kind == LocationKind::Transposition && variant.displaced => {
            render_displacement(variant, readings, language)?
        }
        Some(readings) => render_readings(language, readings),
    };
    if kind == LocationKind::Addition {
        text.push(' ');
        text.push_str(ADDITION);
    }

    Ok(format!("{} {}", format_witnesses(&variant.witnesses), text))
}

/// `transp. prae|post` followed by the anchor the readings moved around.
fn render_displacement(variant: &Variant, readings: &[Reading], language: Option<&str>) -> Result<String> {
    let anchor = variant.anchor.as_ref().ok_or_else(|| {
        ApparatusError::malformed("variant", "displaced variant has no `anchor` reading")
    })?;
    let first = readings.first().ok_or_else(|| {
        ApparatusError::malformed("variant", "displaced variant has an empty `readings` list")
    })?;
    let direction = if rank_of(first)? < rank_of(anchor)? {
        "prae"
    } else {
        "post"
    };

    Ok(format!(
        "\\emph{{transp. {}}} {}",
        direction,
        render_readings(language, [anchor])
    ))
}

fn rank_of(reading: &Reading) -> Result<i64> {
    reading.rank.ok_or_else(|| {
        ApparatusError::malformed(
            "reading",
            format!(
                "reading '{}' in a transposition has no `rank`",
                reading.display_text()
            ),
        )
    })
}
