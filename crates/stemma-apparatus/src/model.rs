/*
 * model.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Typed edition entities.
//!
//! These mirror the JSON that a Stemmarest repository hands out for a
//! tradition section: the lemma readings of the edited text, the variant
//! list, and the annotations. Everything is validated once, here, when it
//! is deserialized; the rest of the crate works on these types only.
//!
//! Unknown fields are ignored so that the full Stemmarest models (which
//! carry witnesses, lacuna flags, section ids and so on) parse as-is.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::ApparatusError;

/// Identifier of a node in the collation graph.
///
/// Stemmarest serializes reading ids as strings but annotation link targets
/// as numbers. Both forms are accepted and stored as the decimal string, so
/// a link target and a reading id compare equal when they name the same node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(id)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(i64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(s) => NodeId(s),
            Repr::Number(n) => NodeId(n.to_string()),
        })
    }
}

/// Boolean flags are sometimes serialized as `null`; treat that as unset.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Atomic unit of text: one token of the base text or of a variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawReading")]
pub struct Reading {
    /// Variant readings often arrive without an id; base readings never may.
    pub id: NodeId,

    /// Filled from `normal_form` when the input only carries that.
    pub text: String,

    pub normal_form: Option<String>,

    /// No space between this reading and the one before it.
    pub join_prior: bool,

    /// No space between this reading and the one after it.
    pub join_next: bool,

    pub rank: Option<i64>,
}

#[derive(Deserialize)]
struct RawReading {
    #[serde(default)]
    id: NodeId,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    normal_form: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    join_prior: bool,
    #[serde(default, deserialize_with = "flag")]
    join_next: bool,
    #[serde(default)]
    rank: Option<i64>,
}

impl TryFrom<RawReading> for Reading {
    type Error = ApparatusError;

    fn try_from(raw: RawReading) -> Result<Self, Self::Error> {
        let text = match (raw.text, &raw.normal_form) {
            (Some(text), _) => text,
            (None, Some(normal_form)) => normal_form.clone(),
            (None, None) => {
                return Err(ApparatusError::malformed(
                    "reading",
                    format!("reading '{}' has neither `text` nor `normal_form`", raw.id),
                ));
            }
        };

        Ok(Reading {
            id: raw.id,
            text,
            normal_form: raw.normal_form,
            join_prior: raw.join_prior,
            join_next: raw.join_next,
            rank: raw.rank,
        })
    }
}

impl Reading {
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Reading {
            id: id.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    /// The string to typeset: the normal form where one was recorded.
    pub fn display_text(&self) -> &str {
        self.normal_form.as_deref().unwrap_or(&self.text)
    }
}

/// Sigla grouped by witness layer.
///
/// The key names the layer (e.g. `a.c.`); the reserved key
/// [`crate::witness::UNCATEGORISED`] holds plain witnesses.
pub type WitnessGroups = BTreeMap<String, Vec<String>>;

/// One reading group at a variant location, and who attests it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub witnesses: WitnessGroups,

    /// `None` means the witnesses omit the text.
    #[serde(default)]
    pub readings: Option<Vec<Reading>>,

    #[serde(default, deserialize_with = "flag")]
    pub displaced: bool,

    /// Reference point for a displaced reading in a transposition.
    #[serde(default)]
    pub anchor: Option<Reading>,
}

/// Where a variant location sits in the base text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The readings replaced by the variants; never empty.
    Base(Vec<Reading>),
    /// Witnesses add text between two base readings.
    Addition { before: Reading, after: Reading },
}

/// A point or span of the base text where the witnesses disagree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawVariantLocation")]
pub struct VariantLocation {
    pub placement: Placement,
    pub has_displacement: bool,
    pub variants: Vec<Variant>,
}

#[derive(Deserialize)]
struct RawVariantLocation {
    #[serde(default)]
    base: Option<Vec<Reading>>,
    #[serde(default)]
    before: Option<Reading>,
    #[serde(default)]
    after: Option<Reading>,
    #[serde(default, deserialize_with = "flag")]
    has_displacement: bool,
    variants: Vec<Variant>,
}

impl TryFrom<RawVariantLocation> for VariantLocation {
    type Error = ApparatusError;

    fn try_from(raw: RawVariantLocation) -> Result<Self, Self::Error> {
        let placement = match (raw.base, raw.before, raw.after) {
            (Some(base), _, _) if base.is_empty() => {
                return Err(ApparatusError::malformed(
                    "variant location",
                    "`base` is present but lists no readings",
                ));
            }
            (Some(base), _, _) => Placement::Base(base),
            (None, Some(before), Some(after)) => Placement::Addition { before, after },
            (None, before, after) => {
                let missing = match (before.is_none(), after.is_none()) {
                    (true, true) => "`base`, `before` and `after`",
                    (true, false) => "`base` and `before`",
                    _ => "`base` and `after`",
                };
                return Err(ApparatusError::malformed(
                    "variant location",
                    format!("missing {}", missing),
                ));
            }
        };

        Ok(VariantLocation {
            placement,
            has_displacement: raw.has_displacement,
            variants: raw.variants,
        })
    }
}

impl VariantLocation {
    /// The base readings this location replaces, if it is not an addition.
    pub fn base(&self) -> Option<&[Reading]> {
        match &self.placement {
            Placement::Base(readings) => Some(readings),
            Placement::Addition { .. } => None,
        }
    }
}

/// The `{"variantlist": [...]}` envelope returned for a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VariantList {
    #[serde(rename = "variantlist")]
    pub locations: Vec<VariantLocation>,
}

/// Kind tag of an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum AnnotationLabel {
    Comment,
    Translation,
    Other(String),
}

impl From<String> for AnnotationLabel {
    fn from(label: String) -> Self {
        match label.as_str() {
            "COMMENT" => AnnotationLabel::Comment,
            "TRANSLATION" => AnnotationLabel::Translation,
            _ => AnnotationLabel::Other(label),
        }
    }
}

impl fmt::Display for AnnotationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationLabel::Comment => f.write_str("COMMENT"),
            AnnotationLabel::Translation => f.write_str("TRANSLATION"),
            AnnotationLabel::Other(other) => f.write_str(other),
        }
    }
}

/// Link type of an annotation link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum LinkType {
    Begin,
    End,
    Other(String),
}

impl From<String> for LinkType {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "BEGIN" => LinkType::Begin,
            "END" => LinkType::End,
            _ => LinkType::Other(kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnnotationLink {
    #[serde(rename = "type")]
    pub kind: LinkType,
    pub target: NodeId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnnotationProperties {
    #[serde(default)]
    pub text: Option<String>,
}

/// An out-of-band note spanning a stretch of the base text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub id: Option<NodeId>,

    pub label: AnnotationLabel,

    #[serde(default)]
    pub links: Vec<AnnotationLink>,

    #[serde(default)]
    pub properties: AnnotationProperties,
}

impl Annotation {
    /// Target of the first link of the given type.
    pub fn target(&self, kind: &LinkType) -> Option<&NodeId> {
        self.links
            .iter()
            .find(|link| &link.kind == kind)
            .map(|link| &link.target)
    }

    pub fn begin(&self) -> Option<&NodeId> {
        self.target(&LinkType::Begin)
    }

    pub fn end(&self) -> Option<&NodeId> {
        self.target(&LinkType::End)
    }

    pub fn text(&self) -> Option<&str> {
        self.properties.text.as_deref()
    }

    /// How to refer to this annotation in messages.
    pub(crate) fn describe(&self) -> String {
        match &self.id {
            Some(id) => format!("{} annotation {}", self.label, id),
            None => format!("{} annotation", self.label),
        }
    }
}

/// Everything needed to typeset one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edition {
    /// The edited text, in order.
    pub base: Vec<Reading>,
    pub variants: Vec<VariantLocation>,
    pub annotations: Vec<Annotation>,
}

impl Edition {
    pub fn new(base: Vec<Reading>, variants: VariantList, annotations: Vec<Annotation>) -> Self {
        Edition {
            base,
            variants: variants.locations,
            annotations,
        }
    }
}
