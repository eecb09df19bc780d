/*
 * index.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Lookup tables from base reading to the apparatus anchored there.
//!
//! Every variant location and annotation is hung on one reading of the base
//! text, the last one it covers, so that the document writer can emit the
//! whole apparatus for a reading when it reaches it.
//!
//! Buckets keep input order. A reading with nothing anchored at it has no
//! entry at all rather than an empty one.

use std::collections::HashMap;

use crate::error::{ApparatusError, Result};
use crate::model::{Annotation, AnnotationLabel, NodeId, Placement, VariantLocation};

/// The reading a variant location is anchored at.
///
/// That is the last reading of the base chain, or for an addition the
/// reading that follows the insertion point.
pub fn variant_anchor(location: &VariantLocation) -> Result<&NodeId> {
    let anchor = match &location.placement {
        Placement::Base(readings) => readings.last().map(|r| &r.id),
        Placement::Addition { after, .. } => Some(&after.id),
    };
    match anchor {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ApparatusError::malformed(
            "variant location",
            "anchor reading has no `id`",
        )),
    }
}

/// Variant locations by anchor reading.
#[derive(Debug, Default)]
pub struct VariantIndex<'a> {
    by_anchor: HashMap<NodeId, Vec<&'a VariantLocation>>,
}

impl<'a> VariantIndex<'a> {
    pub fn build(locations: &'a [VariantLocation]) -> Result<Self> {
        let mut by_anchor: HashMap<NodeId, Vec<&'a VariantLocation>> = HashMap::new();
        for location in locations {
            let anchor = variant_anchor(location)?;
            by_anchor.entry(anchor.clone()).or_default().push(location);
        }
        Ok(VariantIndex { by_anchor })
    }

    /// Locations anchored at `id`, or `None` if there are none.
    pub fn get(&self, id: &str) -> Option<&[&'a VariantLocation]> {
        self.by_anchor.get(id).map(Vec::as_slice)
    }

    /// Locations anchored at `id`; empty if there are none.
    pub fn at(&self, id: &str) -> &[&'a VariantLocation] {
        self.get(id).unwrap_or_default()
    }

    pub fn anchors(&self) -> impl Iterator<Item = &NodeId> {
        self.by_anchor.keys()
    }

    pub fn len(&self) -> usize {
        self.by_anchor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_anchor.is_empty()
    }
}

/// Annotations by the reading their END link points at.
#[derive(Debug, Default)]
pub struct AnnotationIndex<'a> {
    by_anchor: HashMap<NodeId, Vec<&'a Annotation>>,
}

impl<'a> AnnotationIndex<'a> {
    /// Index `annotations`; those without an END link are skipped.
    pub fn build(annotations: &'a [Annotation]) -> Self {
        let mut by_anchor: HashMap<NodeId, Vec<&'a Annotation>> = HashMap::new();
        for annotation in annotations {
            match annotation.end() {
                Some(anchor) => by_anchor.entry(anchor.clone()).or_default().push(annotation),
                None => tracing::debug!("Skipping {} without an END link", annotation.describe()),
            }
        }
        AnnotationIndex { by_anchor }
    }

    pub fn get(&self, id: &str) -> Option<&[&'a Annotation]> {
        self.by_anchor.get(id).map(Vec::as_slice)
    }

    /// Annotations with `label` that end at `id`, in input order.
    pub fn labelled(&self, id: &str, label: &AnnotationLabel) -> Vec<&'a Annotation> {
        self.get(id)
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|annotation| &annotation.label == label)
            .collect()
    }

    pub fn comments_at(&self, id: &str) -> Vec<&'a Annotation> {
        self.labelled(id, &AnnotationLabel::Comment)
    }

    /// The translation text ending at `id`.
    ///
    /// At most one translation may end at a reading; a second one is a data
    /// error since there is no way to tell which should be printed.
    pub fn translation_at(&self, id: &str) -> Result<Option<&'a str>> {
        let translations = self.labelled(id, &AnnotationLabel::Translation);
        match translations[..] {
            [] => Ok(None),
            [translation] => translation.text().map(Some).ok_or_else(|| {
                ApparatusError::malformed(
                    "annotation",
                    format!("{} has no `properties.text`", translation.describe()),
                )
            }),
            _ => Err(ApparatusError::MultipleTranslations {
                reading: NodeId::from(id),
            }),
        }
    }

    pub fn anchors(&self) -> impl Iterator<Item = (&NodeId, &[&'a Annotation])> {
        self.by_anchor.iter().map(|(id, bucket)| (id, bucket.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_anchor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_anchor.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotationLink, AnnotationProperties, LinkType, Reading};

    fn location(base_ids: &[&str]) -> VariantLocation {
        VariantLocation {
            placement: Placement::Base(base_ids.iter().map(|id| Reading::new(*id, "x")).collect()),
            has_displacement: false,
            variants: vec![],
        }
    }

    fn annotation(label: &str, begin: u64, end: Option<u64>, text: &str) -> Annotation {
        let mut links = vec![AnnotationLink {
            kind: LinkType::Begin,
            target: NodeId::from(begin),
        }];
        if let Some(end) = end {
            links.push(AnnotationLink {
                kind: LinkType::End,
                target: NodeId::from(end),
            });
        }
        Annotation {
            id: None,
            label: AnnotationLabel::from(label.to_string()),
            links,
            properties: AnnotationProperties {
                text: Some(text.to_string()),
            },
        }
    }

    #[test]
    fn test_variants_hang_on_last_base_reading() {
        let locations = vec![location(&["1", "2"]), location(&["3"]), location(&["2"])];
        let index = VariantIndex::build(&locations).unwrap();
        assert_eq!(index.len(), 2);
        let bucket = index.get("2").unwrap();
        assert_eq!(bucket.len(), 2);
        assert!(std::ptr::eq(bucket[0], &locations[0]));
        assert!(std::ptr::eq(bucket[1], &locations[2]));
        assert!(index.get("1").is_none());
        assert!(index.at("1").is_empty());
    }

    #[test]
    fn test_addition_hangs_on_after_reading() {
        let locations = vec![VariantLocation {
            placement: Placement::Addition {
                before: Reading::new("2", "a"),
                after: Reading::new("3", "b"),
            },
            has_displacement: false,
            variants: vec![],
        }];
        let index = VariantIndex::build(&locations).unwrap();
        assert!(index.get("3").is_some());
        assert!(index.get("2").is_none());
    }

    #[test]
    fn test_anchor_without_id_is_malformed() {
        let locations = vec![location(&[""])];
        assert!(matches!(
            VariantIndex::build(&locations),
            Err(ApparatusError::Malformed { .. })
        ));
    }

    #[test]
    fn test_annotations_without_end_are_dropped() {
        let annotations = vec![
            annotation("COMMENT", 1, Some(2), "first"),
            annotation("COMMENT", 1, None, "dangling"),
            annotation("TRANSLATION", 1, Some(2), "hello"),
        ];
        let index = AnnotationIndex::build(&annotations);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("2").map(|b| b.len()), Some(2));
        assert_eq!(index.comments_at("2").len(), 1);
        assert_eq!(index.translation_at("2").unwrap(), Some("hello"));
        assert_eq!(index.translation_at("1").unwrap(), None);
    }

    #[test]
    fn test_two_translations_at_one_reading() {
        let annotations = vec![
            annotation("TRANSLATION", 1, Some(2), "hello"),
            annotation("TRANSLATION", 2, Some(2), "again"),
        ];
        let index = AnnotationIndex::build(&annotations);
        match index.translation_at("2") {
            Err(ApparatusError::MultipleTranslations { reading }) => {
                assert_eq!(reading.as_str(), "2")
            }
            other => panic!("expected MultipleTranslations, got {:?}", other),
        }
    }
}
