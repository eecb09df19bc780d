/*
 * witness.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Witness sigla for apparatus entries.

use crate::model::WitnessGroups;

/// Layer name for witnesses cited without a label.
pub const UNCATEGORISED: &str = "witnesses";

/// Render grouped sigla as one sorted citation string.
///
/// Sigla from a labelled layer are written `A (a.c.)`; plain witnesses are
/// written bare. An empty mapping gives an empty string.
pub fn format_witnesses(groups: &WitnessGroups) -> String {
    let mut sigla: Vec<String> = groups
        .iter()
        .flat_map(|(layer, sigla)| {
            sigla.iter().map(move |siglum| {
                if layer == UNCATEGORISED {
                    siglum.clone()
                } else {
                    format!("{} ({})", siglum, layer)
                }
            })
        })
        .collect();
    sigla.sort();
    sigla.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(entries: &[(&str, &[&str])]) -> WitnessGroups {
        entries
            .iter()
            .map(|(layer, sigla)| {
                (
                    layer.to_string(),
                    sigla.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_witnesses(&WitnessGroups::new()), "");
    }

    #[test]
    fn test_plain_witnesses_are_bare_and_sorted() {
        let wits = groups(&[("witnesses", &["C", "A", "B"])]);
        assert_eq!(format_witnesses(&wits), "A B C");
    }

    #[test]
    fn test_layers_are_labelled_and_interleaved() {
        let wits = groups(&[("witnesses", &["B", "D"]), ("corr", &["A"]), ("a.c.", &["C"])]);
        assert_eq!(format_witnesses(&wits), "A (corr) B C (a.c.) D");
    }
}
