/*
 * reading.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Joining readings into typeset text.
//!
//! Readings are separated by a single space unless one side asks to be
//! joined (clitics, enclitic particles, punctuation). The same rule governs
//! lemma strings inside the apparatus and the running base text.

use crate::model::Reading;

/// Whether a space goes between `previous` and `next`.
///
/// Nothing precedes the first reading of a run.
pub fn needs_separator(previous: Option<&Reading>, next: &Reading) -> bool {
    match previous {
        None => false,
        Some(previous) => !(previous.join_next || next.join_prior),
    }
}

/// Concatenate the display texts of `readings`, honouring join flags.
pub fn join_readings<'a>(readings: impl IntoIterator<Item = &'a Reading>) -> String {
    let mut text = String::new();
    let mut previous: Option<&Reading> = None;
    for reading in readings {
        if needs_separator(previous, reading) {
            text.push(' ');
        }
        text.push_str(reading.display_text());
        previous = Some(reading);
    }
    text
}

/// Join `readings` and wrap the result in a language macro if needed.
pub fn render_readings<'a>(
    language: Option<&str>,
    readings: impl IntoIterator<Item = &'a Reading>,
) -> String {
    wrap_language(language, join_readings(readings))
}

/// Wrap `text` as `\<language>{text}` when it contains non-ASCII characters.
///
/// Pure ASCII is returned as-is even with a language set: polyglossia only
/// needs switching for scripts the main language font cannot set. This
/// misses languages written in Latin script without diacritics.
pub fn wrap_language(language: Option<&str>, text: String) -> String {
    match language {
        Some(tag) if !is_plain_ascii(&text) => format!("\\{}{{{}}}", tag, text),
        _ => text,
    }
}

/// True if no character lies above code point 128.
fn is_plain_ascii(text: &str) -> bool {
    text.chars().all(|c| (c as u32) <= 128)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(text: &str) -> Reading {
        Reading::new("", text)
    }

    #[test]
    fn test_single_reading() {
        assert_eq!(join_readings([&reading("dog")]), "dog");
    }

    #[test]
    fn test_space_separated() {
        let a = reading("the");
        let b = reading("dog");
        assert_eq!(join_readings([&a, &b]), "the dog");
    }

    #[test]
    fn test_join_prior_and_join_next() {
        let a = reading("arma");
        let b = Reading {
            join_prior: true,
            ..reading("que")
        };
        let c = Reading {
            join_next: true,
            ..reading("«")
        };
        let d = reading("uirum");
        assert_eq!(join_readings([&a, &b, &c, &d]), "armaque «uirum");
    }

    #[test]
    fn test_ascii_is_never_wrapped() {
        let a = reading("hello");
        assert_eq!(render_readings(Some("armenian"), [&a]), "hello");
    }

    #[test]
    fn test_non_ascii_is_wrapped_with_tag() {
        let a = reading("բան");
        assert_eq!(render_readings(Some("armenian"), [&a]), "\\armenian{բան}");
        assert_eq!(render_readings(None, [&a]), "բան");
    }

    #[test]
    fn test_code_point_128_counts_as_ascii() {
        assert!(is_plain_ascii("\u{80}"));
        assert!(!is_plain_ascii("\u{81}"));
    }
}
