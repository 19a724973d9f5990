//! Character identity shared by every source.
//!
//! The three upstream feeds disagree on whether an emoji is spelled with
//! variation selectors or zero-width joiners, so nothing is ever compared
//! across sources before passing through [`normalize`].

use crate::error::{BuildError, Result};
use smol_str::SmolStr;
use std::fmt;

/// The five Fitzpatrick skin-tone modifiers, light to dark, in code point order.
///
/// Shared between variant detection and the `fitzpatrickModifiers` field of
/// the output.
pub const FITZPATRICK_MODIFIERS: [char; 5] = [
    '\u{1F3FB}',
    '\u{1F3FC}',
    '\u{1F3FD}',
    '\u{1F3FE}',
    '\u{1F3FF}',
];

const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// Join key for a character: the original sequence minus variation selectors
/// (U+FE00..=U+FE0F) and zero-width joiners.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedKey(SmolStr);

impl NormalizedKey {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

fn is_stripped(c: char) -> bool {
    matches!(c, '\u{FE00}'..='\u{FE0F}') || c == ZERO_WIDTH_JOINER
}

/// Normalize a character sequence into its join key.
///
/// Only variation selectors and zero-width joiners are removed; no case
/// folding or Unicode normalization form is applied.
pub fn normalize(s: &str) -> NormalizedKey {
    NormalizedKey(s.chars().filter(|&c| !is_stripped(c)).collect())
}

/// Whether `c` is one of the [`FITZPATRICK_MODIFIERS`].
pub fn is_modifier(c: char) -> bool {
    FITZPATRICK_MODIFIERS.contains(&c)
}

/// Returns `s` with every skin-tone modifier removed, or `None` if `s`
/// contains no modifier at all.
pub fn strip_modifiers(s: &str) -> Option<String> {
    if !s.chars().any(is_modifier) {
        return None;
    }
    Some(s.chars().filter(|&c| !is_modifier(c)).collect())
}

/// Modifiers rendered as single-character strings for serialization.
pub fn modifier_strings() -> Vec<String> {
    FITZPATRICK_MODIFIERS.iter().map(|c| c.to_string()).collect()
}

/// Decode a sequence of hexadecimal code points into a string.
pub fn decode_code_points<'a>(code_points: impl IntoIterator<Item = &'a str>) -> Result<String> {
    code_points
        .into_iter()
        .map(|cp| {
            u32::from_str_radix(cp, 16)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| BuildError::InvalidCodePoint {
                    code_point: cp.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_variation_selectors_and_joiners() {
        // red heart with VS16
        assert_eq!(normalize("\u{2764}\u{FE0F}").as_str(), "\u{2764}");
        // man technologist: man ZWJ laptop
        assert_eq!(
            normalize("\u{1F468}\u{200D}\u{1F4BB}").as_str(),
            "\u{1F468}\u{1F4BB}"
        );
        assert_eq!(normalize("\u{FE00}").as_str(), "");
    }

    #[test]
    fn test_normalize_keeps_modifiers_and_case() {
        assert_eq!(
            normalize("\u{1F44B}\u{1F3FD}").as_str(),
            "\u{1F44B}\u{1F3FD}"
        );
        assert_eq!(normalize("Ab").as_str(), "Ab");
    }

    /// Any character, biased towards the ones normalization and modifier
    /// detection care about.
    fn emoji_char() -> impl Strategy<Value = char> {
        prop_oneof![
            any::<char>(),
            prop::char::range('\u{FE00}', '\u{FE0F}'),
            Just(ZERO_WIDTH_JOINER),
            prop::char::range('\u{1F3FB}', '\u{1F3FF}'),
            prop::char::range('\u{1F300}', '\u{1FAFF}'),
        ]
    }

    /// A character that survives normalization
    fn kept_char() -> impl Strategy<Value = char> {
        emoji_char().prop_filter("stripped by normalize", |c| !is_stripped(*c))
    }

    /// A base sequence plus the same sequence with selectors and joiners
    /// sprinkled after arbitrary characters.
    fn decorated() -> impl Strategy<Value = (String, String)> {
        prop::collection::vec(
            (
                kept_char(),
                prop::collection::vec(
                    prop_oneof![
                        prop::char::range('\u{FE00}', '\u{FE0F}'),
                        Just(ZERO_WIDTH_JOINER)
                    ],
                    0..3,
                ),
            ),
            0..8,
        )
        .prop_map(|parts| {
            let base: String = parts.iter().map(|(c, _)| *c).collect();
            let spelled: String = parts
                .iter()
                .flat_map(|(c, marks)| std::iter::once(*c).chain(marks.iter().copied()))
                .collect();
            (base, spelled)
        })
    }

    proptest! {
        #[test]
        fn test_normalize_idempotent(input in prop::collection::vec(emoji_char(), 0..16)) {
            let input: String = input.into_iter().collect();
            let once = normalize(&input);
            prop_assert_eq!(normalize(once.as_str()), once);
        }

        #[test]
        fn test_normalize_removes_only_selectors_and_joiners((base, spelled) in decorated()) {
            let normalized = normalize(&spelled);
            prop_assert_eq!(normalized.as_str(), base.as_str());
        }

        #[test]
        fn test_normalize_distinguishes_distinct_emoji(
            (base_a, spelled_a) in decorated(),
            (base_b, spelled_b) in decorated()
        ) {
            prop_assert_eq!(normalize(&spelled_a) == normalize(&spelled_b), base_a == base_b);
        }
    }

    #[test]
    fn test_normalize_fixture_enumeration() {
        let text = include_str!("../tests/fixtures/emoji-test.txt");
        let data_lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'));

        for line in data_lines {
            let (code_points, _) = line.split_once(';').expect("data line has `;`");
            let char = decode_code_points(code_points.split_whitespace()).expect("valid hex");
            let key = normalize(&char);

            assert_eq!(normalize(key.as_str()), key, "line {:?}", line);
            let expected: String = code_points
                .split_whitespace()
                .filter(|cp| !matches!(cp.to_ascii_uppercase().as_str(), "200D" | "FE0E" | "FE0F"))
                .map(|cp| decode_code_points([cp]).expect("valid hex"))
                .collect();
            assert_eq!(key.as_str(), expected, "line {:?}", line);
        }
    }

    #[test]
    fn test_strip_modifiers() {
        assert_eq!(strip_modifiers("\u{1F600}"), None);
        assert_eq!(
            strip_modifiers("\u{1F44B}\u{1F3FF}").as_deref(),
            Some("\u{1F44B}")
        );
        // every occurrence, not just a trailing one
        assert_eq!(
            strip_modifiers("\u{1F9D1}\u{1F3FB}\u{200D}\u{1F91D}\u{200D}\u{1F9D1}\u{1F3FC}")
                .as_deref(),
            Some("\u{1F9D1}\u{200D}\u{1F91D}\u{200D}\u{1F9D1}")
        );
    }

    #[test]
    fn test_modifier_strings_in_code_point_order() {
        assert_eq!(
            modifier_strings(),
            vec!["🏻", "🏼", "🏽", "🏾", "🏿"]
        );
    }

    #[test]
    fn test_decode_code_points() {
        assert_eq!(decode_code_points(["1f600"]).unwrap(), "😀");
        assert_eq!(
            decode_code_points(["2764", "FE0F"]).unwrap(),
            "\u{2764}\u{FE0F}"
        );
        assert!(matches!(
            decode_code_points(["zz"]),
            Err(BuildError::InvalidCodePoint { .. })
        ));
        // surrogates are not scalar values
        assert!(decode_code_points(["d800"]).is_err());
    }
}
