//! The Unicode emoji enumeration (`emoji-test.txt`).

use crate::error::{BuildError, Result};
use crate::normalize::{NormalizedKey, decode_code_points, normalize};
use regex::Regex;
use smol_str::SmolStr;
use std::collections::HashSet;
use std::sync::LazyLock;

const GROUP_HEADER: &str = "# group: ";
const SUBGROUP_HEADER: &str = "# subgroup: ";

static CODE_POINTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9a-f]+(?: [0-9a-f]+)*)\s*;").expect("code point pattern is valid")
});

/// A character and its place in the group/subgroup taxonomy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    /// The character as spelled on its first line, variation selectors intact
    pub char: String,
    pub category: SmolStr,
    pub sub_category: SmolStr,
}

impl CategoryEntry {
    pub fn key(&self) -> NormalizedKey {
        normalize(&self.char)
    }
}

/// Parse the enumeration into one entry per distinct normalized character.
///
/// Order follows the file. When several lines spell the same character
/// (fully-qualified, minimally-qualified, unqualified), the first one wins and
/// the rest are dropped.
pub fn parse_categories(text: &str) -> Result<Vec<CategoryEntry>> {
    let _span = tracing::debug_span!("parse_categories").entered();

    let mut seen: HashSet<NormalizedKey> = HashSet::new();
    let mut entries = Vec::new();
    let mut group: Option<SmolStr> = None;
    let mut subgroup: Option<SmolStr> = None;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('#') {
            if let Some(name) = trimmed.strip_prefix(GROUP_HEADER) {
                group = Some(SmolStr::new(name));
            } else if let Some(name) = trimmed.strip_prefix(SUBGROUP_HEADER) {
                subgroup = Some(SmolStr::new(name));
            }
            continue;
        }

        let captures = CODE_POINTS.captures(trimmed).ok_or_else(|| {
            BuildError::malformed_line(line_no, trimmed, "expected hex code points followed by `;`")
        })?;
        let char = decode_code_points(captures[1].split(' '))
            .map_err(|e| BuildError::malformed_line(line_no, trimmed, e.to_string()))?;

        let key = normalize(&char);
        if !seen.insert(key) {
            tracing::trace!(line = line_no, "skipping duplicate of an earlier character");
            continue;
        }

        let (Some(category), Some(sub_category)) = (&group, &subgroup) else {
            return Err(BuildError::malformed_line(
                line_no,
                trimmed,
                "data line before any group/subgroup header",
            ));
        };

        entries.push(CategoryEntry {
            char,
            category: category.clone(),
            sub_category: sub_category.clone(),
        });
    }

    tracing::debug!(count = entries.len(), "parsed emoji categories");
    Ok(entries)
}
