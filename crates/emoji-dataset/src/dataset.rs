//! The published dataset.
//!
//! [`assemble`] walks the category list in enumeration order and emits one
//! [`OutputEmoji`] per character that has both an alias and an annotation. The
//! number of emitted records must equal the number of distinct aliased
//! characters, otherwise the build fails with [`BuildError::Integrity`].

use crate::aliases::AliasTable;
use crate::categories::CategoryEntry;
use crate::error::{BuildError, Result};
use crate::keywords::process_keywords;
use crate::normalize::{NormalizedKey, modifier_strings};
use crate::reconcile::AnnotationIndex;
use serde::Serialize;
use smol_str::SmolStr;
use std::collections::HashSet;
use std::path::Path;

/// One emoji in the published dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputEmoji {
    /// Short names, never empty
    pub names: Vec<String>,
    /// Presentation form from the emoji enumeration
    pub char: String,
    pub category: SmolStr,
    pub sub_category: SmolStr,
    pub keywords: Vec<String>,
    pub fitzpatrick: bool,
}

/// The complete dataset written by `emoji-fetch`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub fitzpatrick_modifiers: Vec<String>,
    pub emoji: Vec<OutputEmoji>,
}

impl Dataset {
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(|source| BuildError::Serialize { source })
    }

    /// Serialize to `path`, replacing any existing file
    pub fn write_to(&self, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
        let json = self.to_json(pretty)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Number of emoji that accept skin-tone modifiers
    pub fn fitzpatrick_count(&self) -> usize {
        self.emoji.iter().filter(|e| e.fitzpatrick).count()
    }
}

/// Walk the categories in order and emit a record for every character that
/// has both an alias and an annotation.
///
/// Fails with [`BuildError::Integrity`] unless every aliased character made it
/// into the output exactly once.
pub fn assemble(
    categories: &[CategoryEntry],
    aliases: &AliasTable,
    annotations: &AnnotationIndex,
) -> Result<Dataset> {
    let mut emoji = Vec::new();
    let mut emitted: HashSet<NormalizedKey> = HashSet::new();

    for entry in categories {
        let key = entry.key();
        let Some(group) = aliases.get(&key) else {
            continue;
        };
        let Some(annotation) = annotations.get(&key) else {
            tracing::debug!(char = %entry.char, "aliased character has no annotation");
            continue;
        };

        emoji.push(OutputEmoji {
            names: group.names.clone(),
            char: entry.char.clone(),
            category: entry.category.clone(),
            sub_category: entry.sub_category.clone(),
            keywords: process_keywords(&annotation.keywords),
            fitzpatrick: annotation.fitzpatrick,
        });
        emitted.insert(key);
    }

    if aliases.len() != emoji.len() {
        let unmatched = aliases
            .iter()
            .filter(|g| !emitted.contains(&g.key))
            .map(|g| g.key.to_string())
            .collect();
        return Err(BuildError::integrity(aliases.len(), emoji.len(), unmatched));
    }

    Ok(Dataset {
        fitzpatrick_modifiers: modifier_strings(),
        emoji,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::AnnotationRecord;

    fn category(char: &str) -> CategoryEntry {
        CategoryEntry {
            char: char.to_string(),
            category: "Smileys & Emotion".into(),
            sub_category: "face-smiling".into(),
        }
    }

    fn annotations(entries: &[(&str, &str)]) -> AnnotationIndex {
        let records: Vec<_> = entries
            .iter()
            .map(|(cp, text)| {
                AnnotationRecord::new(*cp, text.split(" | ").map(str::to_string).collect())
            })
            .collect();
        let mut index = AnnotationIndex::new();
        index.fold_base(&records);
        index
    }

    #[test]
    fn test_skips_characters_without_alias() {
        let mut aliases = AliasTable::new();
        aliases.insert("😀", "grinning");

        let dataset = assemble(
            &[category("😀"), category("😃")],
            &aliases,
            &annotations(&[("😀", "grinning face"), ("😃", "smiley")]),
        )
        .expect("assemble");

        assert_eq!(dataset.emoji.len(), 1);
        assert_eq!(dataset.emoji[0].names, vec!["grinning"]);
        assert_eq!(dataset.emoji[0].keywords, vec!["grinning", "face"]);
    }

    #[test]
    fn test_alias_without_category_fails_integrity() {
        let mut aliases = AliasTable::new();
        aliases.insert("😀", "grinning");
        aliases.insert("🦄", "unicorn");

        let err = assemble(
            &[category("😀")],
            &aliases,
            &annotations(&[("😀", "grinning face"), ("🦄", "unicorn")]),
        )
        .unwrap_err();

        match err {
            BuildError::Integrity {
                aliases,
                emitted,
                unmatched,
                ..
            } => {
                assert_eq!((aliases, emitted), (2, 1));
                assert_eq!(unmatched, vec!["🦄"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_alias_without_annotation_fails_integrity() {
        let mut aliases = AliasTable::new();
        aliases.insert("😀", "grinning");

        let err = assemble(&[category("😀")], &aliases, &AnnotationIndex::new()).unwrap_err();
        assert!(err.is_integrity_violation());
    }

    #[test]
    fn test_keeps_presentation_form() {
        let mut aliases = AliasTable::new();
        aliases.insert("\u{2764}", "heart");

        let dataset = assemble(
            &[category("\u{2764}\u{FE0F}")],
            &aliases,
            &annotations(&[("\u{2764}\u{FE0F}", "heart | red heart")]),
        )
        .expect("assemble");
        assert_eq!(dataset.emoji[0].char, "\u{2764}\u{FE0F}");
    }

    #[test]
    fn test_json_shape() {
        let mut aliases = AliasTable::new();
        aliases.insert("😀", "grinning");
        let dataset = assemble(
            &[category("😀")],
            &aliases,
            &annotations(&[("😀", "grinning face")]),
        )
        .expect("assemble");

        let value: serde_json::Value =
            serde_json::from_str(&dataset.to_json(false).expect("json")).expect("valid json");
        assert_eq!(
            value,
            serde_json::json!({
                "fitzpatrickModifiers": ["🏻", "🏼", "🏽", "🏾", "🏿"],
                "emoji": [{
                    "names": ["grinning"],
                    "char": "😀",
                    "category": "Smileys & Emotion",
                    "subCategory": "face-smiling",
                    "keywords": ["grinning", "face"],
                    "fitzpatrick": false
                }]
            })
        );
    }
}
