//! GitHub's short-name registry (`https://api.github.com/emojis`).
//!
//! The registry maps each name to an image URL. Unicode artwork lives under a
//! path containing `unicode` and is named after the depicted code points, e.g.
//! `https://github.githubassets.com/images/icons/emoji/unicode/1f44d.png?v8`.
//! Custom artwork (`:octocat:` and friends) has no character and is skipped.

use crate::error::{BuildError, Result};
use crate::normalize::{NormalizedKey, decode_code_points, normalize};
use indexmap::IndexMap;

/// Marker that distinguishes Unicode artwork from custom images.
pub const UNICODE_MARKER: &str = "unicode";

/// All names that refer to one character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasGroup {
    pub key: NormalizedKey,
    /// Names in registry order
    pub names: Vec<String>,
}

/// Alias groups keyed by normalized character, in discovery order
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    groups: IndexMap<NormalizedKey, AliasGroup>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` as an alias of the character `char`
    pub fn insert(&mut self, char: &str, name: impl Into<String>) {
        let key = normalize(char);
        self.groups
            .entry(key.clone())
            .or_insert_with(|| AliasGroup {
                key,
                names: Vec::new(),
            })
            .names
            .push(name.into());
    }

    pub fn get(&self, key: &NormalizedKey) -> Option<&AliasGroup> {
        self.groups.get(key)
    }

    /// Number of distinct characters that carry at least one alias
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasGroup> {
        self.groups.values()
    }
}

/// Decode the character depicted by an image URL, or `None` for custom artwork.
pub fn char_from_url(url: &str) -> Option<Result<String>> {
    if !url.contains(UNICODE_MARKER) {
        return None;
    }
    let filename = url.rsplit('/').next().unwrap_or(url);
    let stem = filename.split(".png").next().unwrap_or(filename);
    Some(decode_code_points(stem.split('-')))
}

/// Parse the registry JSON into alias groups.
pub fn parse_aliases(json: &str) -> Result<AliasTable> {
    let _span = tracing::debug_span!("parse_aliases").entered();

    let registry: IndexMap<String, String> =
        serde_json::from_str(json).map_err(|source| BuildError::AliasJson { source })?;

    let mut table = AliasTable::new();
    let mut skipped = 0usize;
    for (name, url) in &registry {
        match char_from_url(url) {
            Some(Ok(char)) => table.insert(&char, name.as_str()),
            Some(Err(e)) => return Err(BuildError::malformed_alias(name, url, e.to_string())),
            None => {
                tracing::trace!(name = %name, "skipping non-unicode alias");
                skipped += 1;
            }
        }
    }

    tracing::debug!(
        names = registry.len(),
        characters = table.len(),
        skipped,
        "parsed alias registry"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "+1": "https://github.githubassets.com/images/icons/emoji/unicode/1f44d.png?v8",
        "thumbsup": "https://github.githubassets.com/images/icons/emoji/unicode/1f44d.png?v8",
        "octocat": "https://github.githubassets.com/images/icons/emoji/octocat.png?v8",
        "heart": "https://github.githubassets.com/images/icons/emoji/unicode/2764.png?v8",
        "rainbow_flag": "https://github.githubassets.com/images/icons/emoji/unicode/1f3f3-fe0f-200d-1f308.png?v8"
    }"#;

    #[test]
    fn test_groups_names_by_character() {
        let table = parse_aliases(SAMPLE).expect("parse");
        assert_eq!(table.len(), 3);

        let thumbs = table.get(&normalize("👍")).expect("thumbs up");
        assert_eq!(thumbs.names, vec!["+1", "thumbsup"]);
    }

    #[test]
    fn test_discovery_order() {
        let table = parse_aliases(SAMPLE).expect("parse");
        let firsts: Vec<_> = table.iter().map(|g| g.names[0].as_str()).collect();
        assert_eq!(firsts, vec!["+1", "heart", "rainbow_flag"]);
    }

    #[test]
    fn test_keys_are_normalized() {
        let table = parse_aliases(SAMPLE).expect("parse");
        assert!(table.get(&normalize("\u{1F3F3}\u{1F308}")).is_some());
        assert!(table.get(&normalize("\u{2764}\u{FE0F}")).is_some());
    }

    #[test]
    fn test_custom_artwork_skipped() {
        assert!(char_from_url("https://example.com/emoji/octocat.png?v8").is_none());
    }

    #[test]
    fn test_bad_hex_is_an_error() {
        let json = r#"{"broken": "https://example.com/unicode/1f6zz.png"}"#;
        let err = parse_aliases(json).unwrap_err();
        assert!(matches!(err, BuildError::MalformedAlias { .. }));
    }

    #[test]
    fn test_not_an_object() {
        let err = parse_aliases("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, BuildError::AliasJson { .. }));
    }
}
