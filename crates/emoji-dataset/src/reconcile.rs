//! Joining the parsed feeds by normalized character.
//!
//! Annotations are folded into an [`AnnotationIndex`] in two passes: the base
//! CLDR annotations first, then the derived annotations. Derived entries for
//! skin-tone variants (`👋🏽`) never become records of their own; they only mark
//! their base character as supporting Fitzpatrick modifiers.

use crate::aliases::AliasTable;
use crate::annotations::AnnotationRecord;
use crate::categories::CategoryEntry;
use crate::dataset::{Dataset, assemble};
use crate::error::Result;
use crate::normalize::{NormalizedKey, normalize, strip_modifiers};
use std::collections::HashMap;

/// Keywords and modifier support for one character
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotationEntry {
    /// Raw keyword phrases from the winning annotation
    pub keywords: Vec<String>,
    /// Whether a skin-tone variant of this character exists
    pub fitzpatrick: bool,
}

/// What happened to a single derived annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedOutcome {
    /// Regular annotation, inserted or replaced keywords
    Upserted,
    /// Skin-tone variant; its base character was flagged
    Flagged,
    /// Skin-tone variant whose base has no annotation
    Dropped,
}

/// The join map from normalized key to annotation data
#[derive(Debug, Clone, Default)]
pub struct AnnotationIndex {
    entries: HashMap<NormalizedKey, AnnotationEntry>,
}

impl AnnotationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the keywords for `key`, keeping any modifier flag
    /// already set.
    pub fn upsert(&mut self, key: NormalizedKey, keywords: Vec<String>) {
        self.entries.entry(key).or_default().keywords = keywords;
    }

    /// Fold the base annotation document. Later records replace earlier ones.
    pub fn fold_base(&mut self, records: &[AnnotationRecord]) {
        for record in records {
            self.upsert(record.key.clone(), record.keywords.clone());
        }
    }

    /// Fold one derived annotation.
    ///
    /// Modifier detection looks at the raw `cp`: any skin-tone code point
    /// anywhere in it makes this a variant, and all of them are stripped to
    /// find the base.
    pub fn fold_derived_record(&mut self, record: &AnnotationRecord) -> DerivedOutcome {
        match strip_modifiers(&record.raw) {
            Some(base) => match self.entries.get_mut(&normalize(&base)) {
                Some(entry) => {
                    entry.fitzpatrick = true;
                    DerivedOutcome::Flagged
                }
                None => {
                    tracing::trace!(cp = %record.raw, "no base annotation for modifier variant");
                    DerivedOutcome::Dropped
                }
            },
            None => {
                self.upsert(record.key.clone(), record.keywords.clone());
                DerivedOutcome::Upserted
            }
        }
    }

    /// Fold the derived annotation document, after [`fold_base`](Self::fold_base).
    pub fn fold_derived(&mut self, records: &[AnnotationRecord]) {
        let (mut upserted, mut flagged, mut dropped) = (0usize, 0usize, 0usize);
        for record in records {
            match self.fold_derived_record(record) {
                DerivedOutcome::Upserted => upserted += 1,
                DerivedOutcome::Flagged => flagged += 1,
                DerivedOutcome::Dropped => dropped += 1,
            }
        }
        tracing::debug!(upserted, flagged, dropped, "folded derived annotations");
    }

    pub fn get(&self, key: &NormalizedKey) -> Option<&AnnotationEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The four parsed feeds, fully loaded
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub annotations: Vec<AnnotationRecord>,
    pub derived_annotations: Vec<AnnotationRecord>,
    pub categories: Vec<CategoryEntry>,
    pub aliases: AliasTable,
}

impl Sources {
    /// Build the annotation join map: base first, then derived.
    pub fn annotation_index(&self) -> AnnotationIndex {
        let mut index = AnnotationIndex::new();
        index.fold_base(&self.annotations);
        index.fold_derived(&self.derived_annotations);
        index
    }

    /// Reconcile all feeds into the final dataset.
    pub fn reconcile(&self) -> Result<Dataset> {
        let _span = tracing::debug_span!("reconcile").entered();
        let index = self.annotation_index();
        assemble(&self.categories, &self.aliases, &index)
    }
}
