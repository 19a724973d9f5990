//! CLDR annotation documents (`common/annotations/<locale>.xml` and
//! `common/annotationsDerived/<locale>.xml`).
//!
//! Both documents share a schema:
//!
//! ```xml
//! <ldml>
//!     <annotations>
//!         <annotation cp="😀">face | grin | grinning face</annotation>
//!         <annotation cp="😀" type="tts">grinning face</annotation>
//!     </annotations>
//! </ldml>
//! ```
//!
//! Only the untyped keyword-list entries are kept; `type="tts"` entries are
//! spoken descriptions, not keywords.

use crate::error::{BuildError, Result};
use crate::normalize::{NormalizedKey, normalize};

/// Separator between keyword phrases in an annotation's text.
pub const KEYWORD_SEPARATOR: &str = " | ";

/// One keyword-list annotation for a character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    /// The `cp` attribute exactly as written in the document
    pub raw: String,
    /// Join key derived from [`raw`](Self::raw)
    pub key: NormalizedKey,
    /// Keyword phrases, in document order
    pub keywords: Vec<String>,
}

impl AnnotationRecord {
    pub fn new(raw: impl Into<String>, keywords: Vec<String>) -> Self {
        let raw = raw.into();
        let key = normalize(&raw);
        Self { raw, key, keywords }
    }
}

/// Parse a CLDR annotation document.
///
/// `document` names the source in error messages.
pub fn parse_annotations(document: &str, xml: &str) -> Result<Vec<AnnotationRecord>> {
    let _span = tracing::debug_span!("parse_annotations", document).entered();

    // CLDR files carry a DOCTYPE pointing at ldml.dtd
    let mut options = roxmltree::ParsingOptions::default();
    options.allow_dtd = true;
    let doc = roxmltree::Document::parse_with_options(xml, options).map_err(|source| {
        BuildError::Xml {
            document: document.to_string(),
            source,
        }
    })?;

    let root = doc.root_element();
    if root.tag_name().name() != "ldml" {
        return Err(BuildError::malformed_annotations(
            document,
            format!("root element is <{}>, expected <ldml>", root.tag_name().name()),
        ));
    }

    let container = root
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "annotations")
        .ok_or_else(|| BuildError::malformed_annotations(document, "missing <annotations>"))?;

    let mut records = Vec::new();
    for node in container
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "annotation")
    {
        if node.attribute("type").is_some() {
            continue;
        }

        let cp = node.attribute("cp").ok_or_else(|| {
            BuildError::malformed_annotations(document, "annotation without a cp attribute")
        })?;
        let text = node.text().ok_or_else(|| {
            BuildError::malformed_annotations(
                document,
                format!("annotation for {} has no keyword text", cp),
            )
        })?;

        let keywords = text.split(KEYWORD_SEPARATOR).map(str::to_string).collect();
        records.push(AnnotationRecord::new(cp, keywords));
    }

    tracing::debug!(document, count = records.len(), "parsed annotations");
    Ok(records)
}
