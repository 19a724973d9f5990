use miette::{Diagnostic, SourceSpan};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building the emoji dataset
#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    /// IO error while reading sources or writing the dataset
    #[error("IO error: {0}")]
    #[diagnostic(code(emoji::io))]
    Io(#[from] io::Error),

    /// A remote source could not be retrieved
    #[error("Failed to fetch {url}")]
    #[diagnostic(
        code(emoji::source_unavailable),
        help("Check network access and the source URL in your config")
    )]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client")]
    #[diagnostic(code(emoji::http_client))]
    Client {
        #[source]
        source: reqwest::Error,
    },

    /// The CLDR archive or tree does not contain an expected document
    #[error("No `{suffix}` found in {}", root.display())]
    #[diagnostic(
        code(emoji::source_unavailable),
        help("Make sure the CLDR source points at a full CLDR release (archive or extracted tree)")
    )]
    ArchiveEntryMissing {
        /// Path suffix that was searched for
        suffix: String,
        /// Directory that was searched
        root: PathBuf,
    },

    /// The CLDR archive or tree contains more than one candidate document
    #[error(
        "More than one `{suffix}` at the same depth: {}",
        candidates.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
    )]
    #[diagnostic(
        code(emoji::source_unavailable),
        help("Point the CLDR source at a single release, archive or extracted tree")
    )]
    AmbiguousDocument {
        suffix: String,
        candidates: Vec<PathBuf>,
    },

    /// An annotation document is not well-formed XML
    #[error("Failed to parse XML document {document}")]
    #[diagnostic(code(emoji::parse_error))]
    Xml {
        document: String,
        #[source]
        source: roxmltree::Error,
    },

    /// An annotation document is XML but not shaped like CLDR annotations
    #[error("Malformed annotation document {document}: {message}")]
    #[diagnostic(
        code(emoji::parse_error),
        help("Expected <ldml><annotations><annotation cp=\"…\">…</annotation></annotations></ldml>")
    )]
    MalformedAnnotations { document: String, message: String },

    /// A line of the emoji enumeration does not match the expected shape
    #[error("Malformed emoji enumeration at line {line}: {message}")]
    #[diagnostic(
        code(emoji::parse_error),
        help("Data lines look like `1F600 ; fully-qualified # 😀 E1.0 grinning face`")
    )]
    MalformedEnumeration {
        /// 1-based line number
        line: usize,
        message: String,
        /// The offending line
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },

    /// A hexadecimal code point could not be decoded
    #[error("Invalid code point `{code_point}`")]
    #[diagnostic(code(emoji::parse_error))]
    InvalidCodePoint { code_point: String },

    /// An alias registry entry could not be decoded into a character
    #[error("Malformed alias `{name}` ({url}): {message}")]
    #[diagnostic(code(emoji::parse_error))]
    MalformedAlias {
        name: String,
        url: String,
        message: String,
    },

    /// The alias registry is not a flat JSON object of strings
    #[error("Failed to parse alias registry JSON")]
    #[diagnostic(
        code(emoji::parse_error),
        help("The alias registry must be a JSON object mapping names to image URLs")
    )]
    AliasJson {
        #[source]
        source: serde_json::Error,
    },

    /// Alias-bearing characters did not all reach the output
    #[error("Missing emoji: {aliases} aliased characters but {emitted} emitted")]
    #[diagnostic(code(emoji::integrity))]
    Integrity {
        /// Distinct normalized keys in the alias registry
        aliases: usize,
        /// Records emitted to the dataset
        emitted: usize,
        /// Alias characters that produced no record
        unmatched: Vec<String>,
        #[help]
        advice: String,
    },

    /// Failed to serialize the dataset
    #[error("Failed to serialize dataset")]
    #[diagnostic(code(emoji::serialize))]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

impl BuildError {
    /// Create an enumeration error pointing at the whole offending line
    pub fn malformed_line(line: usize, text: &str, message: impl Into<String>) -> Self {
        Self::MalformedEnumeration {
            line,
            message: message.into(),
            src: text.to_string(),
            span: (0, text.len()).into(),
        }
    }

    /// Create an annotation shape error
    pub fn malformed_annotations(document: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedAnnotations {
            document: document.into(),
            message: message.into(),
        }
    }

    /// Create an alias decoding error
    pub fn malformed_alias(
        name: impl Into<String>,
        url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedAlias {
            name: name.into(),
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an integrity error for the aliased characters that were not emitted
    pub fn integrity(aliases: usize, emitted: usize, unmatched: Vec<String>) -> Self {
        let advice = format!(
            "Every aliased character needs a category entry and an annotation; unmatched: {}",
            unmatched.join(" ")
        );
        Self::Integrity {
            aliases,
            emitted,
            unmatched,
            advice,
        }
    }

    /// Whether this error is the reconciliation integrity failure
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::Integrity { .. })
    }
}

/// Result type for dataset build operations
pub type Result<T> = std::result::Result<T, BuildError>;
