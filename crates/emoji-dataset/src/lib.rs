//! # Emoji dataset reconciliation
//!
//! Builds a single emoji list for search and autocomplete out of three
//! independently keyed sources:
//!
//! - CLDR annotations: keywords per character, plus skin-tone variants
//! - the Unicode `emoji-test.txt` enumeration: group/subgroup taxonomy
//! - GitHub's emoji registry: short names
//!
//! ## Usage
//!
//! The `emoji-fetch` binary downloads every source, reconciles them and
//! writes `out.json`:
//!
//! ```bash
//! cargo run -p emoji-dataset --bin emoji-fetch -- --pretty
//! ```
//!
//! Sources can be pointed at local files with an `emoji.kdl` config.
//!
//! ## Modules
//!
//! - [`normalize`] - Character identity used as the join key
//! - [`annotations`] - CLDR annotation documents
//! - [`categories`] - The emoji enumeration and its taxonomy
//! - [`aliases`] - GitHub short names
//! - [`keywords`] - Keyword tokenizing and filtering
//! - [`reconcile`] - Joining the feeds and folding skin-tone variants
//! - [`dataset`] - Output records, integrity check and serialization
//! - [`fetch`] - Retrieving the feeds from HTTP or local files

pub mod aliases;
pub mod annotations;
pub mod categories;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod keywords;
pub mod normalize;
pub mod reconcile;

pub use dataset::{Dataset, OutputEmoji};
pub use error::{BuildError, Result};
pub use normalize::{NormalizedKey, normalize};
