use super::{FeedSource, Location};
use crate::annotations::{AnnotationRecord, parse_annotations};
use crate::error::{BuildError, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The CLDR release providing keyword annotations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CldrSource {
    /// Release archive (`.tar.gz`) or an extracted CLDR tree
    pub location: Location,
    /// Annotation locale, e.g. `en`
    pub locale: String,
}

/// Both annotation documents of one CLDR locale
#[derive(Debug, Clone, Default)]
pub struct CldrAnnotations {
    pub annotations: Vec<AnnotationRecord>,
    pub derived: Vec<AnnotationRecord>,
}

impl CldrSource {
    fn annotations_suffix(&self) -> PathBuf {
        Path::new("common/annotations").join(format!("{}.xml", self.locale))
    }

    fn derived_suffix(&self) -> PathBuf {
        Path::new("common/annotationsDerived").join(format!("{}.xml", self.locale))
    }

    /// Parse both documents out of an extracted CLDR tree
    pub async fn load_tree(&self, root: &Path) -> Result<CldrAnnotations> {
        let annotations_path = find_document(root, &self.annotations_suffix())?;
        let derived_path = find_document(root, &self.derived_suffix())?;

        let annotations_xml = tokio::fs::read_to_string(&annotations_path).await?;
        let derived_xml = tokio::fs::read_to_string(&derived_path).await?;

        Ok(CldrAnnotations {
            annotations: parse_annotations(
                &self.annotations_suffix().display().to_string(),
                &annotations_xml,
            )?,
            derived: parse_annotations(&self.derived_suffix().display().to_string(), &derived_xml)?,
        })
    }
}

impl FeedSource for CldrSource {
    type Output = CldrAnnotations;

    #[tracing::instrument(name = "fetch_cldr", level = "debug", skip_all, fields(location = %self.location))]
    async fn fetch(&self, client: &reqwest::Client) -> Result<CldrAnnotations> {
        if let Location::Local(path) = &self.location {
            if path.is_dir() {
                return self.load_tree(path).await;
            }
        }

        let archive = self.location.read_bytes(client).await?;
        tracing::debug!(bytes = archive.len(), "downloaded CLDR archive");

        // Removed on drop, whether or not parsing succeeds
        let work_dir = TempDir::new()?;
        unpack(archive, work_dir.path().to_path_buf()).await?;
        let loaded = self.load_tree(work_dir.path()).await?;

        tracing::info!(
            annotations = loaded.annotations.len(),
            derived = loaded.derived.len(),
            "loaded CLDR annotations"
        );
        Ok(loaded)
    }
}

/// Gunzip and untar `archive` into `dest`
async fn unpack(archive: Vec<u8>, dest: PathBuf) -> Result<()> {
    tokio::task::spawn_blocking(move || {
        let decoder = flate2::read::GzDecoder::new(archive.as_slice());
        tar::Archive::new(decoder).unpack(&dest)
    })
    .await
    .map_err(std::io::Error::other)??;
    Ok(())
}

/// Deepest a document can sit below the search root: `<release>/common/<dir>/<locale>.xml`.
const MAX_DOCUMENT_DEPTH: usize = 4;

/// Locate the file under `root` whose path ends with `suffix`.
///
/// `root` is either an extracted release (`common/…` directly below it) or a
/// directory holding one versioned top-level release directory
/// (`cldr-release-44/common/…`), as unpacked from an archive. Copies nested
/// deeper, such as test data under `tools/`, are never considered. The
/// shallowest match wins; two matches at that depth are an error.
fn find_document(root: &Path, suffix: &Path) -> Result<PathBuf> {
    let mut matches: Vec<(usize, PathBuf)> = walkdir::WalkDir::new(root)
        .follow_links(true)
        .max_depth(MAX_DOCUMENT_DEPTH)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.path().ends_with(suffix))
        .map(|e| (e.depth(), e.into_path()))
        .collect();
    matches.sort();

    let mut shallowest = matches.into_iter();
    match (shallowest.next(), shallowest.next()) {
        (None, _) => Err(BuildError::ArchiveEntryMissing {
            suffix: suffix.display().to_string(),
            root: root.to_path_buf(),
        }),
        (Some((depth, first)), Some((next_depth, second))) if depth == next_depth => {
            Err(BuildError::AmbiguousDocument {
                suffix: suffix.display().to_string(),
                candidates: vec![first, second],
            })
        }
        (Some((_, path)), _) => Ok(path),
    }
}
