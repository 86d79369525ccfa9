//! Ingesting new photos into a site.
//!
//! ```text
//! input/                     site/
//! ├── sunset_over-the_bay.jpg    └── photos/
//! └── trip/                          ├── manifest.json   (+2 records)
//!     └── IMG_0042.png               ├── 004.jpg         2000px long edge
//!                                    ├── 004-thumb.jpg    600px long edge
//!                                    ├── 005.jpg
//!                                    └── 005-thumb.jpg
//! ```
//!
//! Sources are processed in discovery order. Numbering continues from the
//! highest `NNN.jpg` already in `photos/`, regardless of what the manifest
//! says. A source that cannot be decoded is skipped and does not consume a
//! number.
//!
//! The manifest is written once, after the whole batch. An interrupted run
//! may leave image files behind, but never a manifest that references files
//! which were not written.

use crate::config::GalleryConfig;
use crate::discovery::{self, SUPPORTED_EXTENSIONS};
use crate::imaging::{Dimensions, ImageBackend, PairConfig, RustBackend, create_pair};
use crate::manifest::{ImageRecord, MANIFEST_FILENAME, Manifest, ManifestError};
use crate::naming;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Subdirectory of the site root holding published photos.
pub const PHOTOS_DIR: &str = "photos";

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Project path not found: {0}")]
    ProjectNotFound(PathBuf),
    #[error("No images found. Supported: {}", supported_list())]
    NoImages(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

fn supported_list() -> String {
    SUPPORTED_EXTENSIONS
        .iter()
        .map(|e| format!(".{e}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// What to ingest and where.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Image file or directory to ingest.
    pub input: PathBuf,
    /// Site root; `photos/` is created under it if needed.
    pub project: PathBuf,
    /// Prepended to every synthesized caption in this run.
    pub alt_prefix: Option<String>,
    pub config: GalleryConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddedImage {
    pub source: PathBuf,
    pub id: String,
    pub alt: String,
    pub full_dimensions: Dimensions,
    pub thumb_dimensions: Dimensions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedImage {
    pub source: PathBuf,
    pub reason: String,
}

/// Outcome of one ingest run.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub photos_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub added: Vec<AddedImage>,
    pub skipped: Vec<SkippedImage>,
}

/// Ingest with the production image backend.
pub fn ingest(options: &IngestOptions) -> Result<IngestReport, IngestError> {
    ingest_with_backend(&RustBackend::new(), options)
}

/// Ingest using a specific backend (allows testing with mock).
pub fn ingest_with_backend(
    backend: &impl ImageBackend,
    options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
    if !options.project.exists() {
        return Err(IngestError::ProjectNotFound(options.project.clone()));
    }

    let photos_dir = options.project.join(PHOTOS_DIR);
    std::fs::create_dir_all(&photos_dir)?;
    let manifest_path = photos_dir.join(MANIFEST_FILENAME);
    let mut manifest = Manifest::load(&manifest_path);

    let sources = discovery::find_images(&options.input);
    if sources.is_empty() {
        return Err(IngestError::NoImages(options.input.clone()));
    }
    log::info!("Found {} image(s) in {}", sources.len(), options.input.display());

    let pair_config = PairConfig::from_images_config(&options.config.images);
    let mut index = discovery::next_index_in(&photos_dir)?;
    let mut added = Vec::new();
    let mut skipped = Vec::new();

    for source in &sources {
        let id = naming::format_id(index);
        if index > naming::MAX_INDEX {
            log::warn!(
                "Index {} exceeds {}; later runs will not see {}",
                id,
                naming::MAX_INDEX,
                naming::full_filename(&id)
            );
        }

        let pair = match create_pair(backend, source, &photos_dir, &id, &pair_config) {
            Ok(pair) => pair,
            Err(e) => {
                skipped.push(SkippedImage {
                    source: source.clone(),
                    reason: format!("Skip {}: {}", display_name(source), e),
                });
                continue;
            }
        };

        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let alt = naming::caption_with_prefix(&stem, options.alt_prefix.as_deref());

        manifest.images.push(ImageRecord::new(
            &id,
            &options.config.manifest.url_prefix,
            alt.clone(),
            options.config.manifest.default_tone.clone(),
        ));
        added.push(AddedImage {
            source: source.clone(),
            id,
            alt,
            full_dimensions: pair.full_dimensions,
            thumb_dimensions: pair.thumb_dimensions,
        });
        index += 1;
    }

    manifest.save(&manifest_path)?;

    Ok(IngestReport {
        photos_dir,
        manifest_path,
        added,
        skipped,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
