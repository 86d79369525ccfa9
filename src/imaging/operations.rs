//! High-level image operations.
//!
//! These functions combine naming and configuration with backend execution:
//! they decide which files to write for an id, then hand the work to an
//! [`ImageBackend`].

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{Quality, RenderParams, Rendition};
use crate::config::ImagesConfig;
use crate::naming;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Sizes and quality for the full/thumbnail pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairConfig {
    pub full_long_edge: u32,
    pub thumb_long_edge: u32,
    pub quality: Quality,
}

impl PairConfig {
    pub fn from_images_config(config: &ImagesConfig) -> Self {
        Self {
            full_long_edge: config.full_long_edge,
            thumb_long_edge: config.thumb_long_edge,
            quality: Quality::new(config.quality),
        }
    }
}

impl Default for PairConfig {
    fn default() -> Self {
        Self::from_images_config(&ImagesConfig::default())
    }
}

/// Files written for one ingested image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPair {
    pub full: PathBuf,
    pub thumb: PathBuf,
    pub full_dimensions: Dimensions,
    pub thumb_dimensions: Dimensions,
}

/// Plan the full/thumbnail renditions for `id` without executing them.
pub fn plan_pair(source: &Path, output_dir: &Path, id: &str, config: &PairConfig) -> RenderParams {
    RenderParams {
        source: source.to_path_buf(),
        renditions: vec![
            Rendition {
                output: output_dir.join(naming::full_filename(id)),
                long_edge: config.full_long_edge,
            },
            Rendition {
                output: output_dir.join(naming::thumb_filename(id)),
                long_edge: config.thumb_long_edge,
            },
        ],
        quality: config.quality,
    }
}

/// Write `NNN.jpg` and `NNN-thumb.jpg` for one source image.
///
/// On failure, outputs this call created are removed so a skipped source
/// leaves no half pair behind. Files that were already there (an unpaired
/// `NNN-thumb.jpg`, say) are left alone.
pub fn create_pair(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    id: &str,
    config: &PairConfig,
) -> Result<GeneratedPair> {
    let params = plan_pair(source, output_dir, id, config);
    let fresh: Vec<&Path> = params
        .renditions
        .iter()
        .map(|r| r.output.as_path())
        .filter(|p| !p.exists())
        .collect();

    let dims = match backend.render(&params) {
        Ok(dims) => dims,
        Err(e) => {
            for path in fresh {
                let _ = std::fs::remove_file(path);
            }
            return Err(e);
        }
    };

    match (params.renditions.as_slice(), dims.as_slice()) {
        ([full, thumb], [full_dimensions, thumb_dimensions]) => Ok(GeneratedPair {
            full: full.output.clone(),
            thumb: thumb.output.clone(),
            full_dimensions: *full_dimensions,
            thumb_dimensions: *thumb_dimensions,
        }),
        _ => Err(BackendError::ProcessingFailed(format!(
            "expected 2 renditions, backend wrote {}",
            dims.len()
        ))),
    }
}
