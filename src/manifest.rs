//! The `manifest.json` document shared by both tools.
//!
//! ```json
//! {
//!   "images": [
//!     {
//!       "id": "001",
//!       "thumb": "/photos/001-thumb.jpg",
//!       "full": "/photos/001.jpg",
//!       "alt": "Sunset over the bay",
//!       "tone": "neutral"
//!     }
//!   ]
//! }
//! ```
//!
//! Record order is display order. The file is always rewritten whole, with
//! 2-space indentation and a fixed key order so hand edits diff cleanly.
//!
//! Loading is tolerant: a missing manifest and a corrupt one both come back
//! as [`Manifest::default`]. Keys this crate does not know about (top-level
//! or per record) are kept and written back unchanged.

use crate::naming;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the manifest inside the photos directory.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Name of the copy taken before the renumberer overwrites the manifest.
pub const BACKUP_FILENAME: &str = "manifest.json.bak";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub images: Vec<ImageRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One published photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub full: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_tone() -> String {
    "neutral".to_string()
}

impl ImageRecord {
    /// Build a record for id `NNN`, pointing at `<url_prefix>/NNN.jpg` and
    /// `<url_prefix>/NNN-thumb.jpg`.
    pub fn new(id: &str, url_prefix: &str, alt: String, tone: String) -> Self {
        Self {
            id: id.to_string(),
            thumb: site_url(url_prefix, &naming::thumb_filename(id)),
            full: site_url(url_prefix, &naming::full_filename(id)),
            alt,
            tone,
            extra: Map::new(),
        }
    }
}

/// Join a URL prefix and a filename: `("/photos/", "001.jpg")` → `"/photos/001.jpg"`.
pub fn site_url(url_prefix: &str, filename: &str) -> String {
    format!("{}/{}", url_prefix.trim_end_matches('/'), filename)
}

impl Manifest {
    /// Read a manifest strictly.
    ///
    /// `Ok(None)` when the file does not exist, `Err` when it exists but
    /// cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Option<Self>, ManifestError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Load a manifest, falling back to an empty one.
    ///
    /// Absent and corrupt files are treated the same; corruption is logged.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(Some(manifest)) => manifest,
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable manifest {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the whole manifest to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

/// Copy an existing manifest to its sibling `manifest.json.bak`.
///
/// Returns the backup path, or `None` when there was nothing to back up.
pub fn backup(manifest_path: &Path) -> io::Result<Option<PathBuf>> {
    if !manifest_path.is_file() {
        return Ok(None);
    }
    let backup_path = manifest_path.with_file_name(BACKUP_FILENAME);
    std::fs::copy(manifest_path, &backup_path)?;
    Ok(Some(backup_path))
}
