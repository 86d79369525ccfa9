//! Content fingerprints and caption recovery across renames.
//!
//! Renumbering changes every filename, so the only stable identity a photo
//! has is its bytes. Before any rename, the previous manifest is walked and
//! each referenced full-size file is hashed; the resulting
//! `hash → {alt, tone}` index is consulted when the manifest is rebuilt.
//!
//! Fingerprints are SHA-256 hex digests and are never persisted. Everything
//! here is best-effort: an unreadable manifest, a record pointing at a file
//! that no longer exists, or a file that cannot be read simply contributes
//! nothing to the index.

use crate::manifest::Manifest;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// SHA-256 hash of a file's contents, returned as a hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Hand-edited metadata carried over from a previous manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorMetadata {
    pub alt: String,
    pub tone: String,
}

/// Lookup from content hash to the metadata last recorded for that content.
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    by_hash: HashMap<String, PriorMetadata>,
}

impl MetadataIndex {
    /// Index every record of `manifest` whose full-size file can still be found.
    ///
    /// When two records point at identical content, the later one wins.
    pub fn from_manifest(manifest: &Manifest, photos_dir: &Path, site_root: &Path) -> Self {
        let mut by_hash = HashMap::new();
        for record in &manifest.images {
            let Some(path) = resolve_record_path(&record.full, photos_dir, site_root) else {
                log::debug!("No file on disk for manifest entry {:?}", record.full);
                continue;
            };
            match hash_file(&path) {
                Ok(hash) => {
                    by_hash.insert(
                        hash,
                        PriorMetadata {
                            alt: record.alt.clone(),
                            tone: record.tone.clone(),
                        },
                    );
                }
                Err(e) => log::debug!("Could not hash {}: {}", path.display(), e),
            }
        }
        Self { by_hash }
    }

    pub fn get(&self, hash: &str) -> Option<&PriorMetadata> {
        self.by_hash.get(hash)
    }

    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }
}

/// Map a manifest `full` value back to a file on disk.
///
/// Accepted forms, tried in order:
/// - site-absolute (`/photos/001.jpg`) → `<site_root>/photos/001.jpg`
/// - relative (`001.jpg`, `sub/001.jpg`) → `<photos_dir>/<value>`
/// - anything else → `<photos_dir>/<file name>`
pub fn resolve_record_path(full: &str, photos_dir: &Path, site_root: &Path) -> Option<PathBuf> {
    if full.is_empty() {
        return None;
    }
    let primary = match full.strip_prefix('/') {
        Some(rel) => site_root.join(rel),
        None => photos_dir.join(full),
    };
    if primary.is_file() {
        return Some(primary);
    }
    let fallback = photos_dir.join(Path::new(full).file_name()?);
    fallback.is_file().then_some(fallback)
}
