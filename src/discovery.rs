//! Finding files: ingest inputs, numbered outputs, and full/thumbnail pairs.
//!
//! All listings are returned in a deterministic order so that runs are
//! reproducible regardless of the order the filesystem yields entries.

use crate::naming;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source extensions the ingester accepts (matched case-insensitively).
///
/// HEIC and RAW formats need codecs this crate does not link and are left out.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "tif", "tiff", "webp"];

/// Whether the path has one of [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|ext| e.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Images denoted by `input`.
///
/// A file yields itself if supported (else nothing); a directory is walked
/// recursively. Results are sorted by lower-cased full path. An empty result
/// is not an error.
pub fn find_images(input: &Path) -> Vec<PathBuf> {
    if input.is_file() {
        return if is_supported_image(input) {
            vec![input.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    let mut images: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_supported_image(p))
        .collect();

    images.sort_by_cached_key(|p| p.to_string_lossy().to_lowercase());
    images
}

/// Names of the regular files directly inside `dir`.
pub fn list_file_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Next free index in `dir`, from a fresh listing.
pub fn next_index_in(dir: &Path) -> io::Result<u32> {
    Ok(naming::next_index(list_file_names(dir)?))
}

/// A full-size image and its thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub full: PathBuf,
    pub thumb: PathBuf,
}

impl ImagePair {
    /// File name of the full-size image.
    pub fn full_name(&self) -> String {
        file_name(&self.full)
    }

    pub fn thumb_name(&self) -> String {
        file_name(&self.thumb)
    }

    /// Full-size file stem (`"005"` for `005.jpg`).
    pub fn stem(&self) -> String {
        self.full
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Pair every full-size JPEG in `photos_dir` with its `-thumb.jpg`.
///
/// Full-size files without a thumbnail and thumbnails without a full-size
/// file are left out. Pairs are returned sorted by lower-cased full name.
pub fn find_pairs(photos_dir: &Path) -> io::Result<Vec<ImagePair>> {
    let names = list_file_names(photos_dir)?;

    let thumbs: HashMap<String, &String> = names
        .iter()
        .filter(|n| naming::is_thumb_name(n))
        .map(|n| (n.to_lowercase(), n))
        .collect();

    let mut pairs: Vec<ImagePair> = names
        .iter()
        .filter(|n| naming::is_jpeg_name(n) && !naming::is_thumb_name(n))
        .filter_map(|full| {
            let wanted = naming::thumb_name_for(full).to_lowercase();
            thumbs.get(&wanted).map(|thumb| ImagePair {
                full: photos_dir.join(full),
                thumb: photos_dir.join(thumb),
            })
        })
        .collect();

    pairs.sort_by_cached_key(|p| p.full_name().to_lowercase());
    Ok(pairs)
}
