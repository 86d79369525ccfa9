//! # Photoshelf
//!
//! Two small tools for keeping the photo section of a static site in shape.
//! The site's `photos/` directory holds numbered JPEG pairs and a JSON
//! manifest the page reads:
//!
//! ```text
//! site/
//! └── photos/
//!     ├── manifest.json        {"images": [{id, thumb, full, alt, tone}, ...]}
//!     ├── 001.jpg              web-sized, 2000px long edge
//!     ├── 001-thumb.jpg        thumbnail, 600px long edge
//!     ├── 002.jpg
//!     └── 002-thumb.jpg
//! ```
//!
//! - **Ingest** ([`ingest`]): turn arbitrary source images into the next free
//!   numbered pairs and append manifest records for them.
//! - **Renumber** ([`renumber`]): close gaps and reorder the pairs into a
//!   contiguous run, then rebuild the manifest, carrying captions over by
//!   image content.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`ingest`] | Ingest workflow: discover, encode, number, append |
//! | [`renumber`] | Renumber workflow: pair, plan, two-phase rename, rebuild |
//! | [`imaging`] | Decode, orient, resize and encode JPEG renditions |
//! | [`discovery`] | Finding source images and existing pairs on disk |
//! | [`naming`] | `NNN.jpg` / `NNN-thumb.jpg` convention and caption synthesis |
//! | [`manifest`] | `manifest.json` model, tolerant load, backup |
//! | [`fingerprint`] | Content hashes and hash-keyed caption recovery |
//! | [`config`] | Optional `photos.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Directory Is the Truth
//!
//! Numbering is derived from the files in `photos/`, never from the
//! manifest. A manifest that drifted (hand edits, a crashed run) cannot make
//! the tools overwrite an existing image.
//!
//! ## Metadata Follows Content
//!
//! Renumbering changes every file name, so captions cannot be matched by
//! name. They are matched by a hash of the full-size file's bytes, which the
//! rename does not change.
//!
//! ## Pure-Rust Decoding, mozjpeg Encoding
//!
//! Sources are decoded and resampled with the `image` crate. Output goes
//! through `mozjpeg` so every JPEG is progressive with optimized Huffman
//! tables.

pub mod config;
pub mod discovery;
pub mod fingerprint;
pub mod imaging;
pub mod ingest;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod renumber;

#[cfg(test)]
pub(crate) mod test_helpers;

const GIT_HASH: &str = env!("PHOTOSHELF_GIT_HASH");
const DEV_VERSION: &str = concat!("dev@", env!("PHOTOSHELF_GIT_HASH"));

/// `--version` text for both binaries. Release-tag builds report the crate
/// version; everything else reports the commit it was built from.
pub fn version_string() -> &'static str {
    match (env!("PHOTOSHELF_ON_RELEASE_TAG"), GIT_HASH) {
        ("true", _) => env!("CARGO_PKG_VERSION"),
        (_, "") => "dev@unknown",
        _ => DEV_VERSION,
    }
}
