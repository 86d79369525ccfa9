//! Gallery configuration.
//!
//! Both tools work out of the box with no configuration at all. A sparse
//! `photos.toml` in the site root (next to the `photos/` directory) can
//! override the built-in defaults; command-line flags override the file.
//!
//! ```text
//! stock defaults  →  photos.toml  →  CLI flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [images]
//! full_long_edge = 2000     # Longer edge of the web-sized image, in px
//! thumb_long_edge = 600     # Longer edge of the thumbnail, in px
//! quality = 85              # JPEG quality (1-100)
//!
//! [manifest]
//! url_prefix = "/photos"    # Site-relative URL of the photos directory
//! default_tone = "neutral"  # Tone assigned to new records
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the site root when no explicit path is given.
pub const CONFIG_FILENAME: &str = "photos.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings shared by the ingester and the renumberer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Rendition sizes and encoding quality.
    pub images: ImagesConfig,
    /// How records are written to `manifest.json`.
    pub manifest: ManifestConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    pub full_long_edge: u32,
    pub thumb_long_edge: u32,
    pub quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            full_long_edge: 2000,
            thumb_long_edge: 600,
            quality: 85,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Prefix for the `full` and `thumb` URLs, e.g. `/photos/001.jpg`.
    pub url_prefix: String,
    pub default_tone: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            url_prefix: "/photos".to_string(),
            default_tone: "neutral".to_string(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.quality == 0 || self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        if self.images.full_long_edge == 0 || self.images.thumb_long_edge == 0 {
            return Err(ConfigError::Validation(
                "images.full_long_edge and images.thumb_long_edge must be non-zero".into(),
            ));
        }
        if self.manifest.url_prefix.is_empty() {
            return Err(ConfigError::Validation(
                "manifest.url_prefix must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Load config from an explicit file path.
///
/// Missing keys take their stock defaults; unknown keys are rejected.
pub fn load_config_file(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GalleryConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load `photos.toml` from the site root, or stock defaults when absent.
pub fn load_config(site_root: &Path) -> Result<GalleryConfig, ConfigError> {
    let path = site_root.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(GalleryConfig::default());
    }
    load_config_file(&path)
}

/// Resolve the config for a run: an explicit `--config` path wins, otherwise
/// the site root is searched.
pub fn resolve_config(
    explicit: Option<&Path>,
    site_root: &Path,
) -> Result<GalleryConfig, ConfigError> {
    match explicit {
        Some(path) => load_config_file(path),
        None => load_config(site_root),
    }
}

/// Returns a fully-commented stock `photos.toml` with all keys and explanations.
pub fn stock_config_toml() -> &'static str {
    r##"# photoshelf configuration
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

[images]
# Longer edge of the web-sized image (NNN.jpg), in pixels.
# Sources already at or below this size are not scaled.
full_long_edge = 2000
# Longer edge of the thumbnail (NNN-thumb.jpg), in pixels.
thumb_long_edge = 600
# JPEG quality, 1-100. Output is always progressive and optimized.
quality = 85

[manifest]
# Site-relative URL of the photos directory, used for `full` and `thumb`.
url_prefix = "/photos"
# Tone given to records that have no recovered tone.
default_tone = "neutral"
"##
}
