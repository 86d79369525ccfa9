//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the single seam between the ingest workflow
//! and pixel work. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use a recording
//! mock so the ingest logic can be exercised without encoding anything.

use super::params::RenderParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Decode the source, apply its orientation, and write every rendition.
    ///
    /// Returns the dimensions actually written, one per rendition, in order.
    fn render(&self, params: &RenderParams) -> Result<Vec<Dimensions>, BackendError>;
}
