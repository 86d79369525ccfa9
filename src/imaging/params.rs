//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides what files to create) and the [`backend`](super::backend)
//! (which does the pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing operation logic.
//!
//! - [`Quality`] — JPEG quality (1–100, default 85). Clamped on construction.
//! - [`Rendition`] — one output file and the longer edge it must fit in.
//! - [`RenderParams`] — a source image and every rendition to derive from it.

use std::path::PathBuf;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// One derived output: scale so the longer edge is at most `long_edge`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendition {
    pub output: PathBuf,
    pub long_edge: u32,
}

/// Decode `source` once and write every rendition as a progressive JPEG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderParams {
    pub source: PathBuf,
    pub renditions: Vec<Rendition>,
    pub quality: Quality,
}
