//! Image processing — decoding and resampling in pure Rust, JPEG output via mozjpeg.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Orient** | `image` decoder EXIF orientation |
//! | **Resize** | Lanczos3, longer edge fitted to a target |
//! | **Encode** | `mozjpeg`, progressive + optimized |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining naming + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::fit_long_edge;
pub use operations::{GeneratedPair, PairConfig, create_pair, plan_pair};
pub use params::{Quality, RenderParams, Rendition};
pub use rust_backend::RustBackend;
