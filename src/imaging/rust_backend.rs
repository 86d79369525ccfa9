//! Production backend: `image` for decoding and resampling, `mozjpeg` for output.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | EXIF orientation | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → JPEG | `mozjpeg` (progressive, optimized Huffman tables) |
//!
//! Output never carries the source's EXIF/ICC/XMP blocks: only decoded
//! pixels reach the encoder.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::fit_long_edge;
use super::params::{Quality, RenderParams};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageDecoder, ImageReader};
use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image, rotated/flipped to its intended display orientation.
fn load_oriented(path: &Path) -> Result<DynamicImage, BackendError> {
    let decode_err = |e: image::ImageError| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    };

    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()
        .map_err(decode_err)?;
    let orientation = decoder.orientation().map_err(decode_err)?;
    let mut img = DynamicImage::from_decoder(decoder).map_err(decode_err)?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Pixel buffer ready for libjpeg: 8-bit grayscale or 8-bit RGB.
struct EncodableBuffer {
    color_space: mozjpeg::ColorSpace,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Reduce any decoded color type to 8 bits per channel.
///
/// Pure grayscale stays grayscale; everything else, including alpha and
/// 16-bit variants, becomes RGB8 (alpha is dropped).
fn to_encodable(img: &DynamicImage) -> EncodableBuffer {
    match img.color() {
        ColorType::L8 | ColorType::L16 => {
            let gray = img.to_luma8();
            EncodableBuffer {
                color_space: mozjpeg::ColorSpace::JCS_GRAYSCALE,
                width: gray.width(),
                height: gray.height(),
                pixels: gray.into_raw(),
            }
        }
        _ => {
            let rgb = img.to_rgb8();
            EncodableBuffer {
                color_space: mozjpeg::ColorSpace::JCS_RGB,
                width: rgb.width(),
                height: rgb.height(),
                pixels: rgb.into_raw(),
            }
        }
    }
}

/// Encode as a progressive, Huffman-optimized JPEG and write it to `path`.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let buffer = to_encodable(img);
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);

    // libjpeg reports fatal errors by unwinding through mozjpeg.
    let encoded = std::panic::catch_unwind(std::panic::AssertUnwindSafe(
        || -> std::io::Result<()> {
            let mut compress = mozjpeg::Compress::new(buffer.color_space);
            compress.set_size(buffer.width as usize, buffer.height as usize);
            compress.set_quality(quality.value() as f32);
            compress.set_progressive_mode();
            compress.set_optimize_coding(true);

            let mut started = compress.start_compress(writer)?;
            started.write_scanlines(&buffer.pixels)?;
            let mut writer = started.finish()?;
            writer.flush()
        },
    ));

    match encoded {
        Ok(result) => result.map_err(BackendError::Io),
        Err(_) => Err(BackendError::ProcessingFailed(format!(
            "JPEG encode failed for {}",
            path.display()
        ))),
    }
}

impl ImageBackend for RustBackend {
    fn render(&self, params: &RenderParams) -> Result<Vec<Dimensions>, BackendError> {
        let img = load_oriented(&params.source)?;
        log::debug!(
            "Decoded {} ({}x{})",
            params.source.display(),
            img.width(),
            img.height()
        );

        let mut written = Vec::with_capacity(params.renditions.len());
        for rendition in &params.renditions {
            let (width, height) = fit_long_edge((img.width(), img.height()), rendition.long_edge);
            let scaled = if (width, height) == (img.width(), img.height()) {
                Cow::Borrowed(&img)
            } else {
                Cow::Owned(img.resize_exact(width, height, FilterType::Lanczos3))
            };
            save_jpeg(&scaled, &rendition.output, params.quality)?;
            log::debug!(
                "Wrote {} ({}x{})",
                rendition.output.display(),
                width,
                height
            );
            written.push(Dimensions { width, height });
        }
        Ok(written)
    }
}
