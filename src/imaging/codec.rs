//! Image decode, resize, and JPEG encode — pure Rust, zero external
//! dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP, GIF) | `image` crate (pure Rust decoders) |
//! | Flatten alpha/palette | `DynamicImage::to_rgb8` |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//!
//! The [`ImageCodec`] trait is the seam between the pipeline (which decides
//! what to derive and where the bytes go) and the pixel work. Codecs never
//! touch the output filesystem — they return encoded bytes, and the caller
//! writes them. The production implementation is [`JpegCodec`]; tests use a
//! recording mock.

use super::calculations::scale_to_width;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("image has zero width")]
    ZeroWidth,
    #[error("JPEG encode failed: {0}")]
    Encode(String),
}

/// Quality setting for JPEG encoding (1-100). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// One derived tier: a width cap and the JPEG quality to encode at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSpec {
    pub max_width: u32,
    pub quality: Quality,
}

/// Both tiers derived from a single source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeriveSpec {
    pub resized: TierSpec,
    pub thumb: TierSpec,
}

/// An encoded derived image, held in memory until the caller writes it.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// The two derived encodings produced per source image.
#[derive(Debug, Clone)]
pub struct DerivedTiers {
    pub resized: Encoded,
    pub thumb: Encoded,
}

/// Trait for image codecs.
///
/// A single call decodes the source once and produces both derived JPEG
/// encodings, so the pipeline stays backend-agnostic and tests can swap in
/// a mock that never decodes pixels.
pub trait ImageCodec: Sync {
    /// Decode `source` and produce the resized and thumbnail encodings.
    fn derive(&self, source: &Path, spec: &DeriveSpec) -> Result<DerivedTiers, CodecError>;
}

/// Pure Rust codec using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct JpegCodec;

impl JpegCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image, flattening to plain RGB8.
///
/// JPEG has no alpha channel, so RGBA/palette/grayscale-alpha inputs are
/// converted before any encode.
fn load_rgb(path: &Path) -> Result<DynamicImage, CodecError> {
    let img = ImageReader::open(path)?
        .decode()
        .map_err(|e| CodecError::Decode(e.to_string()))?;
    Ok(match img {
        DynamicImage::ImageRgb8(_) => img,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    })
}

/// Resize to a tier's width cap (never upscaling) and encode as JPEG.
fn encode_tier(img: &DynamicImage, tier: &TierSpec) -> Result<Encoded, CodecError> {
    let (w, h) = (img.width(), img.height());
    let (out_w, out_h) = scale_to_width((w, h), tier.max_width);

    let resized;
    let out: &DynamicImage = if (out_w, out_h) == (w, h) {
        // Under the cap — pass through unresized, but still re-encode
        img
    } else {
        resized = img.resize_exact(out_w, out_h, FilterType::Lanczos3);
        &resized
    };

    let mut bytes = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
        Cursor::new(&mut bytes),
        tier.quality.value(),
    );
    out.write_with_encoder(encoder)
        .map_err(|e| CodecError::Encode(e.to_string()))?;

    Ok(Encoded {
        bytes,
        width: out_w,
        height: out_h,
    })
}

impl ImageCodec for JpegCodec {
    fn derive(&self, source: &Path, spec: &DeriveSpec) -> Result<DerivedTiers, CodecError> {
        let img = load_rgb(source)?;
        if img.width() == 0 {
            return Err(CodecError::ZeroWidth);
        }
        Ok(DerivedTiers {
            resized: encode_tier(&img, &spec.resized)?,
            thumb: encode_tier(&img, &spec.thumb)?,
        })
    }
}
