//! Image processing — pure Rust, zero external dependencies.
//!
//! The module is split into:
//! - **Calculations**: pure width-cap arithmetic (unit testable)
//! - **Codec**: [`ImageCodec`] trait + [`JpegCodec`] (decode, flatten to RGB,
//!   Lanczos3 resize, JPEG encode — in memory, no filesystem writes)

mod calculations;
pub mod codec;

pub use calculations::{fits_within, scale_to_width};
pub use codec::{
    CodecError, DeriveSpec, DerivedTiers, Encoded, ImageCodec, JpegCodec, Quality, TierSpec,
};
