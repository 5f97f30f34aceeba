//! # rawpix
//!
//! A PNG decoding library that turns files into raw pixel buffers.
//!
//! The decoder runs the full pipeline on construction: chunk parsing with
//! CRC-32 validation, streaming zlib inflate of the IDAT payloads, and
//! per-scanline defiltering. Projections onto canonical RGB and RGBA
//! (including palette expansion and sub-byte unpacking) compute lazily and
//! stay cached on the decoder.
//!
//! Conceptual guides live under [`guides`]: the
//! [pipeline walkthrough](guides::png_decoding), the
//! [filter math](guides::filters), and the
//! [projection rules](guides::color_projection).
//!
//! ## Example
//!
//! ```no_run
//! use rawpix::PngDecoder;
//!
//! let mut image = PngDecoder::open("photo.png")?;
//! println!("{}x{} at {} bits", image.width(), image.height(), image.bit_depth());
//! let rgba = image.rgba_data()?; // one opaque alpha per pixel if the file had none
//! # Ok::<(), rawpix::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bytes;
pub mod color;
pub mod crc32;
pub mod error;
pub mod format;
pub mod inflate;
pub mod png;

pub use color::ColorType;
pub use error::{Error, Result};
pub use format::ImageFormat;
pub use png::PngDecoder;

/// Conceptual guides rendered inside rustdoc.
///
/// The markdown files in `docs/` use rustdoc intra-doc links, so they are
/// best read on docs.rs or through `cargo doc --open`.
#[cfg(doc)]
pub mod guides {
    #[doc = include_str!("../docs/png-decoding.md")]
    pub mod png_decoding {}

    #[doc = include_str!("../docs/filters.md")]
    pub mod filters {}

    #[doc = include_str!("../docs/color-projection.md")]
    pub mod color_projection {}
}
