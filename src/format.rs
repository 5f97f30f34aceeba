//! Dispatch over supported image formats.
//!
//! Only PNG is implemented; [`ImageFormat`] exists as the seam where
//! future formats plug in, so callers that do not care about the concrete
//! decoder can hold one value and delegate.

use std::path::Path;

use crate::color::ColorType;
use crate::error::Result;
use crate::png::PngDecoder;

/// A decoded image of any supported format.
#[derive(Debug)]
pub enum ImageFormat {
    /// A decoded PNG image.
    Png(PngDecoder),
}

impl ImageFormat {
    /// Decode an image file, picking the decoder by content.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(ImageFormat::Png(PngDecoder::open(path)?))
    }

    /// Decode an in-memory image, picking the decoder by content.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(ImageFormat::Png(PngDecoder::from_bytes(data)?))
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            ImageFormat::Png(decoder) => decoder.width(),
        }
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        match self {
            ImageFormat::Png(decoder) => decoder.height(),
        }
    }

    /// Bits per sample.
    pub fn bit_depth(&self) -> u8 {
        match self {
            ImageFormat::Png(decoder) => decoder.bit_depth(),
        }
    }

    /// Color type of the decoded data.
    pub fn color_type(&self) -> ColorType {
        match self {
            ImageFormat::Png(decoder) => decoder.color_type(),
        }
    }

    /// Samples stored per pixel in the decoded stream.
    pub fn samples_per_pixel(&self) -> u8 {
        match self {
            ImageFormat::Png(decoder) => decoder.samples_per_pixel(),
        }
    }

    /// Channels after palette expansion.
    pub fn channel_count(&self) -> u8 {
        match self {
            ImageFormat::Png(decoder) => decoder.channel_count(),
        }
    }

    /// Bytes per decoded scanline.
    pub fn scanline_size(&self) -> usize {
        match self {
            ImageFormat::Png(decoder) => decoder.scanline_size(),
        }
    }

    /// Bytes in the whole decoded buffer.
    pub fn scanlines_size(&self) -> usize {
        match self {
            ImageFormat::Png(decoder) => decoder.scanlines_size(),
        }
    }

    /// Bytes per row of the RGB projection.
    pub fn rgb_scanline_size(&self) -> usize {
        match self {
            ImageFormat::Png(decoder) => decoder.rgb_scanline_size(),
        }
    }

    /// Bytes in the whole RGB projection.
    pub fn rgb_scanlines_size(&self) -> usize {
        match self {
            ImageFormat::Png(decoder) => decoder.rgb_scanlines_size(),
        }
    }

    /// Bytes per row of the RGBA projection.
    pub fn rgba_scanline_size(&self) -> usize {
        match self {
            ImageFormat::Png(decoder) => decoder.rgba_scanline_size(),
        }
    }

    /// Bytes in the whole RGBA projection.
    pub fn rgba_scanlines_size(&self) -> usize {
        match self {
            ImageFormat::Png(decoder) => decoder.rgba_scanlines_size(),
        }
    }

    /// Borrowed view of the decoded buffer.
    pub fn raw_data(&self) -> &[u8] {
        match self {
            ImageFormat::Png(decoder) => decoder.raw_data(),
        }
    }

    /// Owned copy of the decoded buffer.
    pub fn raw_data_to_vec(&self) -> Vec<u8> {
        match self {
            ImageFormat::Png(decoder) => decoder.raw_data_to_vec(),
        }
    }

    /// Owned RGB projection (cached by the underlying decoder).
    pub fn rgb_data_to_vec(&mut self) -> Result<Vec<u8>> {
        match self {
            ImageFormat::Png(decoder) => decoder.rgb_data_to_vec(),
        }
    }

    /// Owned RGBA projection (cached by the underlying decoder).
    pub fn rgba_data_to_vec(&mut self) -> Result<Vec<u8>> {
        match self {
            ImageFormat::Png(decoder) => decoder.rgba_data_to_vec(),
        }
    }

    /// Release any cached projections.
    pub fn reset_cache(&mut self) {
        match self {
            ImageFormat::Png(decoder) => decoder.reset_cache(),
        }
    }

    /// Swap sample byte order in place; a no-op below bit depth 16.
    pub fn swap_byte_order(&mut self) {
        match self {
            ImageFormat::Png(decoder) => decoder.swap_byte_order(),
        }
    }
}
