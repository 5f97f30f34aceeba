//! Color type definitions shared across the decoding pipeline.

use crate::error::{Error, Result};

/// PNG color types, with their specification byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorType {
    /// One gray sample per pixel.
    Grayscale = 0,
    /// Red, green, and blue samples per pixel.
    Rgb = 2,
    /// One palette index per pixel; expands to RGB through PLTE.
    Indexed = 3,
    /// Gray plus alpha samples per pixel.
    GrayscaleAlpha = 4,
    /// Red, green, blue, and alpha samples per pixel.
    Rgba = 6,
}

impl ColorType {
    /// Samples stored per pixel in the filtered stream.
    #[inline]
    pub const fn samples_per_pixel(self) -> u8 {
        match self {
            ColorType::Grayscale => 1,
            ColorType::Rgb => 3,
            ColorType::Indexed => 1,
            ColorType::GrayscaleAlpha => 2,
            ColorType::Rgba => 4,
        }
    }

    /// Channels after palette expansion: 3 for indexed, samples otherwise.
    #[inline]
    pub const fn channel_count(self) -> u8 {
        match self {
            ColorType::Indexed => 3,
            other => other.samples_per_pixel(),
        }
    }

    /// Whether the PNG specification allows `bit_depth` for this type.
    #[inline]
    pub const fn allows_bit_depth(self, bit_depth: u8) -> bool {
        match self {
            ColorType::Grayscale => matches!(bit_depth, 1 | 2 | 4 | 8 | 16),
            ColorType::Rgb => matches!(bit_depth, 8 | 16),
            ColorType::Indexed => matches!(bit_depth, 1 | 2 | 4 | 8),
            ColorType::GrayscaleAlpha => matches!(bit_depth, 8 | 16),
            ColorType::Rgba => matches!(bit_depth, 8 | 16),
        }
    }
}

impl TryFrom<u8> for ColorType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(ColorType::Grayscale),
            2 => Ok(ColorType::Rgb),
            3 => Ok(ColorType::Indexed),
            4 => Ok(ColorType::GrayscaleAlpha),
            6 => Ok(ColorType::Rgba),
            other => Err(Error::MalformedIhdr(format!(
                "invalid color type: {other}"
            ))),
        }
    }
}

impl From<ColorType> for u8 {
    fn from(color: ColorType) -> Self {
        color as u8
    }
}
