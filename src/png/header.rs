//! IHDR parsing, validation, and derived scanline geometry.

use crate::bytes::ByteCursor;
use crate::color::ColorType;
use crate::error::{Error, Result};

/// Fixed size of the IHDR payload.
pub const IHDR_LENGTH: usize = 13;

/// Parsed and validated image header with its derived geometry.
///
/// All sizes are computed once at parse time in 64-bit arithmetic; images
/// whose filtered stream would not fit 32-bit addressing are rejected.
#[derive(Debug, Clone)]
pub struct Ihdr {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Bits per sample: 1, 2, 4, 8, or 16.
    pub bit_depth: u8,
    /// Color type of the pixel data.
    pub color_type: ColorType,
    /// Byte distance between corresponding bytes of adjacent pixels.
    pub stride: usize,
    /// Bytes per defiltered scanline.
    pub scanline_size: usize,
    /// Bytes in the whole defiltered buffer.
    pub scanlines_size: usize,
}

impl Ihdr {
    /// Parse the 13-byte IHDR payload and validate every field.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() != IHDR_LENGTH {
            return Err(Error::MalformedIhdr(format!(
                "expected {IHDR_LENGTH} bytes, got {}",
                data.len()
            )));
        }

        let mut cursor = ByteCursor::new(data);
        let width = cursor.read_u32_be()?;
        let height = cursor.read_u32_be()?;
        let bit_depth = cursor.read_u8()?;
        let color_type_byte = cursor.read_u8()?;
        let compression_method = cursor.read_u8()?;
        let filter_method = cursor.read_u8()?;
        let interlace_method = cursor.read_u8()?;

        if width == 0 || height == 0 {
            return Err(Error::MalformedIhdr(format!(
                "zero dimension: {width}x{height}"
            )));
        }

        let color_type = ColorType::try_from(color_type_byte)?;
        if !color_type.allows_bit_depth(bit_depth) {
            return Err(Error::UnsupportedCombination {
                color_type: color_type_byte,
                bit_depth,
            });
        }

        if compression_method != 0 {
            return Err(Error::MalformedIhdr(format!(
                "compression method {compression_method} is not 0"
            )));
        }
        if filter_method != 0 {
            return Err(Error::MalformedIhdr(format!(
                "filter method {filter_method} is not 0"
            )));
        }
        match interlace_method {
            0 => {}
            1 => return Err(Error::UnsupportedInterlace),
            other => {
                return Err(Error::MalformedIhdr(format!(
                    "interlace method {other} is not 0"
                )))
            }
        }

        let samples = color_type.samples_per_pixel() as u64;
        let bits_per_pixel = bit_depth as u64 * samples;
        let stride = (bits_per_pixel.div_ceil(8)).max(1) as usize;
        let scanline_size = (width as u64 * bits_per_pixel).div_ceil(8);
        let scanlines_size = scanline_size * height as u64;

        // The filtered stream adds one filter byte per row; the whole of it
        // must stay addressable with 32 bits.
        let filtered_size = scanlines_size + height as u64;
        if filtered_size > u32::MAX as u64 {
            return Err(Error::TooLarge {
                required: filtered_size,
            });
        }

        Ok(Self {
            width,
            height,
            bit_depth,
            color_type,
            stride,
            scanline_size: scanline_size as usize,
            scanlines_size: scanlines_size as usize,
        })
    }

    /// Samples stored per pixel in the filtered stream.
    #[inline]
    pub fn samples_per_pixel(&self) -> u8 {
        self.color_type.samples_per_pixel()
    }

    /// Channels after palette expansion.
    #[inline]
    pub fn channel_count(&self) -> u8 {
        self.color_type.channel_count()
    }

    /// Size of the filtered stream: one filter byte plus one scanline per row.
    #[inline]
    pub fn filtered_size(&self) -> usize {
        (self.scanline_size + 1) * self.height as usize
    }

    /// Bytes per sample in the RGB/RGBA projections: 1 below 16-bit, else 2.
    #[inline]
    pub fn projected_sample_size(&self) -> usize {
        if self.bit_depth <= 8 {
            1
        } else {
            2
        }
    }

    /// Bytes per row of the RGB projection.
    #[inline]
    pub fn rgb_scanline_size(&self) -> usize {
        self.width as usize * self.projected_sample_size() * 3
    }

    /// Bytes in the whole RGB projection.
    #[inline]
    pub fn rgb_scanlines_size(&self) -> usize {
        self.rgb_scanline_size() * self.height as usize
    }

    /// Bytes per row of the RGBA projection.
    #[inline]
    pub fn rgba_scanline_size(&self) -> usize {
        self.width as usize * self.projected_sample_size() * 4
    }

    /// Bytes in the whole RGBA projection.
    #[inline]
    pub fn rgba_scanlines_size(&self) -> usize {
        self.rgba_scanline_size() * self.height as usize
    }
}
