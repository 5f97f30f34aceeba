//! Projection of defiltered pixel data onto canonical RGB and RGBA.
//!
//! Output keeps the input's sample width: one byte per sample for bit
//! depths up to 8, two bytes (in the raw buffer's current order) for
//! 16-bit. Sub-byte grayscale and indexed data go through the unpacker
//! first, so their projections are always 8-bit.

use super::header::Ihdr;
use super::palette::Palette;
use super::unpack::{unpack_grayscale, unpack_indexed};
use crate::color::ColorType;
use crate::error::{Error, Result};

/// Project the defiltered buffer onto interleaved RGB.
///
/// For [`ColorType::Rgb`] input this is a plain copy; callers that can
/// borrow should skip the call and reuse the raw buffer directly.
pub fn to_rgb(raw: &[u8], header: &Ihdr, palette: Option<&Palette>) -> Result<Vec<u8>> {
    match header.color_type {
        ColorType::Rgb => Ok(raw.to_vec()),
        ColorType::Rgba => Ok(drop_alpha(raw, header)),
        ColorType::Grayscale => {
            if header.bit_depth == 16 {
                Ok(replicate_pairs(raw.chunks_exact(2)))
            } else if header.bit_depth == 8 {
                Ok(replicate_bytes(raw.iter().copied()))
            } else {
                let gray = unpack_grayscale(
                    raw,
                    header.width,
                    header.height,
                    header.bit_depth,
                    header.scanline_size,
                )?;
                Ok(replicate_bytes(gray.into_iter()))
            }
        }
        ColorType::GrayscaleAlpha => {
            if header.bit_depth == 16 {
                Ok(replicate_pairs(raw.chunks_exact(4)))
            } else {
                Ok(replicate_bytes(raw.chunks_exact(2).map(|pair| pair[0])))
            }
        }
        ColorType::Indexed => {
            let palette = palette.ok_or_else(|| {
                Error::MalformedPlte("indexed image has no palette".into())
            })?;
            unpack_indexed(
                raw,
                header.width,
                header.height,
                header.bit_depth,
                header.scanline_size,
                palette,
            )
        }
    }
}

/// Project the defiltered buffer onto interleaved RGBA.
///
/// Non-RGBA input projects to RGB first and then gains a fully opaque
/// alpha sample per pixel: 0xFF at 8-bit, 0xFFFF at 16-bit.
pub fn to_rgba(raw: &[u8], header: &Ihdr, palette: Option<&Palette>) -> Result<Vec<u8>> {
    if header.color_type == ColorType::Rgba {
        return Ok(raw.to_vec());
    }

    let rgb = to_rgb(raw, header, palette)?;
    let mut out = Vec::with_capacity(header.rgba_scanlines_size());

    if header.bit_depth == 16 {
        for pixel in rgb.chunks_exact(6) {
            out.extend_from_slice(pixel);
            out.extend_from_slice(&[0xFF, 0xFF]);
        }
    } else {
        for pixel in rgb.chunks_exact(3) {
            out.extend_from_slice(pixel);
            out.push(0xFF);
        }
    }

    Ok(out)
}

/// Drop the trailing alpha sample of every RGBA pixel.
fn drop_alpha(raw: &[u8], header: &Ihdr) -> Vec<u8> {
    let mut out = Vec::with_capacity(header.rgb_scanlines_size());
    if header.bit_depth == 16 {
        for pixel in raw.chunks_exact(8) {
            out.extend_from_slice(&pixel[..6]);
        }
    } else {
        for pixel in raw.chunks_exact(4) {
            out.extend_from_slice(&pixel[..3]);
        }
    }
    out
}

/// Replicate each 8-bit gray sample into an RGB triple.
fn replicate_bytes(samples: impl Iterator<Item = u8>) -> Vec<u8> {
    let mut out = Vec::new();
    for gray in samples {
        out.extend_from_slice(&[gray, gray, gray]);
    }
    out
}

/// Replicate the leading 16-bit gray sample of each chunk into three
/// channel pairs, keeping high and low bytes together.
fn replicate_pairs<'a>(chunks: impl Iterator<Item = &'a [u8]>) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in chunks {
        let (high, low) = (chunk[0], chunk[1]);
        out.extend_from_slice(&[high, low, high, low, high, low]);
    }
    out
}
