//! PNG decoding into raw, RGB, or RGBA pixel buffers.
//!
//! [`PngDecoder`] runs the whole pipeline up front: signature check, chunk
//! iteration with CRC validation, streaming inflate of the IDAT payloads,
//! and scanline defiltering. The defiltered buffer is owned by the decoder;
//! RGB and RGBA projections materialize lazily on first request and stay
//! cached until [`PngDecoder::reset_cache`].

pub mod chunk;
pub mod convert;
pub mod filter;
pub mod header;
pub mod palette;
pub mod unpack;

use std::path::Path;

use crate::bytes::ByteCursor;
use crate::color::ColorType;
use crate::error::{Error, Result};
use crate::inflate::InflateStream;

use chunk::{is_critical, read_chunk};
use header::Ihdr;
use palette::Palette;

/// PNG file signature (magic bytes).
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// A fully decoded PNG image.
///
/// Construction decodes and defilters the whole file; every accessor
/// afterwards is a lookup or a cached projection. The decoder exclusively
/// owns its buffers: it moves but does not clone.
#[derive(Debug)]
pub struct PngDecoder {
    header: Ihdr,
    palette: Option<Palette>,
    raw: Vec<u8>,
    rgb_cache: Option<Vec<u8>>,
    rgba_cache: Option<Vec<u8>>,
}

impl PngDecoder {
    /// Decode a PNG file from disk.
    ///
    /// The file is read and closed before this returns, on success and
    /// failure alike.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Decode a PNG from an in-memory byte buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < PNG_SIGNATURE.len() || data[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
            return Err(Error::NotAPng);
        }

        let mut cursor = ByteCursor::new(data);
        cursor.take(PNG_SIGNATURE.len())?;

        let mut header: Option<Ihdr> = None;
        let mut palette: Option<Palette> = None;
        let mut inflate = InflateStream::new();
        let mut inflated: Vec<u8> = Vec::new();

        loop {
            let (chunk, more) = read_chunk(&mut cursor)?;

            match &chunk.chunk_type {
                b"IHDR" => {
                    if header.is_some() {
                        return Err(Error::MalformedIhdr("duplicate IHDR chunk".into()));
                    }
                    let parsed = Ihdr::parse(chunk.data)?;
                    inflated.reserve_exact(parsed.filtered_size());
                    header = Some(parsed);
                }
                b"PLTE" => {
                    // PLTE is accepted and ignored for non-indexed images.
                    require_header(&header)?;
                    palette = Some(Palette::new(chunk.data)?);
                }
                b"IDAT" => {
                    let header = require_header(&header)?;
                    if header.color_type == ColorType::Indexed && palette.is_none() {
                        return Err(Error::MalformedPlte(
                            "PLTE chunk missing before first IDAT".into(),
                        ));
                    }
                    inflate.decompress(chunk.data, &mut inflated)?;
                }
                b"IEND" => {}
                other => {
                    if is_critical(other) {
                        return Err(Error::UnknownCriticalChunk(*other));
                    }
                    // Ancillary chunks are skipped.
                }
            }

            if !more {
                break;
            }
        }

        let header = match header {
            Some(header) => header,
            None => return Err(Error::MalformedIhdr("missing IHDR chunk".into())),
        };

        let expected = header.filtered_size();
        if inflated.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: inflated.len(),
            });
        }

        let raw = filter::defilter(
            &inflated,
            header.scanline_size,
            header.height,
            header.stride,
        )?;

        Ok(Self {
            header,
            palette,
            raw,
            rgb_cache: None,
            rgba_cache: None,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.header.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.header.height
    }

    /// Bits per sample as declared by IHDR.
    #[inline]
    pub fn bit_depth(&self) -> u8 {
        self.header.bit_depth
    }

    /// Color type as declared by IHDR.
    #[inline]
    pub fn color_type(&self) -> ColorType {
        self.header.color_type
    }

    /// Samples stored per pixel in the filtered stream.
    #[inline]
    pub fn samples_per_pixel(&self) -> u8 {
        self.header.samples_per_pixel()
    }

    /// Channels after palette expansion.
    #[inline]
    pub fn channel_count(&self) -> u8 {
        self.header.channel_count()
    }

    /// Bytes per defiltered scanline.
    #[inline]
    pub fn scanline_size(&self) -> usize {
        self.header.scanline_size
    }

    /// Bytes in the whole defiltered buffer.
    #[inline]
    pub fn scanlines_size(&self) -> usize {
        self.header.scanlines_size
    }

    /// Bytes per row of the RGB projection.
    #[inline]
    pub fn rgb_scanline_size(&self) -> usize {
        self.header.rgb_scanline_size()
    }

    /// Bytes in the whole RGB projection.
    #[inline]
    pub fn rgb_scanlines_size(&self) -> usize {
        self.header.rgb_scanlines_size()
    }

    /// Bytes per row of the RGBA projection.
    #[inline]
    pub fn rgba_scanline_size(&self) -> usize {
        self.header.rgba_scanline_size()
    }

    /// Bytes in the whole RGBA projection.
    #[inline]
    pub fn rgba_scanlines_size(&self) -> usize {
        self.header.rgba_scanlines_size()
    }

    /// Borrowed view of the defiltered buffer.
    #[inline]
    pub fn raw_data(&self) -> &[u8] {
        &self.raw
    }

    /// Owned copy of the defiltered buffer.
    pub fn raw_data_to_vec(&self) -> Vec<u8> {
        self.raw.clone()
    }

    /// Consume the decoder and take the defiltered buffer by move.
    pub fn into_raw_data(self) -> Vec<u8> {
        self.raw
    }

    /// Borrowed view of the RGB projection, computed and cached on first
    /// call. RGB input borrows the raw buffer directly without copying.
    pub fn rgb_data(&mut self) -> Result<&[u8]> {
        if self.header.color_type == ColorType::Rgb {
            return Ok(&self.raw);
        }
        if self.rgb_cache.is_none() {
            self.rgb_cache = Some(convert::to_rgb(
                &self.raw,
                &self.header,
                self.palette.as_ref(),
            )?);
        }
        Ok(self.rgb_cache.as_deref().expect("cache populated above"))
    }

    /// Owned copy of the RGB projection.
    pub fn rgb_data_to_vec(&mut self) -> Result<Vec<u8>> {
        Ok(self.rgb_data()?.to_vec())
    }

    /// Borrowed view of the RGBA projection, computed and cached on first
    /// call. RGBA input borrows the raw buffer directly without copying.
    pub fn rgba_data(&mut self) -> Result<&[u8]> {
        if self.header.color_type == ColorType::Rgba {
            return Ok(&self.raw);
        }
        if self.rgba_cache.is_none() {
            self.rgba_cache = Some(convert::to_rgba(
                &self.raw,
                &self.header,
                self.palette.as_ref(),
            )?);
        }
        Ok(self.rgba_cache.as_deref().expect("cache populated above"))
    }

    /// Owned copy of the RGBA projection.
    pub fn rgba_data_to_vec(&mut self) -> Result<Vec<u8>> {
        Ok(self.rgba_data()?.to_vec())
    }

    /// Release the cached RGB and RGBA projections. The raw buffer stays.
    pub fn reset_cache(&mut self) {
        self.rgb_cache = None;
        self.rgba_cache = None;
    }

    /// Swap every adjacent byte pair of the raw buffer in place.
    ///
    /// Only meaningful at bit depth 16, where it toggles samples between
    /// network order and byte-swapped order; below 16 it is a no-op. The
    /// projection caches are reset first, since any cached bytes would no
    /// longer agree with the raw buffer.
    pub fn swap_byte_order(&mut self) {
        if self.header.bit_depth < 16 {
            return;
        }
        self.reset_cache();
        for pair in self.raw.chunks_exact_mut(2) {
            pair.swap(0, 1);
        }
    }
}

/// Chunks other than IHDR are only legal once the header is known.
fn require_header(header: &Option<Ihdr>) -> Result<&Ihdr> {
    header
        .as_ref()
        .ok_or_else(|| Error::MalformedIhdr("IHDR must be the first chunk".into()))
}
