//! Scanline defiltering: reversing the five PNG row filters.
//!
//! The filtered stream carries one filter-type byte per row followed by
//! `scanline_size` filtered bytes. Each filter predicts a byte from up to
//! three decoded neighbors (left, above, and upper-left, all at `stride`
//! distance) and stores the difference modulo 256. Decoding adds the
//! prediction back, so row `r` can only be reconstructed after row `r - 1`.

use crate::error::{Error, Result};

/// Filter type bytes as defined by the PNG specification.
pub const FILTER_NONE: u8 = 0;
/// Predicts each byte from its left neighbor.
pub const FILTER_SUB: u8 = 1;
/// Predicts each byte from the byte above it.
pub const FILTER_UP: u8 = 2;
/// Predicts each byte from the floored mean of left and above.
pub const FILTER_AVERAGE: u8 = 3;
/// Predicts each byte with the Paeth three-neighbor heuristic.
pub const FILTER_PAETH: u8 = 4;

/// Reverse the per-row filters of a whole image.
///
/// `filtered` must hold exactly `(scanline_size + 1) * height` bytes. The
/// result holds `scanline_size * height` defiltered bytes. Rows decode in
/// place into the destination buffer; the previously decoded row is read
/// straight out of it, so no per-row scratch space is allocated.
pub fn defilter(
    filtered: &[u8],
    scanline_size: usize,
    height: u32,
    stride: usize,
) -> Result<Vec<u8>> {
    debug_assert_eq!(filtered.len(), (scanline_size + 1) * height as usize);
    debug_assert!(stride >= 1);

    let mut raw = vec![0u8; scanline_size * height as usize];

    for row in 0..height as usize {
        let src_start = row * (scanline_size + 1);
        let filter = filtered[src_start];
        let src = &filtered[src_start + 1..src_start + 1 + scanline_size];

        let (decoded, rest) = raw.split_at_mut(row * scanline_size);
        let dest = &mut rest[..scanline_size];
        let prev = if row == 0 {
            None
        } else {
            Some(&decoded[(row - 1) * scanline_size..])
        };

        match filter {
            FILTER_NONE => dest.copy_from_slice(src),
            FILTER_SUB => defilter_sub(src, dest, stride),
            FILTER_UP => match prev {
                // No row above: every predictor is zero.
                None => dest.copy_from_slice(src),
                Some(prev) => defilter_up(src, dest, prev),
            },
            FILTER_AVERAGE => defilter_average(src, dest, prev, stride),
            FILTER_PAETH => defilter_paeth(src, dest, prev, stride),
            other => {
                return Err(Error::InvalidFilter {
                    filter: other,
                    row: row as u32,
                })
            }
        }
    }

    Ok(raw)
}

/// Sub: add the decoded byte one stride to the left; zero before that.
fn defilter_sub(src: &[u8], dest: &mut [u8], stride: usize) {
    let lead = stride.min(src.len());
    dest[..lead].copy_from_slice(&src[..lead]);
    for i in lead..src.len() {
        dest[i] = src[i].wrapping_add(dest[i - stride]);
    }
}

/// Up: add the decoded byte directly above.
fn defilter_up(src: &[u8], dest: &mut [u8], prev: &[u8]) {
    for (i, &byte) in src.iter().enumerate() {
        dest[i] = byte.wrapping_add(prev[i]);
    }
}

/// Average: add the floored mean of left and above.
///
/// The sum is taken in 16 bits (left + above reaches 510) and floored,
/// matching the encoder's unbounded-integer definition.
fn defilter_average(src: &[u8], dest: &mut [u8], prev: Option<&[u8]>, stride: usize) {
    match prev {
        None => {
            // First row: above is zero everywhere, so the mean is left / 2.
            let lead = stride.min(src.len());
            dest[..lead].copy_from_slice(&src[..lead]);
            for i in lead..src.len() {
                dest[i] = src[i].wrapping_add(dest[i - stride] / 2);
            }
        }
        Some(prev) => {
            let lead = stride.min(src.len());
            for i in 0..lead {
                dest[i] = src[i].wrapping_add(prev[i] / 2);
            }
            for i in lead..src.len() {
                let sum = dest[i - stride] as u16 + prev[i] as u16;
                dest[i] = src[i].wrapping_add((sum / 2) as u8);
            }
        }
    }
}

/// Paeth: add the predictor picked from left, above, and upper-left.
fn defilter_paeth(src: &[u8], dest: &mut [u8], prev: Option<&[u8]>, stride: usize) {
    match prev {
        // No row above: above and upper-left are zero, and Paeth of
        // (left, 0, 0) is left, so the row degenerates to Sub.
        None => defilter_sub(src, dest, stride),
        Some(prev) => {
            // No left or upper-left in the first stride: Paeth of
            // (0, above, 0) is above.
            let lead = stride.min(src.len());
            for i in 0..lead {
                dest[i] = src[i].wrapping_add(prev[i]);
            }
            for i in lead..src.len() {
                let predictor =
                    paeth_predictor(dest[i - stride], prev[i], prev[i - stride]);
                dest[i] = src[i].wrapping_add(predictor);
            }
        }
    }
}

/// The Paeth predictor: whichever of left, above, and upper-left is
/// closest to `left + above - upper_left`, ties broken in that order.
#[inline]
pub fn paeth_predictor(left: u8, above: u8, upper_left: u8) -> u8 {
    let p = left as i32 + above as i32 - upper_left as i32;
    let pa = (p - left as i32).abs();
    let pb = (p - above as i32).abs();
    let pc = (p - upper_left as i32).abs();

    if pa <= pb && pa <= pc {
        left
    } else if pb <= pc {
        above
    } else {
        upper_left
    }
}
