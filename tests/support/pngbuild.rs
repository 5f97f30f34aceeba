//! Deterministic PNG byte-stream synthesis.
//!
//! Builds complete PNG files from explicit parts: IHDR fields, an optional
//! palette, and the filtered scanlines (caller picks the filter byte per
//! row). Everything is assembled in memory with real CRCs and a real zlib
//! stream, so the fixtures exercise the same validation paths a file on
//! disk would.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use rawpix::crc32::crc32;
use rawpix::png::PNG_SIGNATURE;
use std::io::Write;

/// Append one chunk: length, type, data, CRC over type and data.
pub fn write_chunk(out: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    out.reserve(12 + data.len());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(data);
    let mut crc_input = chunk_type.to_vec();
    crc_input.extend_from_slice(data);
    out.extend_from_slice(&crc32(&crc_input).to_be_bytes());
}

/// The 13 IHDR payload bytes.
pub fn ihdr_data(width: u32, height: u32, bit_depth: u8, color_type: u8) -> Vec<u8> {
    ihdr_data_full(width, height, bit_depth, color_type, 0, 0, 0)
}

/// IHDR payload with every field explicit.
pub fn ihdr_data_full(
    width: u32,
    height: u32,
    bit_depth: u8,
    color_type: u8,
    compression: u8,
    filter: u8,
    interlace: u8,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[bit_depth, color_type, compression, filter, interlace]);
    data
}

/// zlib-compress a filtered stream for IDAT.
pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Prefix each row with its filter byte and concatenate.
pub fn filtered_stream(rows: &[(u8, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    for (filter, row) in rows {
        out.push(*filter);
        out.extend_from_slice(row);
    }
    out
}

/// Assemble a complete PNG from its parts.
pub fn build_png(
    width: u32,
    height: u32,
    bit_depth: u8,
    color_type: u8,
    palette: Option<&[u8]>,
    filtered: &[u8],
) -> Vec<u8> {
    let mut png = PNG_SIGNATURE.to_vec();
    write_chunk(&mut png, b"IHDR", &ihdr_data(width, height, bit_depth, color_type));
    if let Some(palette) = palette {
        write_chunk(&mut png, b"PLTE", palette);
    }
    write_chunk(&mut png, b"IDAT", &deflate(filtered));
    write_chunk(&mut png, b"IEND", &[]);
    png
}

/// A PNG whose scanlines are all filter-type None over `raw` row data.
pub fn build_png_unfiltered(
    width: u32,
    height: u32,
    bit_depth: u8,
    color_type: u8,
    palette: Option<&[u8]>,
    raw: &[u8],
) -> Vec<u8> {
    assert_eq!(raw.len() % height as usize, 0, "raw must split into rows");
    let scanline = raw.len() / height as usize;
    let mut filtered = Vec::with_capacity(raw.len() + height as usize);
    for row in raw.chunks(scanline) {
        filtered.push(0);
        filtered.extend_from_slice(row);
    }
    build_png(width, height, bit_depth, color_type, palette, &filtered)
}

/// Deterministic RGB gradient, the bench/test workhorse pattern.
pub fn gradient_rgb(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            let b = (((x + y) * 127) / (width + height).max(1)) as u8;
            pixels.extend_from_slice(&[r, g, b]);
        }
    }
    pixels
}
