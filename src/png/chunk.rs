//! PNG chunk reading and integrity checking.

use crate::bytes::ByteCursor;
use crate::crc32::crc32_with;
use crate::error::{Error, Result};

/// One decoded chunk: its 4-byte ASCII type and a view of its data.
#[derive(Debug)]
pub struct RawChunk<'a> {
    /// Chunk type, e.g. `IHDR`.
    pub chunk_type: [u8; 4],
    /// Chunk payload of the declared length.
    pub data: &'a [u8],
}

/// Whether the chunk type has the critical bit set (bit 5 of byte 0 clear).
#[inline]
pub fn is_critical(chunk_type: &[u8; 4]) -> bool {
    chunk_type[0] & 0x20 == 0
}

/// Read one chunk: length, type, data, CRC.
///
/// Returns the chunk and `more == false` when it was IEND. The CRC is
/// recomputed over type then data as two ranges (initial 0xFFFFFFFF and no
/// final XOR for the first, the carried value and the usual final XOR for
/// the second) and compared against the stored one. A declared length that
/// overruns the stream is [`Error::TruncatedFile`], reported before any
/// CRC comparison.
pub fn read_chunk<'a>(cursor: &mut ByteCursor<'a>) -> Result<(RawChunk<'a>, bool)> {
    let length = cursor.read_u32_be()? as usize;
    let chunk_type = cursor.take_array::<4>()?;
    let data = cursor.take(length)?;
    let stored = cursor.read_u32_be()?;

    let type_crc = crc32_with(&chunk_type, 0xFFFF_FFFF, 0);
    let computed = crc32_with(data, type_crc, 0xFFFF_FFFF);

    if computed != stored {
        return Err(Error::CrcMismatch {
            chunk_type,
            stored,
            computed,
        });
    }

    let more = chunk_type != *b"IEND";
    Ok((RawChunk { chunk_type, data }, more))
}
