//! Error types for the rawpix library.

use std::fmt;

/// Result type alias for rawpix operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding an image.
#[derive(Debug)]
pub enum Error {
    /// The file could not be opened or read.
    Io(std::io::Error),
    /// The stream does not start with the PNG signature.
    NotAPng,
    /// The stream ended before the declared chunk bytes.
    TruncatedFile {
        /// Byte offset at which the stream ran out.
        offset: usize,
    },
    /// Recomputed chunk CRC differs from the stored one.
    CrcMismatch {
        /// Type of the chunk that failed the check.
        chunk_type: [u8; 4],
        /// CRC stored in the file.
        stored: u32,
        /// CRC recomputed over type and data.
        computed: u32,
    },
    /// IHDR has the wrong length or a disallowed field value.
    MalformedIhdr(String),
    /// Interlace method 1 (Adam7) is not supported.
    UnsupportedInterlace,
    /// Color-type/bit-depth pair disallowed by the PNG specification.
    UnsupportedCombination {
        /// Color type byte from IHDR.
        color_type: u8,
        /// Bit depth byte from IHDR.
        bit_depth: u8,
    },
    /// PLTE is oversized, misaligned, or missing where required.
    MalformedPlte(String),
    /// An indexed sample points past the end of the palette.
    PaletteIndexOutOfRange {
        /// The offending sample value.
        index: u8,
        /// Number of entries the palette actually holds.
        entries: usize,
    },
    /// zlib reported an error, or IDAT bytes arrived after end-of-stream.
    CorruptStream(String),
    /// Inflated byte count differs from the filtered-stream size.
    SizeMismatch {
        /// Expected `(scanline_size + 1) * height` bytes.
        expected: usize,
        /// Bytes actually produced by inflate.
        actual: usize,
    },
    /// A scanline carries a filter-type byte outside 0..=4.
    InvalidFilter {
        /// The offending filter byte.
        filter: u8,
        /// Row the byte was read from.
        row: u32,
    },
    /// An unrecognized chunk with the critical bit set.
    UnknownCriticalChunk([u8; 4]),
    /// Derived buffer sizes overflow the 32-bit addressing limit.
    TooLarge {
        /// The size that exceeded the limit.
        required: u64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {err}"),
            Error::NotAPng => write!(f, "not a PNG file (signature mismatch)"),
            Error::TruncatedFile { offset } => {
                write!(f, "file truncated at byte offset {offset}")
            }
            Error::CrcMismatch {
                chunk_type,
                stored,
                computed,
            } => write!(
                f,
                "CRC mismatch in {} chunk: stored {stored:#010x}, computed {computed:#010x}",
                String::from_utf8_lossy(chunk_type)
            ),
            Error::MalformedIhdr(msg) => write!(f, "malformed IHDR: {msg}"),
            Error::UnsupportedInterlace => {
                write!(f, "Adam7 interlaced images are not supported")
            }
            Error::UnsupportedCombination {
                color_type,
                bit_depth,
            } => write!(
                f,
                "bit depth {bit_depth} is not allowed for color type {color_type}"
            ),
            Error::MalformedPlte(msg) => write!(f, "malformed PLTE: {msg}"),
            Error::PaletteIndexOutOfRange { index, entries } => write!(
                f,
                "palette index {index} out of range for {entries} entries"
            ),
            Error::CorruptStream(msg) => write!(f, "corrupt compressed stream: {msg}"),
            Error::SizeMismatch { expected, actual } => write!(
                f,
                "inflated size mismatch: expected {expected} bytes, got {actual}"
            ),
            Error::InvalidFilter { filter, row } => {
                write!(f, "invalid filter type {filter} in row {row}")
            }
            Error::UnknownCriticalChunk(chunk_type) => write!(
                f,
                "unknown critical chunk: {}",
                String::from_utf8_lossy(chunk_type)
            ),
            Error::TooLarge { required } => write!(
                f,
                "file exceeds reasonable limits: {required} bytes of scanline data"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_chunk_type() {
        let err = Error::CrcMismatch {
            chunk_type: *b"IHDR",
            stored: 1,
            computed: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("IHDR"), "message was: {msg}");
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_truncated_display_has_offset() {
        let msg = Error::TruncatedFile { offset: 42 }.to_string();
        assert!(msg.contains("42"));
    }
}
