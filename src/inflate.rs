//! Streaming zlib inflate over successive IDAT payloads.
//!
//! PNG concatenates the data of every IDAT chunk into one zlib stream, so
//! the decompressor state must survive across chunks. [`InflateStream`]
//! wraps a single [`flate2::Decompress`] context and appends whatever each
//! call produces to a caller-supplied output buffer.

use flate2::{Decompress, FlushDecompress, Status};

use crate::error::{Error, Result};

/// Size of the scratch buffer each inflate call writes into.
pub const SCRATCH_SIZE: usize = 4096;

/// A zlib inflate stream fed one compressed chunk at a time.
///
/// The underlying context lives as long as the stream value and is
/// released on drop, on every exit path.
pub struct InflateStream {
    context: Decompress,
    scratch: Vec<u8>,
    finished: bool,
}

impl InflateStream {
    /// Create a stream expecting a zlib-wrapped DEFLATE payload.
    pub fn new() -> Self {
        Self {
            context: Decompress::new(true),
            scratch: vec![0u8; SCRATCH_SIZE],
            finished: false,
        }
    }

    /// Whether the zlib end-of-stream marker has been consumed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Inflate one compressed chunk, appending the produced bytes to `output`.
    ///
    /// Fails with [`Error::CorruptStream`] on any zlib error, and on any
    /// compressed bytes arriving after the stream already ended.
    pub fn decompress(&mut self, mut input: &[u8], output: &mut Vec<u8>) -> Result<()> {
        if input.is_empty() {
            return Ok(());
        }
        if self.finished {
            return Err(Error::CorruptStream(
                "compressed data after end of stream".into(),
            ));
        }

        while !input.is_empty() {
            let in_before = self.context.total_in();
            let out_before = self.context.total_out();

            let status = self
                .context
                .decompress(input, &mut self.scratch, FlushDecompress::None)
                .map_err(|err| Error::CorruptStream(err.to_string()))?;

            let consumed = (self.context.total_in() - in_before) as usize;
            let produced = (self.context.total_out() - out_before) as usize;
            output.extend_from_slice(&self.scratch[..produced]);
            input = &input[consumed..];

            match status {
                Status::StreamEnd => {
                    self.finished = true;
                    if !input.is_empty() {
                        return Err(Error::CorruptStream(
                            "compressed data after end of stream".into(),
                        ));
                    }
                }
                Status::Ok => {}
                Status::BufError => {
                    if consumed == 0 && produced == 0 {
                        return Err(Error::CorruptStream("inflate made no progress".into()));
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for InflateStream {
    fn default() -> Self {
        Self::new()
    }
}
