use std::cmp;

use flate2::{CompressError, FlushCompress, Status};
use thiserror::Error;

use crate::pool;

/// Errors that may occur when compressing a block.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The codec failed to process the stream.
    #[error("failed to compress block: {0}")]
    Codec(#[from] CompressError),

    /// The compressed result does not fit in the remaining
    /// capacity of the output buffer.
    #[error("output buffer too small for compressed block")]
    OutputFull,
}

/// Compresses an entire block into `output`, starting at
/// `output_offset`, and returns the number of bytes written.
///
/// `raw` selects headerless DEFLATE over standard zlib framing;
/// decompression must use the same mode to round-trip.
///
/// This is a one-shot transform with no internal buffer growth.
/// The caller owns the output allocation and sizes it via
/// [`compress_bound`]; when the result does not fit, the call
/// fails with [`EncodeError::OutputFull`] rather than writing a
/// partial stream.
pub fn compress(
    input: &[u8],
    output: &mut [u8],
    output_offset: usize,
    raw: bool,
) -> Result<usize, EncodeError> {
    pool::with_deflater(raw, |codec| {
        let out = match output.get_mut(output_offset..) {
            Some(out) => out,
            None => return Err(EncodeError::OutputFull),
        };

        let out_before = codec.total_out();
        let status = codec.compress(input, out, FlushCompress::Finish)?;
        match status {
            Status::StreamEnd => Ok((codec.total_out() - out_before) as usize),
            Status::Ok | Status::BufError => Err(EncodeError::OutputFull),
        }
    })
}

/// Returns the worst-case compressed size for `len` input bytes.
///
/// Mirrors the `compressBound` arithmetic of the miniz family
/// backing `flate2`, with the zlib header and trailer accounted
/// for in framed mode.
pub fn compress_bound(len: usize, raw: bool) -> usize {
    let block_overhead = (len / (31 * 1024) + 1) * 5;
    let bound = cmp::max(128 + len + len / 10, 128 + len + block_overhead);

    if raw { bound } else { bound + 6 }
}
