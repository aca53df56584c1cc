use std::cmp;

use flate2::{Decompress, DecompressError, FlushDecompress, Status};
use log::trace;
use thiserror::Error;

use crate::pool;

/// Minimum number of bytes added to the output buffer per growth
/// step, so tiny inputs do not crawl towards their final size.
const GROWTH_FLOOR: usize = 1024;

/// Errors that may occur when decompressing a block.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is not a valid compressed stream for the
    /// selected mode.
    #[error("failed to decompress block: {0}")]
    Corrupt(#[from] DecompressError),

    /// The input ended before the stream's final block.
    #[error("compressed block is truncated")]
    Truncated,
}

/// Decompresses an entire block into a freshly allocated buffer.
///
/// `raw` selects headerless DEFLATE over standard zlib framing and
/// must match the mode the block was compressed with.
///
/// The decompressed size of a block is unknown up front, so the
/// output starts as a guess based on typical compression ratios
/// and grows on demand until the stream reports completion. The
/// returned vector holds exactly the decompressed bytes.
pub fn uncompress(compressed: &[u8], raw: bool) -> Result<Vec<u8>, DecodeError> {
    if compressed.is_empty() {
        return Ok(Vec::new());
    }

    pool::with_inflater(raw, |codec| inflate_to_end(codec, compressed))
}

fn inflate_to_end(codec: &mut Decompress, input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    // Guess the decompressed size, assuming a compression ratio of 66%.
    let mut out = vec![0; input.len() + input.len() / 2];

    let mut consumed = 0;
    let mut written = 0;
    loop {
        let in_before = codec.total_in();
        let out_before = codec.total_out();

        // `None` keeps the codec resumable across steps; completion
        // is signalled through `Status::StreamEnd`, not the flush mode.
        let status = codec.decompress(
            &input[consumed..],
            &mut out[written..],
            FlushDecompress::None,
        )?;

        let read = (codec.total_in() - in_before) as usize;
        let produced = (codec.total_out() - out_before) as usize;
        consumed += read;
        written += produced;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError if read == 0 && produced == 0 => {
                if written == out.len() {
                    let grown = out.len() + cmp::max(input.len() / 4, GROWTH_FLOOR);
                    trace!("growing decompression buffer to {grown} bytes");
                    out.resize(grown, 0);
                } else {
                    // No progress despite spare output capacity means
                    // the input ran out before the stream's final block.
                    return Err(DecodeError::Truncated);
                }
            }
            Status::Ok | Status::BufError => {}
        }
    }

    out.truncate(written);
    Ok(out)
}
