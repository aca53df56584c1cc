//! Zlib block compression for the Silt storage engine.
//!
//! Blocks are compressed and decompressed to completion against
//! in-memory buffers; a `raw` flag on every operation selects
//! headerless DEFLATE streams over the standard zlib framing.
//!
//! Since the decompressed size of a block is not recorded anywhere,
//! [`uncompress`] inflates into a growing buffer and returns exactly
//! the bytes the stream produced. [`compress`] is the inverse
//! one-shot operation into a caller-provided buffer, sized via
//! [`compress_bound`].
//!
//! Codec state is expensive to construct, so every thread keeps its
//! own set of long-lived inflate/deflate instances which are reset
//! after each call. Callers on different threads never contend.

#![deny(
    rust_2018_idioms,
    rustdoc::broken_intra_doc_links,
    unsafe_op_in_unsafe_fn
)]

mod buffer;
pub use buffer::*;

mod deflater;
pub use deflater::*;

mod inflater;
pub use inflater::*;

mod pool;
