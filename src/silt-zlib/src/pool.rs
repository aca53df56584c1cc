use std::cell::RefCell;

use flate2::{Compress, Compression, Decompress};
use log::trace;

/// The codec instances owned by one thread.
///
/// Each slot pair is indexed by the `raw` mode flag and populated
/// lazily on first use. Construction cost is paid once per thread
/// per variant; afterwards the instances live until the thread
/// terminates.
#[derive(Default)]
struct CodecSet {
    inflaters: [Option<Decompress>; 2],
    deflaters: [Option<Compress>; 2],
}

thread_local! {
    static CODECS: RefCell<CodecSet> = RefCell::new(CodecSet::default());
}

/// Resets the borrowed inflater when the operation using it ends,
/// on every exit path.
///
/// A reset discards all internally buffered stream state, so a
/// failed or abandoned operation can never leak bytes into the
/// next one reusing the instance.
struct InflateReset<'a> {
    codec: &'a mut Decompress,
    zlib_header: bool,
}

impl Drop for InflateReset<'_> {
    fn drop(&mut self) {
        self.codec.reset(self.zlib_header);
    }
}

struct DeflateReset<'a> {
    codec: &'a mut Compress,
}

impl Drop for DeflateReset<'_> {
    fn drop(&mut self) {
        self.codec.reset();
    }
}

/// Runs `f` with exclusive access to the calling thread's inflater
/// for the given mode.
pub(crate) fn with_inflater<T>(raw: bool, f: impl FnOnce(&mut Decompress) -> T) -> T {
    CODECS.with(|cell| {
        let mut set = cell.borrow_mut();
        let codec = set.inflaters[raw as usize].get_or_insert_with(|| {
            trace!("creating thread-local inflater (raw: {raw})");
            Decompress::new(!raw)
        });

        let guard = InflateReset {
            codec,
            zlib_header: !raw,
        };
        f(&mut *guard.codec)
    })
}

/// Runs `f` with exclusive access to the calling thread's deflater
/// for the given mode.
pub(crate) fn with_deflater<T>(raw: bool, f: impl FnOnce(&mut Compress) -> T) -> T {
    CODECS.with(|cell| {
        let mut set = cell.borrow_mut();
        let codec = set.deflaters[raw as usize].get_or_insert_with(|| {
            trace!("creating thread-local deflater (raw: {raw})");
            Compress::new(Compression::default(), !raw)
        });

        let guard = DeflateReset { codec };
        f(&mut *guard.codec)
    })
}
