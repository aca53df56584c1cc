use rand::{rngs::StdRng, Rng, SeedableRng};
use silt_zlib::{compress, compress_bound, uncompress, DecodeError, EncodeError};

fn compress_to_vec(data: &[u8], raw: bool) -> Vec<u8> {
    let mut out = vec![0; compress_bound(data.len(), raw)];
    let written = compress(data, &mut out, 0, raw).unwrap();
    out.truncate(written);

    out
}

#[test]
fn mode_mismatch_fails() {
    let data = b"mode isolation test payload, long enough to compress".repeat(8);

    let framed = compress_to_vec(&data, false);
    assert!(uncompress(&framed, true).is_err());

    let raw = compress_to_vec(&data, true);
    assert!(uncompress(&raw, false).is_err());
}

#[test]
fn garbage_input_fails() {
    let err = uncompress(b"\xFF\xFE\xFD\xFC not a zlib stream", false).unwrap_err();
    assert!(matches!(err, DecodeError::Corrupt(_)));
}

#[test]
fn truncated_stream_fails() {
    let data = b"payload that will lose its trailing checksum".repeat(16);
    let mut framed = compress_to_vec(&data, false);
    framed.truncate(framed.len() - 4);

    let err = uncompress(&framed, false).unwrap_err();
    assert!(matches!(err, DecodeError::Truncated));
}

#[test]
fn output_too_small() {
    let mut rng = StdRng::seed_from_u64(0xF011);
    let data: Vec<u8> = (0..4096).map(|_| rng.gen()).collect();

    let mut out = vec![0; 16];
    let err = compress(&data, &mut out, 0, false).unwrap_err();
    assert!(matches!(err, EncodeError::OutputFull));
}

#[test]
fn output_offset_past_end() {
    let data = b"offset past the end of the output buffer";

    let mut out = vec![0; 8];
    let err = compress(data, &mut out, 9, false).unwrap_err();
    assert!(matches!(err, EncodeError::OutputFull));
}

// An output region exactly the size of the compressed result must
// succeed; one byte less must not. Compression is deterministic,
// so the size learned from a first run applies to the second.
#[test]
fn exact_fit_boundary() {
    let data = b"exact fit boundary test payload".repeat(8);

    for raw in [false, true] {
        let compressed = compress_to_vec(&data, raw);

        let mut exact = vec![0; compressed.len()];
        assert_eq!(compress(&data, &mut exact, 0, raw).unwrap(), exact.len());
        assert_eq!(exact, compressed);

        let mut short = vec![0; compressed.len() - 1];
        let err = compress(&data, &mut short, 0, raw).unwrap_err();
        assert!(matches!(err, EncodeError::OutputFull));
    }
}

// A failed call must not poison the thread's codec instance for
// the next one.
#[test]
fn codec_usable_after_failure() {
    let data = b"state must be reset between calls".repeat(8);

    assert!(uncompress(b"\x00 definitely not deflate \x00", true).is_err());

    let compressed = compress_to_vec(&data, true);
    assert_eq!(uncompress(&compressed, true).unwrap(), data);
}
