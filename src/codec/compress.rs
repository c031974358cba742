//! Payload compression for the HEP v3 compressed-payload chunk.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;
use tracing::warn;

/// Compress a payload buffer with a zlib (deflate) stream.
///
/// Returns `None` on any internal encoder failure; compression failure is
/// never fatal — the caller falls back to sending the original bytes under
/// the raw payload chunk type. The output may legitimately be as large as or
/// larger than the input for small or incompressible payloads; no size
/// policy is applied here.
pub fn deflate(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(bytes.len()), Compression::default());

    if let Err(e) = encoder.write_all(bytes) {
        warn!("Payload compression failed, falling back to raw: {}", e);
        return None;
    }

    match encoder.finish() {
        Ok(compressed) => Some(compressed),
        Err(e) => {
            warn!("Payload compression failed, falling back to raw: {}", e);
            None
        }
    }
}
