//! Frame construction for HEP v1, v2 and v3.

use tracing::trace;

use super::chunk::{Chunk, chunk_type};
use crate::codec::address::{self, AddressBytes};
use crate::error::{HepError, Result};
use crate::types::{AgentConfig, ConnectionInfo};

/// ASCII magic opening every HEP v3 frame.
pub const HEP3_MAGIC: &[u8; 4] = b"HEP3";

/// Size of the v3 frame header: magic + u16 total length.
const FRAME_HEADER_SIZE: usize = 6;

/// Size of the v1/v2 fixed header: version, header_len, family, proto,
/// src port, dst port.
const LEGACY_HEADER_SIZE: usize = 8;

/// Size of the v2-only timestamp/capture-id trailer.
const LEGACY_TRAILER_SIZE: usize = 10;

/// Build a complete HEP frame for one captured event.
///
/// Version dispatch happens first: 3 builds the self-describing chunked
/// frame, 1 and 2 build the legacy fixed frame, anything else is an
/// [`HepError::UnsupportedVersion`]. `compressed` marks `payload` as a zlib
/// stream and only selects the payload chunk type — it never triggers
/// compression here, and v1/v2 ignore it because the legacy format has no
/// compressed form.
///
/// Encoding is all-or-nothing: every failure mode returns before any bytes
/// are produced, never a partial frame.
pub fn encode(
    config: &AgentConfig,
    info: &ConnectionInfo,
    payload: &[u8],
    compressed: bool,
) -> Result<Vec<u8>> {
    match config.version {
        3 => encode_v3(config, info, payload, compressed),
        1 | 2 => encode_legacy(config, info, payload),
        version => Err(HepError::UnsupportedVersion { version }),
    }
}

/// Build a HEP v3 chunked frame.
fn encode_v3(
    config: &AgentConfig,
    info: &ConnectionInfo,
    payload: &[u8],
    compressed: bool,
) -> Result<Vec<u8>> {
    let src = address::encode(info.family, &info.src_addr)?;
    let dst = address::encode(info.family, &info.dst_addr)?;

    // Chunk type pair is family-dependent; both addresses parsed under the
    // same declared family, so the widths agree by construction
    let (src_type, dst_type) = match src {
        AddressBytes::V4(_) => (chunk_type::SRC_IPV4, chunk_type::DST_IPV4),
        AddressBytes::V6(_) => (chunk_type::SRC_IPV6, chunk_type::DST_IPV6),
    };

    let payload_type = if compressed { chunk_type::PAYLOAD_COMPRESSED } else { chunk_type::PAYLOAD_RAW };

    // Fixed order required by collectors: family, proto, addresses, ports,
    // timestamp, proto type, capture id, optional auth key, payload last
    let mut chunks = Vec::with_capacity(12);
    chunks.push(Chunk::standard(chunk_type::IP_FAMILY, vec![info.family]));
    chunks.push(Chunk::standard(chunk_type::IP_PROTO, vec![info.proto]));
    chunks.push(Chunk::standard(src_type, src.as_slice().to_vec()));
    chunks.push(Chunk::standard(dst_type, dst.as_slice().to_vec()));
    chunks.push(Chunk::standard(chunk_type::SRC_PORT, info.src_port.to_be_bytes().to_vec()));
    chunks.push(Chunk::standard(chunk_type::DST_PORT, info.dst_port.to_be_bytes().to_vec()));
    chunks.push(Chunk::standard(chunk_type::TIME_SEC, info.time_sec.to_be_bytes().to_vec()));
    chunks.push(Chunk::standard(chunk_type::TIME_USEC, info.time_usec.to_be_bytes().to_vec()));
    chunks.push(Chunk::standard(chunk_type::PROTO_TYPE, vec![info.proto_type]));
    chunks.push(Chunk::standard(chunk_type::CAPTURE_ID, config.capture_id.to_be_bytes().to_vec()));

    if let Some(password) = &config.password {
        chunks.push(Chunk::standard(chunk_type::AUTH_KEY, password.as_bytes().to_vec()));
    }

    chunks.push(Chunk::standard(payload_type, payload.to_vec()));

    // Total length is summed from the chunks' own declared lengths - the one
    // validation collectors perform before chunk-by-chunk parsing
    let total: usize = FRAME_HEADER_SIZE + chunks.iter().map(Chunk::declared_len).sum::<usize>();
    if total > u16::MAX as usize {
        return Err(HepError::FrameTooLarge { size: total, max: u16::MAX as usize });
    }

    let mut frame = Vec::with_capacity(total);
    frame.extend_from_slice(HEP3_MAGIC);
    frame.extend_from_slice(&(total as u16).to_be_bytes());
    for chunk in &chunks {
        chunk.write_to(&mut frame);
    }

    debug_assert_eq!(frame.len(), total);
    trace!("Encoded HEP v3 frame: {} bytes, {} chunks", frame.len(), chunks.len());
    Ok(frame)
}

/// Build a legacy HEP v1/v2 fixed frame.
///
/// Layout per the original `hep_hdr` wire structure:
///
/// ```text
/// offset 0 : version     (1 byte)
/// offset 1 : header_len  (1 byte, 8 + address pair width: 16 v4, 40 v6)
/// offset 2 : family      (1 byte)
/// offset 3 : proto       (1 byte)
/// offset 4 : src_port    (u16 BE)
/// offset 6 : dst_port    (u16 BE)
/// offset 8 : src_addr, dst_addr
/// then, v2 only: time_sec (u32 BE) | time_usec (u32 BE) | capture_id (u16 BE)
/// then: raw payload verbatim (never compressed)
/// ```
fn encode_legacy(config: &AgentConfig, info: &ConnectionInfo, payload: &[u8]) -> Result<Vec<u8>> {
    let src = address::encode(info.family, &info.src_addr)?;
    let dst = address::encode(info.family, &info.dst_addr)?;

    let header_len = LEGACY_HEADER_SIZE + src.len() + dst.len();
    let trailer = if config.version == 2 { LEGACY_TRAILER_SIZE } else { 0 };

    let mut frame = Vec::with_capacity(header_len + trailer + payload.len());
    frame.push(config.version);
    frame.push(header_len as u8);
    frame.push(info.family);
    frame.push(info.proto);
    frame.extend_from_slice(&info.src_port.to_be_bytes());
    frame.extend_from_slice(&info.dst_port.to_be_bytes());
    frame.extend_from_slice(src.as_slice());
    frame.extend_from_slice(dst.as_slice());

    if config.version == 2 {
        frame.extend_from_slice(&info.time_sec.to_be_bytes());
        frame.extend_from_slice(&info.time_usec.to_be_bytes());
        // Legacy interop constraint: v2 carries only the low 16 bits
        frame.extend_from_slice(&(config.capture_id as u16).to_be_bytes());
    }

    frame.extend_from_slice(payload);

    trace!("Encoded HEP v{} frame: {} bytes", config.version, frame.len());
    Ok(frame)
}
