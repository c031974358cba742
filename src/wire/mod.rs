//! HEP wire format structures and frame construction.
//!
//! Defines the binary layout of HEP (Homer Encapsulation Protocol) frames
//! and builds complete, ready-to-send byte buffers.
//!
//! ## HEP v3 Frame Structure
//!
//! A v3 frame is self-describing: a 6-byte header followed by a sequence of
//! length-prefixed chunks.
//!
//! ```text
//! offset 0 : "HEP3"          (4 bytes, ASCII magic)
//! offset 4 : total_length     (u16 BE, header + all chunks inclusive)
//! then, per chunk:
//!   vendor_id (u16 BE) | type_id (u16 BE) | chunk_length (u16 BE) | payload
//! ```
//!
//! Chunk order is fixed: ip family, ip proto, src addr, dst addr, src port,
//! dst port, time sec, time usec, proto type, capture id, optional auth key,
//! payload. Collectors validate the top-level length before chunk-by-chunk
//! parsing, so every length field is computed from actual payload widths,
//! never hard-coded.
//!
//! ## HEP v1/v2 Frame Structure
//!
//! The legacy frame is fixed-layout with no chunk framing:
//!
//! ```text
//! version(1) | header_len(1) | family(1) | proto(1) | src_port(2 BE) | dst_port(2 BE)
//! src_addr | dst_addr                      (4+4 or 16+16 bytes)
//! [time_sec(4 BE) | time_usec(4 BE) | capture_id(2 BE)]   (v2 only)
//! raw payload
//! ```
//!
//! All multi-byte integers are big-endian in both versions.

mod chunk;
mod encoder;

pub use chunk::{CHUNK_HEADER_SIZE, Chunk, VENDOR_GENERIC, chunk_type};
pub use encoder::{HEP3_MAGIC, encode};
