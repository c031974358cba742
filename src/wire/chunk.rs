//! HEP v3 chunk model.

/// Vendor id for standard (generic) chunks.
pub const VENDOR_GENERIC: u16 = 0x0000;

/// Size in bytes of a chunk header: vendor id + type id + length, u16 each.
pub const CHUNK_HEADER_SIZE: usize = 6;

/// Chunk type ids defined by HEP v3.
///
/// The ids are the generic-vendor assignments; address chunks come in an
/// IPv4 and an IPv6 flavor, and the capture payload in a raw and a
/// compressed flavor — two distinct ids, not a flag.
pub mod chunk_type {
    pub const IP_FAMILY: u16 = 0x0001;
    pub const IP_PROTO: u16 = 0x0002;
    pub const SRC_IPV4: u16 = 0x0003;
    pub const DST_IPV4: u16 = 0x0004;
    pub const SRC_IPV6: u16 = 0x0005;
    pub const DST_IPV6: u16 = 0x0006;
    pub const SRC_PORT: u16 = 0x0007;
    pub const DST_PORT: u16 = 0x0008;
    pub const TIME_SEC: u16 = 0x0009;
    pub const TIME_USEC: u16 = 0x000a;
    pub const PROTO_TYPE: u16 = 0x000b;
    pub const CAPTURE_ID: u16 = 0x000c;
    pub const AUTH_KEY: u16 = 0x000e;
    pub const PAYLOAD_RAW: u16 = 0x000f;
    pub const PAYLOAD_COMPRESSED: u16 = 0x0010;
}

/// One tagged sub-record of a HEP v3 frame.
///
/// Transient: chunks exist only while a frame is being built. The declared
/// length is always derived from the actual payload width — recomputed per
/// chunk, so variable-width payloads (addresses, auth key, capture payload)
/// can never drift out of sync with their length field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub vendor: u16,
    pub type_id: u16,
    pub payload: Vec<u8>,
}

impl Chunk {
    /// Create a standard (generic-vendor) chunk.
    pub fn standard(type_id: u16, payload: Vec<u8>) -> Self {
        Self { vendor: VENDOR_GENERIC, type_id, payload }
    }

    /// The chunk's self-declared total length: header plus payload.
    pub fn declared_len(&self) -> usize {
        CHUNK_HEADER_SIZE + self.payload.len()
    }

    /// Append the chunk to a frame buffer, big-endian header first.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.vendor.to_be_bytes());
        out.extend_from_slice(&self.type_id.to_be_bytes());
        out.extend_from_slice(&(self.declared_len() as u16).to_be_bytes());
        out.extend_from_slice(&self.payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_length_is_header_plus_payload() {
        assert_eq!(Chunk::standard(chunk_type::IP_FAMILY, vec![2]).declared_len(), 7);
        assert_eq!(Chunk::standard(chunk_type::SRC_PORT, vec![0x13, 0xc4]).declared_len(), 8);
        assert_eq!(Chunk::standard(chunk_type::SRC_IPV6, vec![0; 16]).declared_len(), 22);
    }

    #[test]
    fn wire_bytes_are_big_endian() {
        let chunk = Chunk::standard(chunk_type::CAPTURE_ID, 2001u32.to_be_bytes().to_vec());
        let mut out = Vec::new();
        chunk.write_to(&mut out);

        assert_eq!(
            out,
            [
                0x00, 0x00, // vendor
                0x00, 0x0c, // type: capture id
                0x00, 0x0a, // length: 6 + 4
                0x00, 0x00, 0x07, 0xd1, // 2001
            ]
        );
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn written_length_matches_declared_length(
                type_id in 0x0001u16..=0x0010u16,
                payload in prop::collection::vec(any::<u8>(), 0..512),
            ) {
                let chunk = Chunk::standard(type_id, payload.clone());
                let mut out = Vec::new();
                chunk.write_to(&mut out);

                prop_assert_eq!(out.len(), chunk.declared_len());
                prop_assert_eq!(chunk.declared_len(), CHUNK_HEADER_SIZE + payload.len());

                // The length field self-describes the whole chunk
                let declared = u16::from_be_bytes([out[4], out[5]]) as usize;
                prop_assert_eq!(declared, out.len());
            }
        }
    }
}
