//! Textual IP addresses to fixed-width wire bytes.

use crate::error::{HepError, Result};
use crate::types::{AF_INET, AF_INET6};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Fixed-width binary form of an IP address, network byte order.
///
/// Exactly 4 bytes for IPv4 and 16 for IPv6 — the two widths the HEP address
/// chunks are defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressBytes {
    V4([u8; 4]),
    V6([u8; 16]),
}

impl AddressBytes {
    /// The raw octets in network byte order.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            AddressBytes::V4(octets) => octets,
            AddressBytes::V6(octets) => octets,
        }
    }

    /// Byte width on the wire (4 or 16).
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Never true — both families have a fixed nonzero width.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Parse an address literal under the declared family.
///
/// Only literal addresses are accepted — no DNS resolution. The family must
/// be [`AF_INET`] or [`AF_INET6`]; an unparseable string, or a string of the
/// *other* family, is a hard error for the whole send. There is no silent
/// coercion between families.
pub fn encode(family: u8, address: &str) -> Result<AddressBytes> {
    match family {
        AF_INET => address
            .parse::<Ipv4Addr>()
            .map(|ip| AddressBytes::V4(ip.octets()))
            .map_err(|e| HepError::invalid_address(family, address, e)),
        AF_INET6 => address
            .parse::<Ipv6Addr>()
            .map(|ip| AddressBytes::V6(ip.octets()))
            .map_err(|e| HepError::invalid_address(family, address, e)),
        other => Err(HepError::UnsupportedFamily { family: other }),
    }
}
