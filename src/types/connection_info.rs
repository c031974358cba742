//! Per-event connection metadata.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// IPv4 address family code (standard `AF_INET`).
pub const AF_INET: u8 = 2;

/// IPv6 address family code (standard `AF_INET6`).
pub const AF_INET6: u8 = 30;

/// TCP protocol number (`IPPROTO_TCP`).
pub const IPPROTO_TCP: u8 = 6;

/// UDP protocol number (`IPPROTO_UDP`).
pub const IPPROTO_UDP: u8 = 17;

/// Well-known payload-type tags carried in the HEP v3 proto-type chunk.
///
/// The enumeration is open: collectors accept arbitrary tag values, and the
/// encoder forwards [`ConnectionInfo::proto_type`] as an opaque byte. These
/// constants cover the tags this library's deployments actually emit.
pub mod payload_type {
    /// SIP signalling
    pub const SIP: u8 = 1;
    /// RTCP sender/receiver reports
    pub const RTCP: u8 = 5;
    /// Raw RTP media
    pub const RTP: u8 = 10;
    /// Free-form log line correlated to a call
    pub const LOG: u8 = 100;
}

/// Metadata describing one captured network event.
///
/// One value per captured packet; the payload itself travels alongside as an
/// opaque byte slice. Address strings must be literals that parse under the
/// declared `family` — a mismatch fails the whole send, it is never coerced
/// to the other family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    /// Address family of both endpoints ([`AF_INET`] or [`AF_INET6`])
    pub family: u8,

    /// IP protocol the capture was taken from ([`IPPROTO_UDP`] or [`IPPROTO_TCP`])
    pub proto: u8,

    /// Source address literal
    pub src_addr: String,

    /// Destination address literal
    pub dst_addr: String,

    /// Source port
    pub src_port: u16,

    /// Destination port
    pub dst_port: u16,

    /// Capture timestamp, seconds since the Unix epoch
    pub time_sec: u32,

    /// Microsecond fraction of the capture timestamp
    pub time_usec: u32,

    /// Payload-type tag (see [`payload_type`])
    pub proto_type: u8,
}

impl ConnectionInfo {
    /// Build a record for an IPv4 UDP capture, the most common case.
    ///
    /// Timestamps start at zero; chain [`Self::with_current_time`] or set the
    /// fields directly for captures carrying their own clock.
    pub fn udp_ipv4(
        src_addr: impl Into<String>,
        src_port: u16,
        dst_addr: impl Into<String>,
        dst_port: u16,
        proto_type: u8,
    ) -> Self {
        Self {
            family: AF_INET,
            proto: IPPROTO_UDP,
            src_addr: src_addr.into(),
            dst_addr: dst_addr.into(),
            src_port,
            dst_port,
            time_sec: 0,
            time_usec: 0,
            proto_type,
        }
    }

    /// Stamp the record with the current wall-clock time.
    pub fn with_current_time(mut self) -> Self {
        // Saturating: a pre-1970 clock stamps zero rather than panicking
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        self.time_sec = now.as_secs() as u32;
        self.time_usec = now.subsec_micros();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn udp_ipv4_constructor_fills_family_and_proto() {
        let info = ConnectionInfo::udp_ipv4("192.168.1.1", 5060, "192.168.1.2", 5060, payload_type::SIP);
        assert_eq!(info.family, AF_INET);
        assert_eq!(info.proto, IPPROTO_UDP);
        assert_eq!(info.proto_type, 1);
        assert_eq!(info.time_sec, 0);
    }

    #[test]
    fn current_time_is_sane() {
        let info = ConnectionInfo::udp_ipv4("10.0.0.1", 1, "10.0.0.2", 2, payload_type::RTP)
            .with_current_time();
        // 2023-01-01 as a floor; microseconds bounded by definition
        assert!(info.time_sec > 1_672_531_200);
        assert!(info.time_usec < 1_000_000);
    }
}
