//! Agent configuration.

use serde::{Deserialize, Serialize};

/// Transport used to reach the collector.
///
/// HEP collectors accept both; UDP is the common deployment. TLS always runs
/// over TCP regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// One frame per datagram (default)
    #[default]
    Udp,

    /// Frames written back-to-back on a stream
    Tcp,
}

/// Configuration for a [`crate::HepAgent`].
///
/// Immutable once the agent is constructed. An out-of-range `version` is
/// deliberately *not* rejected here — it surfaces as
/// [`crate::HepError::UnsupportedVersion`] at send time, matching the
/// encoder's version dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Collector hostname or IP literal
    pub host: String,

    /// Collector port
    pub port: u16,

    /// Operator-assigned capture agent identifier
    pub capture_id: u32,

    /// HEP wire version (1, 2 or 3)
    pub version: u8,

    /// Transport towards the collector
    pub transport: Transport,

    /// Wrap the connection in a TLS client handshake (forces TCP)
    pub tls: bool,

    /// Skip TLS certificate verification (DANGEROUS - dev only)
    pub tls_insecure_skip_verify: bool,

    /// Compress the capture payload (HEP v3 only; v1/v2 never compress)
    pub compress: bool,

    /// Shared-secret authentication key, emitted as an auth chunk when set
    pub password: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9060,
            capture_id: 101,
            version: 3,
            transport: Transport::Udp,
            tls: false,
            tls_insecure_skip_verify: false,
            compress: false,
            password: None,
        }
    }
}

impl AgentConfig {
    /// Collector endpoint in `host:port` form, suitable for socket address
    /// resolution. IPv6 literals are bracketed.
    pub fn collector_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// The transport actually used on the wire: TLS forces TCP.
    pub fn effective_transport(&self) -> Transport {
        if self.tls { Transport::Tcp } else { self.transport }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_agent() {
        let config = AgentConfig::default();
        assert_eq!(config.capture_id, 101);
        assert_eq!(config.version, 3);
        assert_eq!(config.transport, Transport::Udp);
        assert!(!config.tls);
        assert!(!config.compress);
        assert!(config.password.is_none());
    }

    #[test]
    fn collector_addr_brackets_ipv6_literals() {
        let config = AgentConfig { host: "2001:db8::10".to_string(), port: 9060, ..Default::default() };
        assert_eq!(config.collector_addr(), "[2001:db8::10]:9060");

        let config = AgentConfig { host: "capture.example.org".to_string(), ..Default::default() };
        assert_eq!(config.collector_addr(), "capture.example.org:9060");
    }

    #[test]
    fn tls_forces_tcp() {
        let config = AgentConfig { tls: true, transport: Transport::Udp, ..Default::default() };
        assert_eq!(config.effective_transport(), Transport::Tcp);

        let config = AgentConfig { tls: false, transport: Transport::Udp, ..Default::default() };
        assert_eq!(config.effective_transport(), Transport::Udp);
    }

    #[test]
    fn deserializes_from_partial_document() {
        // serde(default) lets deployments specify only what differs
        let config: AgentConfig =
            serde_json::from_str(r#"{"host": "10.0.0.5", "compress": true}"#).unwrap();
        assert_eq!(config.host, "10.0.0.5");
        assert!(config.compress);
        assert_eq!(config.version, 3);
    }
}
