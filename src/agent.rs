//! The capture agent: composition root tying codecs, encoder and transport.

use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::codec::compress;
use crate::error::{HepError, Result};
use crate::transport::TransportSession;
use crate::types::{AgentConfig, ConnectionInfo};
use crate::wire;

/// Snapshot of the agent's accumulated counters.
///
/// The counters are the agent's only per-call diagnostic surface: callers
/// needing per-failure detail use [`HepAgent::try_send`] instead of
/// [`HepAgent::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentStats {
    /// Frames confirmed handed to the transport
    pub packets_sent: u64,
    /// Connection attempts that failed or timed out
    pub connect_failures: u64,
}

/// HEP capture agent.
///
/// Holds the configuration, the counters and the single transport session.
/// The encoder and codecs are pure and reentrant; only the session is shared
/// mutable state, confined behind a mutex that serializes state transitions
/// and the I/O wait itself — concurrent senders block one at a time through
/// that serialization point, with no queueing layer in between.
///
/// # Example
///
/// ```rust,no_run
/// use hepline::{AgentConfig, ConnectionInfo, HepAgent, payload_type};
///
/// #[tokio::main]
/// async fn main() {
///     let agent = HepAgent::new(AgentConfig {
///         host: "capture.example.org".to_string(),
///         port: 9060,
///         ..Default::default()
///     });
///
///     let info = ConnectionInfo::udp_ipv4("192.168.1.1", 5060, "192.168.1.2", 5060, payload_type::SIP)
///         .with_current_time();
///
///     if !agent.send(&info, b"INVITE sip:alice@example.org SIP/2.0\r\n").await {
///         eprintln!("send failed; {} connect failures", agent.stats().connect_failures);
///     }
/// }
/// ```
pub struct HepAgent {
    config: Arc<AgentConfig>,
    session: Mutex<TransportSession>,
    packets_sent: AtomicU64,
    connect_failures: AtomicU64,
}

impl HepAgent {
    /// Create an agent. No connection is attempted until the first send (or
    /// an explicit [`Self::connect`]).
    pub fn new(config: AgentConfig) -> Self {
        let config = Arc::new(config);
        let session = TransportSession::new(Arc::clone(&config));
        Self {
            config,
            session: Mutex::new(session),
            packets_sent: AtomicU64::new(0),
            connect_failures: AtomicU64::new(0),
        }
    }

    /// Create an agent with a non-default connection-establishment bound.
    pub fn with_connect_timeout(config: AgentConfig, bound: Duration) -> Self {
        let config = Arc::new(config);
        let session = TransportSession::new(Arc::clone(&config)).with_connect_timeout(bound);
        Self {
            config,
            session: Mutex::new(session),
            packets_sent: AtomicU64::new(0),
            connect_failures: AtomicU64::new(0),
        }
    }

    /// The agent's configuration.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Eagerly establish the collector connection.
    ///
    /// Optional — sends connect on demand — but lets deployments front-load
    /// the handshake cost (and TLS certificate surprises) at startup.
    pub async fn connect(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        session.ensure_connected().await.inspect_err(|e| self.count_connect_failure(e))
    }

    /// Tear down the collector connection. The next send reconnects.
    pub async fn disconnect(&self) {
        self.session.lock().await.disconnect();
    }

    /// Encode and transmit one captured event, reporting success as a bool.
    ///
    /// Every failure mode — encoding or transport — reduces to `false` here;
    /// diagnostics beyond the counters are available through
    /// [`Self::try_send`].
    pub async fn send(&self, info: &ConnectionInfo, payload: &[u8]) -> bool {
        match self.try_send(info, payload).await {
            Ok(()) => true,
            Err(e) => {
                debug!("Send failed: {}", e);
                false
            }
        }
    }

    /// Encode and transmit one captured event, surfacing the error value.
    pub async fn try_send(&self, info: &ConnectionInfo, payload: &[u8]) -> Result<()> {
        // Compression applies to v3 only; a codec failure silently falls
        // back to the raw payload chunk type
        let (bytes, compressed): (Cow<'_, [u8]>, bool) =
            if self.config.compress && self.config.version == 3 {
                match compress::deflate(payload) {
                    Some(deflated) => (Cow::Owned(deflated), true),
                    None => (Cow::Borrowed(payload), false),
                }
            } else {
                (Cow::Borrowed(payload), false)
            };

        let frame = wire::encode(&self.config, info, &bytes, compressed)?;

        let mut session = self.session.lock().await;
        match session.send(&frame).await {
            Ok(()) => {
                self.packets_sent.fetch_add(1, Ordering::Relaxed);
                trace!("Sent {}-byte HEP v{} frame", frame.len(), self.config.version);
                Ok(())
            }
            Err(e) => {
                self.count_connect_failure(&e);
                Err(e)
            }
        }
    }

    /// Snapshot the accumulated counters.
    pub fn stats(&self) -> AgentStats {
        AgentStats {
            packets_sent: self.packets_sent.load(Ordering::Relaxed),
            connect_failures: self.connect_failures.load(Ordering::Relaxed),
        }
    }

    fn count_connect_failure(&self, error: &HepError) {
        if matches!(
            error,
            HepError::Connection { .. } | HepError::Timeout { .. } | HepError::Tls { .. }
        ) {
            self.connect_failures.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::payload_type;

    fn sip_info() -> ConnectionInfo {
        ConnectionInfo::udp_ipv4("192.168.1.1", 5060, "192.168.1.2", 5060, payload_type::SIP)
    }

    #[test]
    fn counters_start_at_zero() {
        let agent = HepAgent::new(AgentConfig::default());
        let stats = agent.stats();
        assert_eq!(stats.packets_sent, 0);
        assert_eq!(stats.connect_failures, 0);
    }

    #[tokio::test]
    async fn encoding_errors_do_not_count_as_connect_failures() {
        let agent = HepAgent::new(AgentConfig { version: 9, ..Default::default() });
        assert!(!agent.send(&sip_info(), b"payload").await);

        let stats = agent.stats();
        assert_eq!(stats.packets_sent, 0);
        assert_eq!(stats.connect_failures, 0);
    }

    #[tokio::test]
    async fn try_send_surfaces_the_error_value() {
        let agent = HepAgent::new(AgentConfig { version: 9, ..Default::default() });
        let err = agent.try_send(&sip_info(), b"payload").await.unwrap_err();
        assert!(matches!(err, HepError::UnsupportedVersion { version: 9 }));
    }

    #[tokio::test]
    async fn bad_capture_address_fails_the_send() {
        let agent = HepAgent::new(AgentConfig::default());
        let info = ConnectionInfo { src_addr: "not-an-ip".to_string(), ..sip_info() };
        assert!(!agent.send(&info, b"payload").await);
        assert_eq!(agent.stats().packets_sent, 0);
    }
}
