//! Transport session state machine.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::link::{self, Link, TcpLink, TlsLink, UdpLink};
use crate::error::{HepError, Result};
use crate::types::{AgentConfig, Transport};

/// Default bound on connection establishment.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Lifecycle state of the single outbound connection.
///
/// Failures and timeouts collapse back to `Unconnected` after teardown, so a
/// subsequent send always starts a fresh attempt rather than inheriting a
/// half-open handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unconnected,
    Connecting,
    Ready,
}

/// Owns the single outbound connection to the collector.
///
/// All state transitions must be serialized by the caller;
/// [`crate::HepAgent`] confines the session behind a mutex and serializes
/// the I/O wait along with it. There is no background reconnect loop: every
/// send that observes a non-ready session attempts exactly one fresh
/// connection synchronously.
pub struct TransportSession {
    config: Arc<AgentConfig>,
    link: Option<Box<dyn Link>>,
    state: SessionState,
    connect_timeout: Duration,
}

impl TransportSession {
    pub fn new(config: Arc<AgentConfig>) -> Self {
        Self { config, link: None, state: SessionState::Unconnected, connect_timeout: CONNECT_TIMEOUT }
    }

    /// Override the connection-establishment bound. Primarily for tests and
    /// deployments with unusually slow or fast collector paths.
    pub fn with_connect_timeout(mut self, bound: Duration) -> Self {
        self.connect_timeout = bound;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    /// Establish the outbound connection unless already ready.
    ///
    /// Blocks the calling task until Ready, a failure, or the timeout bound.
    /// A timeout or failure tears down the half-open connection before
    /// returning, leaving the session `Unconnected`.
    pub async fn ensure_connected(&mut self) -> Result<()> {
        if self.state == SessionState::Ready {
            return Ok(());
        }

        self.state = SessionState::Connecting;
        debug!("Connecting to collector at {}", self.config.collector_addr());

        match timeout(self.connect_timeout, Self::establish(&self.config)).await {
            Ok(Ok(link)) => {
                info!("Collector connection ready ({})", link.kind());
                self.link = Some(link);
                self.state = SessionState::Ready;
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("Collector connection failed: {}", e);
                self.reset();
                Err(e)
            }
            Err(_) => {
                // Dropping the establish future releases the half-open socket
                warn!("Collector connection timed out after {:?}", self.connect_timeout);
                self.reset();
                Err(HepError::Timeout { duration: self.connect_timeout })
            }
        }
    }

    async fn establish(config: &AgentConfig) -> Result<Box<dyn Link>> {
        let peer = link::resolve(&config.collector_addr()).await?;

        let link: Box<dyn Link> = match config.effective_transport() {
            Transport::Udp => Box::new(UdpLink::connect(peer).await?),
            Transport::Tcp if config.tls => Box::new(
                TlsLink::connect(peer, &config.host, config.tls_insecure_skip_verify).await?,
            ),
            Transport::Tcp => Box::new(TcpLink::connect(peer).await?),
        };

        Ok(link)
    }

    /// Send one frame, connecting on demand.
    ///
    /// A connection-level failure resets the session to `Unconnected`. A
    /// send failure on an already-established link leaves the link as the
    /// transport reports it; callers seeing repeated send failures
    /// disconnect explicitly and let the next send reconnect.
    pub async fn send(&mut self, frame: &[u8]) -> Result<()> {
        self.ensure_connected().await?;

        let link = match self.link.as_mut() {
            Some(link) => link,
            None => return Err(HepError::connection_failed("session has no active link")),
        };

        link.send_all(frame).await
    }

    /// Tear down the active connection. Idempotent and safe to call when
    /// already unconnected.
    pub fn disconnect(&mut self) {
        if self.link.take().is_some() {
            debug!("Disconnected from collector");
        }
        self.state = SessionState::Unconnected;
    }

    fn reset(&mut self) {
        self.link = None;
        self.state = SessionState::Unconnected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::{TcpListener, UdpSocket};

    fn session_for(host: &str, port: u16, transport: Transport) -> TransportSession {
        let config =
            AgentConfig { host: host.to_string(), port, transport, ..AgentConfig::default() };
        TransportSession::new(Arc::new(config))
    }

    #[tokio::test]
    async fn udp_session_becomes_ready_on_demand() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut session = session_for("127.0.0.1", port, Transport::Udp);
        assert_eq!(session.state(), SessionState::Unconnected);

        session.send(b"frame").await.unwrap();
        assert!(session.is_ready());

        let mut buf = [0u8; 16];
        let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..len], b"frame");
    }

    #[tokio::test]
    async fn ensure_connected_is_a_noop_when_ready() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut session = session_for("127.0.0.1", port, Transport::Udp);
        session.ensure_connected().await.unwrap();
        session.ensure_connected().await.unwrap();
        assert!(session.is_ready());
    }

    #[tokio::test]
    async fn refused_connection_resets_to_unconnected() {
        // Reserve a port, then close it so connects are refused
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let mut session = session_for("127.0.0.1", port, Transport::Tcp);
        let err = session.send(b"frame").await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(session.state(), SessionState::Unconnected);
    }

    #[tokio::test]
    async fn failed_session_reconnects_fresh() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut session = session_for("127.0.0.1", addr.port(), Transport::Tcp);
        assert!(session.send(b"first").await.is_err());
        assert_eq!(session.state(), SessionState::Unconnected);

        // Collector comes back on the same port; the very next send succeeds
        let listener = TcpListener::bind(addr).await.unwrap();
        let accept = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            stream.read_to_end(&mut buf).await.unwrap();
            buf
        });

        session.send(b"second").await.unwrap();
        assert!(session.is_ready());
        session.disconnect();

        assert_eq!(accept.await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn disconnect_is_idempotent() {
        let mut session = session_for("127.0.0.1", 1, Transport::Udp);
        session.disconnect();
        session.disconnect();
        assert_eq!(session.state(), SessionState::Unconnected);
    }
}
