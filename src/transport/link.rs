//! Outbound link implementations for the three collector transports.

use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpStream, UdpSocket, lookup_host};
use tokio_rustls::TlsConnector;
use tracing::debug;

use super::tls;
use crate::error::{HepError, Result};

/// A ready outbound byte path to the collector.
///
/// Implementations abstract over datagram and stream sockets and handle
/// their own framing needs: UDP maps one frame to one datagram, while the
/// stream transports write frames back-to-back (HEP v3 frames self-describe
/// their length, so collectors reassemble them from the stream).
#[async_trait]
pub trait Link: Send {
    /// Hand one whole frame to the transport.
    ///
    /// Either the complete frame is accepted or an error is returned; a
    /// partial hand-off is never reported as success.
    async fn send_all(&mut self, frame: &[u8]) -> Result<()>;

    /// Transport name for diagnostics.
    fn kind(&self) -> &'static str;
}

/// Resolve the collector endpoint to a socket address.
///
/// The collector host (unlike capture addresses, which must be literals) may
/// be a DNS name; resolution failure is a connection failure.
pub(crate) async fn resolve(addr: &str) -> Result<SocketAddr> {
    let mut addrs = lookup_host(addr).await.map_err(|e| {
        HepError::connection_failed_with_source(format!("cannot resolve '{addr}'"), e.into())
    })?;

    addrs.next().ok_or_else(|| HepError::connection_failed(format!("no addresses for '{addr}'")))
}

/// Connected UDP socket; one frame per datagram.
pub struct UdpLink {
    socket: UdpSocket,
}

impl UdpLink {
    /// Bind an ephemeral local socket and connect it to the collector.
    pub async fn connect(peer: SocketAddr) -> Result<Self> {
        let bind_addr = if peer.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
            HepError::connection_failed_with_source("cannot bind local UDP socket", e.into())
        })?;
        socket.connect(peer).await.map_err(|e| {
            HepError::connection_failed_with_source(
                format!("cannot connect UDP socket to {peer}"),
                e.into(),
            )
        })?;

        debug!("UDP link ready to {}", peer);
        Ok(Self { socket })
    }
}

#[async_trait]
impl Link for UdpLink {
    async fn send_all(&mut self, frame: &[u8]) -> Result<()> {
        let sent = self.socket.send(frame).await?;
        if sent != frame.len() {
            return Err(HepError::Send {
                source: io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("short datagram write: {sent} of {} bytes", frame.len()),
                ),
            });
        }
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "udp"
    }
}

/// Plain TCP stream to the collector.
pub struct TcpLink {
    stream: TcpStream,
}

impl TcpLink {
    pub async fn connect(peer: SocketAddr) -> Result<Self> {
        let stream = TcpStream::connect(peer).await.map_err(|e| {
            HepError::connection_failed_with_source(format!("cannot connect to {peer}"), e.into())
        })?;

        debug!("TCP link ready to {}", peer);
        Ok(Self { stream })
    }
}

#[async_trait]
impl Link for TcpLink {
    async fn send_all(&mut self, frame: &[u8]) -> Result<()> {
        self.stream.write_all(frame).await?;
        self.stream.flush().await?;
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "tcp"
    }
}

/// TLS client stream over TCP; the handshake completes before the link is
/// handed out, so no HEP bytes ever travel pre-negotiation.
pub struct TlsLink {
    stream: tokio_rustls::client::TlsStream<TcpStream>,
}

impl TlsLink {
    pub async fn connect(peer: SocketAddr, host: &str, insecure_skip_verify: bool) -> Result<Self> {
        let stream = TcpStream::connect(peer).await.map_err(|e| {
            HepError::connection_failed_with_source(format!("cannot connect to {peer}"), e.into())
        })?;

        let connector = TlsConnector::from(Arc::new(tls::client_config(insecure_skip_verify)));
        let name = tls::server_name(host)?;
        let stream = connector
            .connect(name, stream)
            .await
            .map_err(|e| HepError::connection_failed_with_source("TLS handshake failed", e.into()))?;

        debug!("TLS link ready to {} (sni {})", peer, host);
        Ok(Self { stream })
    }
}

#[async_trait]
impl Link for TlsLink {
    async fn send_all(&mut self, frame: &[u8]) -> Result<()> {
        self.stream.write_all(frame).await?;
        self.stream.flush().await?;
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "tls"
    }
}
