//! Outbound transport to the HEP collector.
//!
//! A [`TransportSession`] owns at most one connection (UDP, TCP, or
//! TLS-over-TCP) and exposes connect-on-demand send semantics with a bounded
//! connection-establishment timeout. The [`Link`] trait abstracts the three
//! socket flavors behind a single whole-frame send operation.

pub mod link;
mod session;
mod tls;

pub use link::{Link, TcpLink, TlsLink, UdpLink};
pub use session::{CONNECT_TIMEOUT, SessionState, TransportSession};
