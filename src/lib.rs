//! Type-safe Rust library for HEP capture forwarding.
//!
//! Hepline encodes captured network-protocol events (SIP messages, RTCP
//! reports, correlated log lines) into the HEP — Homer Encapsulation
//! Protocol — wire format, versions 1 through 3, and ships the frames to a
//! collector over UDP, TCP, or TLS.
//!
//! # Features
//!
//! - **Byte-exact encoding**: big-endian chunked HEP v3 frames and the
//!   legacy v1/v2 fixed layout, with self-described lengths computed from
//!   actual payload widths
//! - **Three transports**: UDP datagrams, TCP streams, TLS client sessions
//!   with connect-on-demand semantics and a bounded establishment timeout
//! - **Optional payload compression** (v3) and shared-secret authentication
//! - **Concurrency-safe**: pure reentrant encoder, one mutex-confined
//!   connection
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hepline::{AgentConfig, ConnectionInfo, HepAgent, payload_type};
//!
//! #[tokio::main]
//! async fn main() {
//!     let agent = HepAgent::new(AgentConfig {
//!         host: "capture.example.org".to_string(),
//!         port: 9060,
//!         capture_id: 2001,
//!         ..Default::default()
//!     });
//!
//!     let info = ConnectionInfo::udp_ipv4(
//!         "192.168.1.1", 5060,
//!         "192.168.1.2", 5060,
//!         payload_type::SIP,
//!     )
//!     .with_current_time();
//!
//!     let delivered = agent.send(&info, b"INVITE sip:alice@example.org SIP/2.0\r\n").await;
//!     println!("delivered: {delivered}, stats: {:?}", agent.stats());
//! }
//! ```

// Core types and error handling
mod agent;
mod error;
pub mod types;

// Encoding pipeline
pub mod codec;
pub mod wire;

// Collector transport
pub mod transport;

// Core exports
pub use agent::{AgentStats, HepAgent};
pub use error::{HepError, Result};
pub use types::{
    AF_INET, AF_INET6, AgentConfig, ConnectionInfo, IPPROTO_TCP, IPPROTO_UDP, Transport,
    payload_type,
};

// Wire-level exports for callers building or inspecting frames directly
pub use wire::{Chunk, chunk_type, encode};

// Transport exports
pub use transport::{CONNECT_TIMEOUT, SessionState, TransportSession};
