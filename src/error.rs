//! Error types for HEP encoding and transport.
//!
//! All errors implement the `std::error::Error` trait and carry structured
//! context. Every failure the library can produce reduces to a [`HepError`];
//! at the [`crate::HepAgent::send`] boundary they further reduce to a boolean
//! plus counters, so nothing in this module ever crosses the agent surface as
//! a panic.
//!
//! ## Error Categories
//!
//! - **Encoding Errors**: unsupported wire version, unparseable or mismatched
//!   addresses, unsupported address family, oversized frames
//! - **Connection Errors**: collector unreachable, TLS handshake failures,
//!   connection-establishment timeout
//! - **Send Errors**: an established link rejecting bytes mid-write
//!
//! ## Recovery and Retry
//!
//! Errors classify themselves for retry:
//!
//! ```rust
//! use hepline::HepError;
//!
//! let error = HepError::connection_failed("collector unreachable");
//! assert!(error.is_retryable());
//!
//! let error = HepError::UnsupportedVersion { version: 7 };
//! assert!(!error.is_retryable());
//! ```

use std::time::Duration;
use thiserror::Error;

/// Result type alias for HEP operations.
pub type Result<T, E = HepError> = std::result::Result<T, E>;

/// Main error type for HEP encoding and transport operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HepError {
    #[error("Unsupported HEP version {version} (supported: 1, 2, 3)")]
    UnsupportedVersion { version: u8 },

    #[error("Unsupported address family {family} (supported: 2 = IPv4, 30 = IPv6)")]
    UnsupportedFamily { family: u8 },

    #[error("Address '{address}' does not parse under family {family}")]
    InvalidAddress {
        family: u8,
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Frame of {size} bytes exceeds the {max}-byte limit of the length field")]
    FrameTooLarge { size: usize, max: usize },

    #[error("Failed to connect to collector: {reason}")]
    Connection {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Connection establishment timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("TLS configuration error: {reason}")]
    Tls { reason: String },

    #[error("Transport rejected frame")]
    Send {
        #[source]
        source: std::io::Error,
    },
}

impl HepError {
    /// Returns whether this error is potentially recoverable through retry.
    ///
    /// Encoding errors are deterministic and will fail identically on retry;
    /// transport errors may succeed on a fresh connection attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            HepError::Connection { .. } => true,
            HepError::Timeout { .. } => true,
            HepError::Send { .. } => true,
            HepError::UnsupportedVersion { .. } => false,
            HepError::UnsupportedFamily { .. } => false,
            HepError::InvalidAddress { .. } => false,
            HepError::FrameTooLarge { .. } => false,
            HepError::Tls { .. } => false,
        }
    }

    /// Helper constructor for connection errors.
    pub fn connection_failed(reason: impl Into<String>) -> Self {
        HepError::Connection { reason: reason.into(), source: None }
    }

    /// Helper constructor for connection errors with source.
    pub fn connection_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        HepError::Connection { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for address parse errors.
    pub fn invalid_address(
        family: u8,
        address: impl Into<String>,
        source: std::net::AddrParseError,
    ) -> Self {
        HepError::InvalidAddress { family, address: address.into(), source }
    }
}

// A bare io::Error only reaches us from an already-established link
impl From<std::io::Error> for HepError {
    fn from(err: std::io::Error) -> Self {
        HepError::Send { source: err }
    }
}
