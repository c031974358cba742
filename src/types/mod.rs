//! Core types for HEP capture forwarding.
//!
//! This module provides the foundational data structures of the library:
//! - [`AgentConfig`] describes the collector endpoint and wire options,
//!   constructed once and shared for the agent's whole lifetime
//! - [`ConnectionInfo`] describes one captured network event (addresses,
//!   ports, timestamps, payload-type tag), constructed per send
//! - [`Transport`] selects UDP or TCP towards the collector
//! - [`payload_type`] exposes the well-known payload-type tags as constants;
//!   the enumeration is open and the encoder treats the tag as opaque
//!
//! Both value types derive serde traits so embedders can load them from
//! whatever configuration format they already use; this crate does not
//! standardize one.

mod config;
mod connection_info;

pub use config::{AgentConfig, Transport};
pub use connection_info::{AF_INET, AF_INET6, ConnectionInfo, IPPROTO_TCP, IPPROTO_UDP, payload_type};
