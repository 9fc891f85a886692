//! Tunnel builder modules
//!
//! Fluent configuration of the target, proxy and handshake, ending in either a
//! pipeline handler or a completed handshake over a stream.

pub mod auth;
pub mod core;
pub mod establish;

pub use self::core::*;
