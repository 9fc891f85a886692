//! Connection configuration for CONNECT tunnels
//!
//! Immutable value types describing the tunnel target, the forward proxy in front of
//! it, and handshake tuning (client identifier and deadline).

pub mod builders;
pub mod defaults;
mod duration_millis;
pub mod types;
pub mod validation;

pub use defaults::{DEFAULT_HANDSHAKE_TIMEOUT, DEFAULT_MAX_HEAD_SIZE, DEFAULT_USER_AGENT};
pub use types::{ConnectionConfig, HandshakeConfig, ProxyConfig, ServerAddress};
