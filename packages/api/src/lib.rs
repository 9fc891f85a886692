//! Connect Tunnel Public API
//!
//! Fluent entry point for tunnelling through an HTTP forward proxy with CONNECT.
//! The proxy is part of the builder's type: only a builder that has been given a
//! proxy can produce a handler or drive a handshake.
//!
//! ```no_run
//! use connect_tunnel::Tunnel;
//! use tokio::net::TcpStream;
//!
//! # async fn run() -> connect_tunnel::Result<()> {
//! let stream = TcpStream::connect("proxy.local:8080").await?;
//! let tunnel = Tunnel::to("example.com", 443)
//!     .via_proxy("proxy.local", 8080)
//!     .basic_auth("alice", "secret")
//!     .establish(stream)
//!     .await?;
//! # drop(tunnel);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

pub use builder::*;

// Re-export the types callers work with from the client package
pub use connect_tunnel_client::{
    ConnectionConfig, Error, HandshakeConfig, HandshakeState, Kind, PipelineContext, ProxyConfig,
    RequestHead, RequestPart, ResponseHead, ResponsePart, Result, ServerAddress, TunnelHandler,
    TunnelStream, WritePromise,
};

/// Main entry point providing static builder methods
pub struct Tunnel;

impl Tunnel {
    /// Start building a tunnel to `host:port`
    ///
    /// Shorthand for `TunnelBuilder::new(host, port)`
    pub fn to(host: impl Into<String>, port: u16) -> TunnelBuilder<ProxyNotSet> {
        TunnelBuilder::new(host, port)
    }
}

/// Start building a tunnel to `host:port`
///
/// Shorthand for `TunnelBuilder::new(host, port)`
pub fn to(host: impl Into<String>, port: u16) -> TunnelBuilder<ProxyNotSet> {
    TunnelBuilder::new(host, port)
}
