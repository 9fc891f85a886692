//! # Connect Tunnel Client
//!
//! HTTP CONNECT tunnel negotiation for clients talking to a server through a
//! forward proxy.
//!
//! ## Features
//!
//! - **Pipeline handler** ([`TunnelHandler`]) that sends the CONNECT request as soon
//!   as the transport is active, holds back application writes, and removes itself
//!   once the proxy confirms the tunnel
//! - **Single completion path**: the caller's callback runs exactly once, with the
//!   pipeline on success or with the error on rejection, transport loss, timeout
//!   or a malformed reply
//! - **Handshake deadline** configured per connection
//! - **Async stream driver** ([`establish_tunnel`]) for any tokio
//!   `AsyncRead + AsyncWrite` transport
//!
//! ## Usage
//!
//! ```no_run
//! use connect_tunnel_client::{ConnectionConfig, ProxyConfig, ServerAddress, establish_tunnel};
//! use tokio::net::TcpStream;
//!
//! # async fn run() -> connect_tunnel_client::Result<()> {
//! let config = ConnectionConfig::new(ServerAddress::new("example.com", 443))
//!     .with_proxy(ProxyConfig::new("proxy.local", 8080).with_credentials("alice", "secret"));
//!
//! let stream = TcpStream::connect("proxy.local:8080").await?;
//! let tunnel = establish_tunnel(stream, config, []).await?;
//! // hand `tunnel` to TLS or an HTTP client
//! # drop(tunnel);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod connect;
pub mod error;
pub mod pipeline;
pub mod tunnel;

pub mod prelude;

pub use crate::prelude::*;
