//! Async driver running a [`TunnelHandler`](crate::tunnel::TunnelHandler) over a byte stream
//!
//! The transport (TCP, or anything else implementing `AsyncRead + AsyncWrite`) must
//! already be connected to the proxy. The driver performs the CONNECT exchange on it
//! and returns a [`TunnelStream`] positioned at the first tunnel byte.

mod driver;
mod stream;

pub use driver::establish_tunnel;
pub use stream::TunnelStream;
