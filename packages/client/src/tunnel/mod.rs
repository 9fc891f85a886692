//! HTTP CONNECT tunnel negotiation
//!
//! [`TunnelHandler`] is installed in a pipeline right after the transport connects.
//! It sends the CONNECT request, holds back application writes until the proxy
//! confirms the tunnel, then hands over to the caller and removes itself.

mod callback;
mod handler;
mod queue;
pub mod request;
mod state;

pub use callback::{CompletionCallback, OnConnect};
pub use handler::TunnelHandler;
pub use queue::PendingWriteQueue;
pub use state::HandshakeState;
