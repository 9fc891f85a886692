//! Terminal builder methods

use connect_tunnel_client::{
    PipelineContext, RequestPart, Result, TunnelHandler, TunnelStream, establish_tunnel,
};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::builder::core::{ProxySet, TunnelBuilder};

impl TunnelBuilder<ProxySet> {
    /// Build a pipeline handler for an event-driven transport
    ///
    /// Early writes are already held by the returned handler and go out once the
    /// tunnel is established.
    ///
    /// # Errors
    /// Returns a configuration error if the configuration fails validation.
    pub fn handler<F>(self, on_connect: F) -> Result<TunnelHandler>
    where
        F: FnOnce(Result<&mut dyn PipelineContext>) + Send + 'static,
    {
        tracing::debug!(
            target: "connect_tunnel::builder",
            target_addr = %self.config.server,
            early_writes = self.early_writes.len(),
            "Building tunnel handler"
        );
        let early_writes = self.early_writes.into_iter().map(RequestPart::Body);
        Ok(TunnelHandler::new(self.config, on_connect)?.with_early_writes(early_writes))
    }

    /// Perform the CONNECT handshake over `stream`, already connected to the proxy
    ///
    /// # Errors
    /// Returns the error the handshake ended with.
    pub async fn establish<T>(self, stream: T) -> Result<TunnelStream<T>>
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        tracing::debug!(
            target: "connect_tunnel::builder",
            target_addr = %self.config.server,
            early_writes = self.early_writes.len(),
            "Establishing tunnel"
        );
        establish_tunnel(stream, self.config, self.early_writes).await
    }
}
