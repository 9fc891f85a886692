//! Core `TunnelBuilder` structure and base functionality

use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use bytes::Bytes;
use connect_tunnel_client::{ConnectionConfig, ProxyConfig, ServerAddress};

/// State marker indicating no proxy has been set
#[derive(Debug, Clone, Copy)]
pub struct ProxyNotSet;

/// State marker indicating a proxy has been set
#[derive(Debug, Clone, Copy)]
pub struct ProxySet;

/// Fluent builder for a CONNECT tunnel
///
/// Generic over whether a proxy has been configured; `establish` and `handler`
/// exist only on `TunnelBuilder<ProxySet>`.
#[derive(Clone)]
pub struct TunnelBuilder<P = ProxyNotSet> {
    pub(crate) config: ConnectionConfig,
    pub(crate) early_writes: Vec<Bytes>,
    state: PhantomData<P>,
}

impl TunnelBuilder<ProxyNotSet> {
    /// Create a builder targeting `host:port`
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            config: ConnectionConfig::new(ServerAddress::new(host, port)),
            early_writes: Vec::new(),
            state: PhantomData,
        }
    }

    /// Route the tunnel through the forward proxy at `host:port`
    ///
    /// # Examples
    /// ```
    /// use connect_tunnel::Tunnel;
    ///
    /// let config = Tunnel::to("example.com", 443)
    ///     .via_proxy("proxy.local", 8080)
    ///     .config();
    /// assert_eq!(config.proxy.unwrap().port, 8080);
    /// ```
    #[must_use]
    pub fn via_proxy(self, host: impl Into<String>, port: u16) -> TunnelBuilder<ProxySet> {
        TunnelBuilder {
            config: self.config.with_proxy(ProxyConfig::new(host, port)),
            early_writes: self.early_writes,
            state: PhantomData,
        }
    }
}

impl<P> TunnelBuilder<P> {
    /// Set the client identifier sent in the CONNECT request's `User-Agent`
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.handshake.user_agent = user_agent.into();
        self
    }

    /// Set the handshake deadline
    ///
    /// The clock starts when the CONNECT request is sent.
    #[must_use]
    pub fn handshake_timeout(mut self, timeout: Duration) -> Self {
        self.config.handshake.timeout = Some(timeout);
        self
    }

    /// Wait for the proxy indefinitely
    #[must_use]
    pub fn no_timeout(mut self) -> Self {
        self.config.handshake.timeout = None;
        self
    }

    /// Queue application bytes to send as soon as the tunnel is up
    ///
    /// Written in call order, after the proxy confirms the tunnel.
    #[must_use]
    pub fn early_write(mut self, data: impl Into<Bytes>) -> Self {
        self.early_writes.push(data.into());
        self
    }

    /// Snapshot of the configuration built so far
    #[must_use]
    pub fn config(&self) -> ConnectionConfig {
        self.config.clone()
    }
}

impl<P> fmt::Debug for TunnelBuilder<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TunnelBuilder")
            .field("config", &self.config)
            .field("early_writes", &self.early_writes.len())
            .finish()
    }
}
