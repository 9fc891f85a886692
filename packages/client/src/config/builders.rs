//! Builder methods for configuration values

use std::time::Duration;

use super::types::{ConnectionConfig, HandshakeConfig, ProxyConfig};

impl ProxyConfig {
    /// Set Basic credentials for the proxy.
    ///
    /// # Examples
    /// ```
    /// use connect_tunnel_client::config::ProxyConfig;
    ///
    /// let proxy = ProxyConfig::new("proxy.local", 8080).with_credentials("alice", "secret");
    /// assert_eq!(proxy.credentials(), Some(("alice", "secret")));
    /// ```
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

impl HandshakeConfig {
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ConnectionConfig {
    /// Route the connection through a forward proxy.
    #[must_use]
    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    #[must_use]
    pub fn with_handshake(mut self, handshake: HandshakeConfig) -> Self {
        self.handshake = handshake;
        self
    }

    /// Set the client identifier sent on the CONNECT request.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.handshake.user_agent = user_agent.into();
        self
    }

    /// Set the handshake deadline
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use connect_tunnel_client::config::{ConnectionConfig, ServerAddress};
    ///
    /// let config = ConnectionConfig::new(ServerAddress::new("example.com", 443))
    ///     .with_handshake_timeout(Some(Duration::from_secs(5)));
    /// assert_eq!(config.handshake.timeout, Some(Duration::from_secs(5)));
    /// ```
    #[must_use]
    pub fn with_handshake_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.handshake.timeout = timeout;
        self
    }
}
