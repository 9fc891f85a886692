//! Proxy authentication

use crate::builder::core::{ProxySet, TunnelBuilder};

impl TunnelBuilder<ProxySet> {
    /// Authenticate to the proxy with Basic credentials
    ///
    /// The CONNECT request then carries `Authorization: Basic <base64(user:password)>`.
    ///
    /// # Examples
    /// ```
    /// use connect_tunnel::Tunnel;
    ///
    /// let config = Tunnel::to("example.com", 443)
    ///     .via_proxy("proxy.local", 8080)
    ///     .basic_auth("alice", "secret")
    ///     .config();
    /// assert_eq!(config.proxy.unwrap().credentials(), Some(("alice", "secret")));
    /// ```
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        if let Some(proxy) = self.config.proxy.as_mut() {
            proxy.username = Some(username.into());
            proxy.password = Some(password.into());
        }
        self
    }
}
