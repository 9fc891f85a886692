//! Core configuration structures
//!
//! Field definitions for the target server, the forward proxy and the handshake.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Host and port of an endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerAddress {
    /// Host name or IP literal
    pub address: String,

    /// TCP port
    pub port: u16,
}

impl ServerAddress {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// `host:port` form used for the CONNECT request target and `Host` header.
    ///
    /// IPv6 literals are bracketed.
    #[must_use]
    pub fn authority(&self) -> String {
        if self.address.contains(':') && !self.address.starts_with('[') {
            format!("[{}]:{}", self.address, self.port)
        } else {
            format!("{}:{}", self.address, self.port)
        }
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.authority())
    }
}

/// Forward proxy the tunnel is negotiated through
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Proxy host name or IP literal
    pub address: String,

    /// Proxy port
    pub port: u16,

    /// Basic auth user, only used together with `password`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Basic auth password, only used together with `username`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProxyConfig {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
            username: None,
            password: None,
        }
    }

    /// Credentials, present only when both user and password are configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> ServerAddress {
        ServerAddress::new(self.address.clone(), self.port)
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("address", &self.address)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Handshake tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandshakeConfig {
    /// Value of the `User-Agent` header on the CONNECT request
    pub user_agent: String,

    /// Deadline for the whole handshake, measured from transport activation.
    /// `None` waits indefinitely.
    #[serde(rename = "timeout_ms", with = "super::duration_millis")]
    pub timeout: Option<Duration>,
}

/// Everything a tunnel handler needs to know about one connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Target the tunnel should reach
    pub server: ServerAddress,

    /// Proxy to tunnel through; required by `TunnelHandler`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,

    #[serde(default)]
    pub handshake: HandshakeConfig,
}

impl ConnectionConfig {
    pub fn new(server: ServerAddress) -> Self {
        Self {
            server,
            proxy: None,
            handshake: HandshakeConfig::default(),
        }
    }

    /// Load a configuration from its JSON form.
    ///
    /// # Errors
    /// Returns a configuration error if the document does not parse or fails validation.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(crate::error::configuration)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize this configuration to JSON. Passwords are included.
    ///
    /// # Errors
    /// Returns a configuration error if serialization fails.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(crate::error::configuration)
    }
}
