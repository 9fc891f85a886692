//! Configuration validation

use std::time::Duration;

use super::types::{ConnectionConfig, ServerAddress};
use crate::error::{self, Result};

fn validate_endpoint(what: &str, endpoint: &ServerAddress) -> std::result::Result<(), String> {
    if endpoint.address.trim().is_empty() {
        return Err(format!("{what} address cannot be empty"));
    }
    if endpoint.address.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(format!("{what} address contains whitespace or control characters"));
    }
    if endpoint.port == 0 {
        return Err(format!("{what} port must be greater than zero"));
    }
    Ok(())
}

impl ConnectionConfig {
    /// Check that this configuration can drive a handshake.
    ///
    /// Proxy presence is not checked here; `TunnelHandler::new` enforces it.
    ///
    /// # Errors
    /// Returns a configuration error naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        validate_endpoint("server", &self.server).map_err(error::configuration)?;

        if let Some(proxy) = &self.proxy {
            validate_endpoint("proxy", &proxy.endpoint()).map_err(error::configuration)?;
        }

        if self.handshake.user_agent.is_empty() {
            return Err(error::configuration("User agent cannot be empty"));
        }

        if self.handshake.timeout == Some(Duration::ZERO) {
            return Err(error::configuration(
                "Handshake timeout must be greater than zero",
            ));
        }

        Ok(())
    }
}
