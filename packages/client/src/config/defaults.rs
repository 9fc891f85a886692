//! Default values for tunnel configuration

use std::time::Duration;

use super::types::HandshakeConfig;

/// Client identifier sent in the `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("connect-tunnel/", env!("CARGO_PKG_VERSION"));

/// Handshake deadline applied unless the caller overrides it.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest proxy response head accepted by the stream driver.
pub const DEFAULT_MAX_HEAD_SIZE: usize = 8 * 1024;

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Some(DEFAULT_HANDSHAKE_TIMEOUT),
        }
    }
}
