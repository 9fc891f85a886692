//! CONNECT request construction

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::{AUTHORIZATION, HOST, HeaderName, HeaderValue, USER_AGENT};
use http::{Method, Uri};

use crate::config::{ProxyConfig, ServerAddress};
use crate::error::{self, Result};
use crate::pipeline::RequestHead;

/// `Proxy-Connection` is not in `http::header`.
pub const PROXY_CONNECTION: HeaderName = HeaderName::from_static("proxy-connection");

/// Encode credentials as a `Basic` authorization value, marked sensitive.
///
/// # Errors
/// Returns a configuration error if the encoded value is not a valid header value.
pub fn basic_auth(username: &str, password: &str) -> Result<HeaderValue> {
    let encoded = STANDARD.encode(format!("{username}:{password}"));
    let mut value =
        HeaderValue::from_str(&format!("Basic {encoded}")).map_err(error::configuration)?;
    value.set_sensitive(true);
    Ok(value)
}

/// Build the CONNECT request head for `server`, sent to `proxy`.
///
/// # Errors
/// Returns a configuration error if the target or user agent cannot be
/// represented on the wire.
pub fn connect_head(
    server: &ServerAddress,
    proxy: &ProxyConfig,
    user_agent: &str,
) -> Result<RequestHead> {
    let authority = server.authority();
    let uri = Uri::try_from(authority.as_str()).map_err(error::configuration)?;

    let mut head = RequestHead::new(Method::CONNECT, uri);
    head.headers.insert(
        HOST,
        HeaderValue::from_str(&authority).map_err(error::configuration)?,
    );
    head.headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).map_err(error::configuration)?,
    );
    head.headers
        .insert(PROXY_CONNECTION, HeaderValue::from_static("Keep-Alive"));

    if let Some((username, password)) = proxy.credentials() {
        head.headers.insert(AUTHORIZATION, basic_auth(username, password)?);
    }

    Ok(head)
}

#[cfg(test)]
mod tests {
    use http::Version;

    use super::*;

    #[test]
    fn basic_auth_encodes_user_and_password() {
        let value = basic_auth("alice", "secret").unwrap();
        assert_eq!(value, "Basic YWxpY2U6c2VjcmV0");
        assert!(value.is_sensitive());
    }

    #[test]
    fn head_targets_server_authority() {
        let head = connect_head(
            &ServerAddress::new("example.com", 443),
            &ProxyConfig::new("proxy.local", 8080),
            "test-agent/1.0",
        )
        .unwrap();

        assert_eq!(head.method, Method::CONNECT);
        assert_eq!(head.version, Version::HTTP_11);
        assert_eq!(head.uri.to_string(), "example.com:443");
        assert_eq!(head.headers[HOST], "example.com:443");
        assert_eq!(head.headers[USER_AGENT], "test-agent/1.0");
        assert_eq!(head.headers[&PROXY_CONNECTION], "Keep-Alive");
        assert!(!head.headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn partial_credentials_send_no_authorization() {
        let mut proxy = ProxyConfig::new("proxy.local", 8080);
        proxy.username = Some("alice".to_string());

        let head =
            connect_head(&ServerAddress::new("example.com", 443), &proxy, "ua").unwrap();
        assert!(!head.headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn ipv6_target_is_bracketed() {
        let head = connect_head(
            &ServerAddress::new("::1", 8443),
            &ProxyConfig::new("proxy.local", 8080),
            "ua",
        )
        .unwrap();
        assert_eq!(head.headers[HOST], "[::1]:8443");
    }

    #[test]
    fn invalid_user_agent_is_configuration_error() {
        let err = connect_head(
            &ServerAddress::new("example.com", 443),
            &ProxyConfig::new("proxy.local", 8080),
            "bad\nagent",
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }
}
