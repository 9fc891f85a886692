use std::time::Duration;

use connect_tunnel_client::config::{DEFAULT_HANDSHAKE_TIMEOUT, DEFAULT_USER_AGENT};
use connect_tunnel_client::{ConnectionConfig, HandshakeConfig, ProxyConfig, ServerAddress};

#[test]
fn minimal_json_gets_defaults() {
    let config = ConnectionConfig::from_json(
        r#"{
            "server": { "address": "example.com", "port": 443 },
            "proxy": { "address": "proxy.local", "port": 8080 }
        }"#,
    )
    .unwrap();

    assert_eq!(config.server, ServerAddress::new("example.com", 443));
    let proxy = config.proxy.as_ref().unwrap();
    assert_eq!(proxy.credentials(), None);
    assert_eq!(config.handshake.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(config.handshake.timeout, Some(DEFAULT_HANDSHAKE_TIMEOUT));
}

#[test]
fn json_handshake_section_uses_milliseconds() {
    let config = ConnectionConfig::from_json(
        r#"{
            "server": { "address": "example.com", "port": 443 },
            "proxy": { "address": "proxy.local", "port": 8080,
                       "username": "alice", "password": "secret" },
            "handshake": { "user_agent": "svc/2", "timeout_ms": 1500 }
        }"#,
    )
    .unwrap();

    assert_eq!(
        config.proxy.as_ref().unwrap().credentials(),
        Some(("alice", "secret"))
    );
    assert_eq!(config.handshake.user_agent, "svc/2");
    assert_eq!(config.handshake.timeout, Some(Duration::from_millis(1500)));

    let json = config.to_json().unwrap();
    assert!(json.contains("\"timeout_ms\":1500"));
    assert_eq!(ConnectionConfig::from_json(&json).unwrap(), config);
}

#[test]
fn null_timeout_disables_deadline() {
    let config = ConnectionConfig::from_json(
        r#"{
            "server": { "address": "example.com", "port": 443 },
            "handshake": { "timeout_ms": null }
        }"#,
    )
    .unwrap();
    assert_eq!(config.handshake.timeout, None);
    assert!(config.proxy.is_none());
}

#[test]
fn invalid_json_is_configuration_error() {
    let err = ConnectionConfig::from_json(r#"{ "server": "example.com" }"#).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn validation_rejects_bad_fields() {
    let base = ConnectionConfig::new(ServerAddress::new("example.com", 443))
        .with_proxy(ProxyConfig::new("proxy.local", 8080));
    assert!(base.validate().is_ok());

    let cases = [
        ConnectionConfig {
            server: ServerAddress::new("", 443),
            ..base.clone()
        },
        ConnectionConfig {
            server: ServerAddress::new("exa mple.com", 443),
            ..base.clone()
        },
        base.clone().with_proxy(ProxyConfig::new("proxy.local", 0)),
        base.clone().with_user_agent(""),
        base.clone().with_handshake_timeout(Some(Duration::ZERO)),
    ];

    for config in cases {
        let err = config.validate().unwrap_err();
        assert!(err.is_configuration(), "{config:?} should be rejected");
    }
}

#[test]
fn debug_output_hides_password() {
    let proxy = ProxyConfig::new("proxy.local", 8080).with_credentials("alice", "secret");
    let rendered = format!("{proxy:?}");
    assert!(rendered.contains("alice"));
    assert!(!rendered.contains("secret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn authority_brackets_ipv6() {
    assert_eq!(ServerAddress::new("2001:db8::1", 443).authority(), "[2001:db8::1]:443");
    assert_eq!(ServerAddress::new("[::1]", 443).authority(), "[::1]:443");
    assert_eq!(ServerAddress::new("10.0.0.1", 3128).to_string(), "10.0.0.1:3128");
}

#[test]
fn handshake_builders() {
    let handshake = HandshakeConfig::default()
        .with_user_agent("custom/1")
        .with_timeout(None);
    let config = ConnectionConfig::new(ServerAddress::new("example.com", 443))
        .with_handshake(handshake.clone());
    assert_eq!(config.handshake, handshake);
}
