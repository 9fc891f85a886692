use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;

use super::BoxError;

/// A Result alias where the Err case is `connect_tunnel_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur while negotiating a CONNECT tunnel.
pub struct Error {
    pub(crate) inner: Box<Inner>,
}

pub(crate) struct Inner {
    pub(crate) kind: Kind,
    pub(crate) source: Option<BoxError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Missing or invalid connection configuration, detected at construction
    Configuration,
    /// The proxy answered the CONNECT request with a non-success status
    Rejected(StatusCode),
    /// The transport closed or failed before the tunnel was confirmed
    Transport,
    /// The handshake deadline passed
    Timeout,
    /// The proxy reply could not be parsed
    Decode,
    /// The handler was dropped before the handshake finished
    Canceled,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner { kind, source: None }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<BoxError>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("connect_tunnel::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            Kind::Configuration => f.write_str("invalid tunnel configuration"),
            Kind::Rejected(code) => {
                if let Some(reason) = code.canonical_reason() {
                    write!(f, "proxy rejected CONNECT ({} {reason})", code.as_str())
                } else {
                    write!(f, "proxy rejected CONNECT ({})", code.as_str())
                }
            }
            Kind::Transport => f.write_str("transport failed before tunnel was established"),
            Kind::Timeout => f.write_str("tunnel handshake timed out"),
            Kind::Decode => f.write_str("malformed proxy response"),
            Kind::Canceled => f.write_str("tunnel handshake canceled"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
