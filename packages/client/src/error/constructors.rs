use http::StatusCode;

use super::BoxError;
use super::types::{Error, Kind};

/// Creates an `Error` for a configuration contract violation.
pub fn configuration<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Configuration).with(e.into())
}

/// Creates an `Error` for a proxy that refused the tunnel.
pub fn rejected(status: StatusCode) -> Error {
    Error::new(Kind::Rejected(status))
}

/// Creates an `Error` for a transport that closed or failed mid-handshake.
pub fn transport<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Transport).with(e.into())
}

/// Creates an `Error` for an expired handshake deadline.
pub fn timeout<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Timeout).with(e.into())
}

/// Creates an `Error` for an unparseable proxy reply.
pub fn decode<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Decode).with(e.into())
}

/// Creates an `Error` for a handshake abandoned before completion.
pub fn canceled<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Canceled).with(e.into())
}
