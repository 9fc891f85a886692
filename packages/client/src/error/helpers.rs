//! Marker errors carried as the `source` of an `Error`.

/// A marker type to indicate that the handshake deadline passed.
#[derive(Debug, thiserror::Error)]
#[error("timed out")]
pub struct TimedOut;

/// A marker type to indicate that the transport closed.
#[derive(Debug, thiserror::Error)]
#[error("connection closed")]
pub struct ConnectionClosed;

/// A marker type to indicate that a handshake was abandoned.
#[derive(Debug, thiserror::Error)]
#[error("operation canceled")]
pub struct OperationCanceled;

/// The configuration handed to a tunnel handler carried no proxy settings.
#[derive(Debug, thiserror::Error)]
#[error("no proxy configured for tunnel to {0}")]
pub struct MissingProxy(pub String);

/// The proxy ended its reply before sending a status line.
#[derive(Debug, thiserror::Error)]
#[error("response ended before a status line was received")]
pub struct IncompleteResponse;

/// The proxy sent data before the CONNECT request went out.
#[derive(Debug, thiserror::Error)]
#[error("response received before the CONNECT request was sent")]
pub struct UnexpectedResponse;

/// The proxy reply violated HTTP/1.1 framing.
#[derive(Debug, thiserror::Error)]
#[error("malformed response: {0}")]
pub struct MalformedResponse(pub &'static str);
