//! HTTP/1.1 wire codec for the CONNECT exchange
//!
//! Just enough framing to put a request on a byte stream and read the proxy's
//! reply off it. Bytes after a successful reply belong to the tunnel and are left
//! in the caller's buffer.

mod decode;
mod encode;

pub use decode::ResponseDecoder;
pub use encode::encode_request_part;
