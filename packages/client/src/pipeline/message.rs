use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, Uri, Version};

/// Request line and headers of an outbound HTTP/1.1 message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: Method,
    pub uri: Uri,
    pub version: Version,
    pub headers: HeaderMap,
}

impl RequestHead {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
        }
    }
}

/// One piece of an outbound message, in the order it is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPart {
    Head(RequestHead),
    Body(Bytes),
    /// End of message, with optional trailers
    End(Option<HeaderMap>),
}

impl RequestPart {
    /// Payload size in bytes, zero for heads and end markers.
    #[must_use]
    pub fn body_len(&self) -> usize {
        match self {
            RequestPart::Body(bytes) => bytes.len(),
            RequestPart::Head(_) | RequestPart::End(_) => 0,
        }
    }
}

/// Status line and headers of an inbound HTTP/1.1 response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub version: Version,
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl ResponseHead {
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: Version::HTTP_11,
            status,
            headers: HeaderMap::new(),
        }
    }
}

/// One piece of an inbound response, in the order it is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePart {
    Head(ResponseHead),
    Body(Bytes),
    /// End of message, with optional trailers
    End(Option<HeaderMap>),
}
