use bytes::BytesMut;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Version};

use crate::config::DEFAULT_MAX_HEAD_SIZE;
use crate::error::{self, MalformedResponse, Result};
use crate::pipeline::{ResponseHead, ResponsePart};

const MAX_HEADERS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    Head,
    Body { remaining: u64 },
    End,
    Done,
}

/// Incremental decoder for the proxy's reply to a CONNECT request.
///
/// Feed it the bytes read so far; each call yields at most one part. A 2xx reply
/// to CONNECT carries no body, so decoding stops right after its head and any
/// further bytes in the buffer are tunnel payload.
#[derive(Debug)]
pub struct ResponseDecoder {
    state: DecodeState,
    max_head_size: usize,
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseDecoder {
    pub fn new() -> Self {
        Self {
            state: DecodeState::Head,
            max_head_size: DEFAULT_MAX_HEAD_SIZE,
        }
    }

    #[must_use]
    pub fn with_max_head_size(mut self, max_head_size: usize) -> Self {
        self.max_head_size = max_head_size;
        self
    }

    /// True once the end of the final response has been emitted.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == DecodeState::Done
    }

    /// Decode the next part from the front of `src`.
    ///
    /// Returns `Ok(None)` when more bytes are needed, or after the reply has ended.
    ///
    /// # Errors
    /// Returns a decode error if the reply is malformed or its head is too large.
    pub fn decode(&mut self, src: &mut BytesMut) -> Result<Option<ResponsePart>> {
        match self.state {
            DecodeState::Head => self.decode_head(src),
            DecodeState::Body { remaining } => {
                if src.is_empty() {
                    return Ok(None);
                }
                let n = usize::try_from(remaining).unwrap_or(usize::MAX).min(src.len());
                let chunk = src.split_to(n).freeze();
                let remaining = remaining - n as u64;
                self.state = if remaining == 0 {
                    DecodeState::End
                } else {
                    DecodeState::Body { remaining }
                };
                Ok(Some(ResponsePart::Body(chunk)))
            }
            DecodeState::End => {
                self.state = DecodeState::Done;
                Ok(Some(ResponsePart::End(None)))
            }
            DecodeState::Done => Ok(None),
        }
    }

    fn decode_head(&mut self, src: &mut BytesMut) -> Result<Option<ResponsePart>> {
        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
        let mut response = httparse::Response::new(&mut headers);

        let len = match response.parse(&src[..]) {
            Ok(httparse::Status::Complete(len)) => len,
            Ok(httparse::Status::Partial) => {
                if src.len() > self.max_head_size {
                    return Err(error::decode(MalformedResponse("response head too large")));
                }
                return Ok(None);
            }
            Err(httparse::Error::TooManyHeaders) => {
                return Err(error::decode(MalformedResponse("too many response headers")));
            }
            Err(err) => {
                tracing::debug!(
                    target: "connect_tunnel::codec",
                    error = %err,
                    "Unparseable proxy response head"
                );
                return Err(error::decode(MalformedResponse("invalid response head")));
            }
        };
        if len > self.max_head_size {
            return Err(error::decode(MalformedResponse("response head too large")));
        }

        let head = response_head(&response)?;
        let _ = src.split_to(len);

        self.state = if head.status.is_informational() {
            DecodeState::Head
        } else if head.status.is_success() {
            DecodeState::End
        } else {
            match content_length(&head.headers)? {
                0 => DecodeState::End,
                remaining => DecodeState::Body { remaining },
            }
        };

        Ok(Some(ResponsePart::Head(head)))
    }
}

fn response_head(response: &httparse::Response<'_, '_>) -> Result<ResponseHead> {
    let version = match response.version {
        Some(0) => Version::HTTP_10,
        Some(1) => Version::HTTP_11,
        _ => return Err(error::decode(MalformedResponse("unsupported HTTP version"))),
    };
    let status = response
        .code
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| error::decode(MalformedResponse("invalid status code")))?;

    let mut headers = HeaderMap::with_capacity(response.headers.len());
    for header in response.headers.iter() {
        let name = HeaderName::from_bytes(header.name.as_bytes())
            .map_err(|_| error::decode(MalformedResponse("invalid header name")))?;
        // obs-text is legal in field values, so no UTF-8 requirement here
        let value = HeaderValue::from_bytes(header.value)
            .map_err(|_| error::decode(MalformedResponse("invalid header value")))?;
        headers.append(name, value);
    }

    Ok(ResponseHead {
        version,
        status,
        headers,
    })
}

fn content_length(headers: &HeaderMap) -> Result<u64> {
    match headers.get(http::header::CONTENT_LENGTH) {
        None => Ok(0),
        Some(value) => value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .ok_or_else(|| error::decode(MalformedResponse("invalid content-length"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(decoder: &mut ResponseDecoder, src: &mut BytesMut) -> Vec<ResponsePart> {
        let mut parts = Vec::new();
        while let Some(part) = decoder.decode(src).unwrap() {
            parts.push(part);
        }
        parts
    }

    #[test]
    fn success_ends_after_head_and_leaves_tunnel_bytes() {
        let mut decoder = ResponseDecoder::new();
        let mut src =
            BytesMut::from(&b"HTTP/1.1 200 Connection established\r\nVia: proxy\r\n\r\nTLS"[..]);

        let parts = decode_all(&mut decoder, &mut src);
        assert_eq!(parts.len(), 2);
        match &parts[0] {
            ResponsePart::Head(head) => {
                assert_eq!(head.status, StatusCode::OK);
                assert_eq!(head.headers["via"], "proxy");
            }
            other => panic!("expected head, got {other:?}"),
        }
        assert_eq!(parts[1], ResponsePart::End(None));
        assert!(decoder.is_done());
        assert_eq!(&src[..], b"TLS");
    }

    #[test]
    fn waits_for_complete_head() {
        let mut decoder = ResponseDecoder::new();
        let mut src = BytesMut::from(&b"HTTP/1.1 200 OK\r\n"[..]);
        assert!(decoder.decode(&mut src).unwrap().is_none());

        src.extend_from_slice(b"\r\n");
        assert!(matches!(
            decoder.decode(&mut src).unwrap(),
            Some(ResponsePart::Head(_))
        ));
    }

    #[test]
    fn rejection_body_is_framed_by_content_length() {
        let mut decoder = ResponseDecoder::new();
        let mut src = BytesMut::from(
            &b"HTTP/1.1 407 Proxy Authentication Required\r\nContent-Length: 4\r\n\r\ndeny"[..],
        );

        let parts = decode_all(&mut decoder, &mut src);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1], ResponsePart::Body(bytes::Bytes::from_static(b"deny")));
        assert_eq!(parts[2], ResponsePart::End(None));
    }

    #[test]
    fn informational_head_is_followed_by_final_head() {
        let mut decoder = ResponseDecoder::new();
        let mut src =
            BytesMut::from(&b"HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 200 OK\r\n\r\n"[..]);

        let parts = decode_all(&mut decoder, &mut src);
        assert_eq!(parts.len(), 3);
        assert!(matches!(&parts[0], ResponsePart::Head(h) if h.status == StatusCode::CONTINUE));
        assert!(matches!(&parts[1], ResponsePart::Head(h) if h.status == StatusCode::OK));
    }

    #[test]
    fn accepts_obs_text_in_reason_and_header_values() {
        let mut decoder = ResponseDecoder::new();
        let mut src = BytesMut::from(
            &b"HTTP/1.1 200 Verbindung hergestellt \xfc\r\nVia: 1.1 caf\xe9-proxy\r\n\r\n"[..],
        );

        let parts = decode_all(&mut decoder, &mut src);
        assert_eq!(parts.len(), 2);
        match &parts[0] {
            ResponsePart::Head(head) => {
                assert_eq!(head.status, StatusCode::OK);
                assert_eq!(head.headers["via"].as_bytes(), b"1.1 caf\xe9-proxy");
            }
            other => panic!("expected head, got {other:?}"),
        }
        assert!(decoder.is_done());
    }

    #[test]
    fn http_10_reply_is_accepted() {
        let mut decoder = ResponseDecoder::new();
        let mut src = BytesMut::from(&b"HTTP/1.0 200 OK\r\n\r\n"[..]);
        match decoder.decode(&mut src).unwrap() {
            Some(ResponsePart::Head(head)) => assert_eq!(head.version, Version::HTTP_10),
            other => panic!("expected head, got {other:?}"),
        }
    }

    #[test]
    fn garbage_status_line_is_decode_error() {
        let mut decoder = ResponseDecoder::new();
        let mut src = BytesMut::from(&b"SSH-2.0-OpenSSH\r\n\r\n"[..]);
        let err = decoder.decode(&mut src).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn oversized_head_is_rejected() {
        let mut decoder = ResponseDecoder::new().with_max_head_size(16);
        let mut src = BytesMut::from(&b"HTTP/1.1 200 OK\r\nX-Long: aaaaaaaaaaaa"[..]);
        assert!(decoder.decode(&mut src).unwrap_err().is_decode());
    }
}
