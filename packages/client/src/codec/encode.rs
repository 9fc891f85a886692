use bytes::{BufMut, BytesMut};
use http::HeaderName;

use crate::pipeline::{RequestHead, RequestPart};

/// Serialize one outbound part onto `dst`.
///
/// Header names are written in canonical `Title-Case`. Trailers on an end marker
/// are not representable without chunked framing and are dropped.
pub fn encode_request_part(part: &RequestPart, dst: &mut BytesMut) {
    match part {
        RequestPart::Head(head) => encode_head(head, dst),
        RequestPart::Body(bytes) => dst.extend_from_slice(bytes),
        RequestPart::End(Some(trailers)) if !trailers.is_empty() => {
            tracing::debug!(
                target: "connect_tunnel::codec",
                count = trailers.len(),
                "Dropping trailers on identity-framed message"
            );
        }
        RequestPart::End(_) => {}
    }
}

fn encode_head(head: &RequestHead, dst: &mut BytesMut) {
    dst.reserve(64 + head.headers.len() * 32);
    dst.put_slice(head.method.as_str().as_bytes());
    dst.put_u8(b' ');
    dst.put_slice(head.uri.to_string().as_bytes());
    dst.put_u8(b' ');
    dst.put_slice(format!("{:?}", head.version).as_bytes());
    dst.put_slice(b"\r\n");

    for (name, value) in &head.headers {
        put_title_case(name, dst);
        dst.put_slice(b": ");
        dst.put_slice(value.as_bytes());
        dst.put_slice(b"\r\n");
    }
    dst.put_slice(b"\r\n");
}

fn put_title_case(name: &HeaderName, dst: &mut BytesMut) {
    let mut upper = true;
    for &b in name.as_str().as_bytes() {
        dst.put_u8(if upper { b.to_ascii_uppercase() } else { b });
        upper = b == b'-';
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::{HeaderMap, HeaderValue, Method, Uri};

    use super::*;

    #[test]
    fn encodes_connect_head() {
        let mut head = RequestHead::new(Method::CONNECT, Uri::from_static("example.com:443"));
        head.headers
            .insert(http::header::HOST, HeaderValue::from_static("example.com:443"));
        head.headers.insert(
            HeaderName::from_static("proxy-connection"),
            HeaderValue::from_static("Keep-Alive"),
        );

        let mut dst = BytesMut::new();
        encode_request_part(&RequestPart::Head(head), &mut dst);

        assert_eq!(
            &dst[..],
            b"CONNECT example.com:443 HTTP/1.1\r\n\
              Host: example.com:443\r\n\
              Proxy-Connection: Keep-Alive\r\n\r\n"
        );
    }

    #[test]
    fn body_is_written_verbatim_and_end_is_empty() {
        let mut dst = BytesMut::new();
        encode_request_part(&RequestPart::Body(Bytes::from_static(b"hello")), &mut dst);
        encode_request_part(&RequestPart::End(None), &mut dst);

        let mut trailers = HeaderMap::new();
        trailers.insert("x-checksum", HeaderValue::from_static("abc"));
        encode_request_part(&RequestPart::End(Some(trailers)), &mut dst);

        assert_eq!(&dst[..], b"hello");
    }
}
