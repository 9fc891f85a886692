use std::collections::VecDeque;

use crate::pipeline::{RequestPart, WritePromise};

/// Outbound parts held back while the tunnel is being negotiated.
///
/// FIFO. A write's promise is satisfied when it is accepted into the queue, so
/// only the payload is retained.
#[derive(Debug, Default)]
pub struct PendingWriteQueue {
    parts: VecDeque<RequestPart>,
    bytes: usize,
}

impl PendingWriteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a write for later delivery and complete its promise.
    pub fn push(&mut self, part: RequestPart, promise: Option<WritePromise>) {
        self.bytes += part.body_len();
        self.parts.push_back(part);
        if let Some(promise) = promise {
            promise.succeed();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Total body bytes currently held.
    #[must_use]
    pub fn buffered_bytes(&self) -> usize {
        self.bytes
    }

    /// Take every held part, oldest first, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<RequestPart> {
        self.bytes = 0;
        self.parts.drain(..).collect()
    }

    /// Drop every held part. Returns how many were dropped.
    pub fn discard(&mut self) -> usize {
        let dropped = self.parts.len();
        self.parts.clear();
        self.bytes = 0;
        dropped
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn drains_in_push_order() {
        let mut queue = PendingWriteQueue::new();
        queue.push(RequestPart::Body(Bytes::from_static(b"one")), None);
        queue.push(RequestPart::Body(Bytes::from_static(b"two")), None);
        queue.push(RequestPart::End(None), None);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.buffered_bytes(), 6);

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                RequestPart::Body(Bytes::from_static(b"one")),
                RequestPart::Body(Bytes::from_static(b"two")),
                RequestPart::End(None),
            ]
        );
        assert!(queue.is_empty());
        assert_eq!(queue.buffered_bytes(), 0);
    }

    #[test]
    fn push_completes_promise() {
        let mut queue = PendingWriteQueue::new();
        let (promise, mut rx) = WritePromise::new();
        queue.push(RequestPart::Body(Bytes::from_static(b"w")), Some(promise));

        let outcome = rx.try_recv().expect("promise completed on enqueue");
        assert!(outcome.is_ok());
    }

    #[test]
    fn discard_reports_count() {
        let mut queue = PendingWriteQueue::new();
        queue.push(RequestPart::Body(Bytes::from_static(b"a")), None);
        queue.push(RequestPart::Body(Bytes::from_static(b"b")), None);
        assert_eq!(queue.discard(), 2);
        assert!(queue.is_empty());
    }
}
