use super::message::{RequestHead, RequestPart, ResponsePart};

/// The handler's view of the pipeline it is installed in.
///
/// Operations are infallible from the handler's point of view; transport failures
/// come back later as inbound events (`channel_inactive`, `error_caught`).
pub trait PipelineContext {
    /// Pass an outbound part to the next stage towards the transport.
    fn write(&mut self, part: RequestPart);

    /// Pass several outbound parts in order as one batch.
    fn write_batch(&mut self, parts: Vec<RequestPart>) {
        for part in parts {
            self.write(part);
        }
    }

    /// Push everything written so far onto the transport.
    fn flush(&mut self);

    /// Pass an inbound part to the next stage towards the application.
    fn forward_read(&mut self, part: ResponsePart);

    /// Deregister the calling stage. Parts it wrote before this call still go out.
    fn remove_handler(&mut self);

    /// Tear the connection down.
    fn close(&mut self);

    fn send_head(&mut self, head: RequestHead) {
        self.write(RequestPart::Head(head));
    }

    fn send_end(&mut self) {
        self.write(RequestPart::End(None));
    }
}
