#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use connect_tunnel_client::error::Kind;
use connect_tunnel_client::{
    ConnectionConfig, PipelineContext, ProxyConfig, RequestPart, ResponseHead, ResponsePart,
    Result, ServerAddress, StatusCode,
};

/// Everything observable from outside the handler, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Write(RequestPart),
    Flush,
    Forward(ResponsePart),
    Removed,
    Closed,
    Connected,
    Failed(Kind),
}

pub type Log = Arc<Mutex<Vec<Event>>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &Log) -> Vec<Event> {
    log.lock().unwrap().clone()
}

pub struct RecordingPipeline {
    log: Log,
}

impl RecordingPipeline {
    pub fn new(log: Log) -> Self {
        Self { log }
    }

    fn record(&self, event: Event) {
        self.log.lock().unwrap().push(event);
    }
}

impl PipelineContext for RecordingPipeline {
    fn write(&mut self, part: RequestPart) {
        self.record(Event::Write(part));
    }

    fn flush(&mut self) {
        self.record(Event::Flush);
    }

    fn forward_read(&mut self, part: ResponsePart) {
        self.record(Event::Forward(part));
    }

    fn remove_handler(&mut self) {
        self.record(Event::Removed);
    }

    fn close(&mut self) {
        self.record(Event::Closed);
    }
}

/// Completion callback that records its outcome into `log`.
pub fn on_connect(log: Log) -> impl FnOnce(Result<&mut dyn PipelineContext>) + Send + 'static {
    move |result: Result<&mut dyn PipelineContext>| {
        let event = match result {
            Ok(_) => Event::Connected,
            Err(err) => Event::Failed(err.kind()),
        };
        log.lock().unwrap().push(event);
    }
}

pub fn proxied_config() -> ConnectionConfig {
    ConnectionConfig::new(ServerAddress::new("example.com", 443))
        .with_proxy(ProxyConfig::new("proxy.local", 8080))
}

pub fn body(data: &'static [u8]) -> RequestPart {
    RequestPart::Body(Bytes::from_static(data))
}

pub fn head(status: StatusCode) -> ResponsePart {
    ResponsePart::Head(ResponseHead::new(status))
}

pub fn end() -> ResponsePart {
    ResponsePart::End(None)
}

pub fn count(events: &[Event], wanted: &Event) -> usize {
    events.iter().filter(|e| *e == wanted).count()
}

pub fn position(events: &[Event], wanted: &Event) -> Option<usize> {
    events.iter().position(|e| e == wanted)
}
