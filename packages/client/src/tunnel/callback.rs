use std::fmt;

use crate::error::{self, Error, OperationCanceled, Result};
use crate::pipeline::PipelineContext;

/// Boxed completion function handed to `TunnelHandler::new`.
pub type OnConnect = Box<dyn FnOnce(Result<&mut dyn PipelineContext>) + Send>;

/// Single-use completion callback.
///
/// Calling it consumes the inner function, so it runs at most once. If it is dropped
/// without having run, it runs with a `Canceled` error so the caller always hears back.
pub struct CompletionCallback {
    inner: Option<OnConnect>,
}

impl CompletionCallback {
    pub fn new<F>(on_connect: F) -> Self
    where
        F: FnOnce(Result<&mut dyn PipelineContext>) + Send + 'static,
    {
        Self {
            inner: Some(Box::new(on_connect)),
        }
    }

    /// Hand the pipeline to the caller. Returns false if the callback already ran.
    pub fn succeed(&mut self, ctx: &mut dyn PipelineContext) -> bool {
        match self.inner.take() {
            Some(on_connect) => {
                on_connect(Ok(ctx));
                true
            }
            None => false,
        }
    }

    /// Report a failed handshake. Returns false if the callback already ran.
    pub fn fail(&mut self, err: Error) -> bool {
        match self.inner.take() {
            Some(on_connect) => {
                on_connect(Err(err));
                true
            }
            None => false,
        }
    }
}

impl Drop for CompletionCallback {
    fn drop(&mut self) {
        if let Some(on_connect) = self.inner.take() {
            tracing::debug!(
                target: "connect_tunnel::handshake",
                "Tunnel handler dropped before handshake completed"
            );
            on_connect(Err(error::canceled(OperationCanceled)));
        }
    }
}

impl fmt::Debug for CompletionCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionCallback")
            .field("pending", &self.inner.is_some())
            .finish()
    }
}
