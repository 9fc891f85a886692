use std::time::Instant;

use super::callback::CompletionCallback;
use super::queue::PendingWriteQueue;
use super::request::connect_head;
use super::state::HandshakeState;
use crate::config::ConnectionConfig;
use crate::error::{
    self, ConnectionClosed, Error, IncompleteResponse, MissingProxy, Result, TimedOut,
    UnexpectedResponse,
};
use crate::pipeline::{PipelineContext, RequestHead, RequestPart, ResponsePart, WritePromise};

/// Pipeline stage that negotiates an HTTP CONNECT tunnel.
///
/// Install it right after the transport connects and before any application
/// protocol stage. Until the proxy confirms the tunnel, application writes are
/// held in a [`PendingWriteQueue`]. Once the reply ends with a 2xx status, the
/// completion callback runs, the held writes go out in order, and the handler
/// removes itself from the pipeline.
///
/// Every failure (rejection, transport loss, deadline, malformed reply) is
/// delivered through the same completion callback as an `Err`.
#[derive(Debug)]
pub struct TunnelHandler {
    config: ConnectionConfig,
    connect_head: Option<RequestHead>,
    state: HandshakeState,
    pending: PendingWriteQueue,
    on_connect: CompletionCallback,
    status: Option<http::StatusCode>,
    deadline: Option<Instant>,
    removed: bool,
}

impl TunnelHandler {
    /// Create a handler for `config`.
    ///
    /// `on_connect` runs exactly once: with the pipeline when the tunnel is up, or
    /// with the error that ended the handshake.
    ///
    /// # Errors
    /// Returns a configuration error, without running `on_connect`, if `config`
    /// has no proxy or fails validation.
    pub fn new<F>(config: ConnectionConfig, on_connect: F) -> Result<Self>
    where
        F: FnOnce(Result<&mut dyn PipelineContext>) + Send + 'static,
    {
        let Some(proxy) = config.proxy.as_ref() else {
            return Err(error::configuration(MissingProxy(config.server.authority())));
        };
        config.validate()?;
        let head = connect_head(&config.server, proxy, &config.handshake.user_agent)?;

        Ok(Self {
            connect_head: Some(head),
            config,
            state: HandshakeState::AwaitingSend,
            pending: PendingWriteQueue::new(),
            on_connect: CompletionCallback::new(on_connect),
            status: None,
            deadline: None,
            removed: false,
        })
    }

    /// Hold `parts` as if the application had written them before the transport
    /// came up. They go out, in order, ahead of any later write once the tunnel is
    /// established.
    #[must_use]
    pub fn with_early_writes<I>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = RequestPart>,
    {
        for part in parts {
            self.pending.push(part, None);
        }
        tracing::trace!(
            target: "connect_tunnel::handshake",
            buffered = self.pending.len(),
            bytes = self.pending.buffered_bytes(),
            "Holding early writes"
        );
        self
    }

    #[must_use]
    pub fn state(&self) -> HandshakeState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Number of writes held back so far.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    /// When the handshake times out, once the transport is active.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// The transport is connected: send the CONNECT request.
    pub fn channel_active(&mut self, ctx: &mut dyn PipelineContext) {
        if self.state != HandshakeState::AwaitingSend {
            tracing::warn!(
                target: "connect_tunnel::handshake",
                state = %self.state,
                "Ignoring repeated transport activation"
            );
            return;
        }
        let Some(head) = self.connect_head.take() else {
            return;
        };

        self.deadline = self.config.handshake.timeout.map(|t| Instant::now() + t);

        tracing::debug!(
            target: "connect_tunnel::handshake",
            target_addr = %self.config.server,
            proxy = %self.proxy_addr(),
            authenticated = head.headers.contains_key(http::header::AUTHORIZATION),
            "Sending CONNECT request"
        );

        ctx.send_head(head);
        ctx.send_end();
        ctx.flush();
        self.state.advance(HandshakeState::AwaitingResponse);
    }

    /// An outbound write from the application.
    ///
    /// Held until the tunnel is confirmed; the promise completes on acceptance.
    pub fn write(
        &mut self,
        ctx: &mut dyn PipelineContext,
        part: RequestPart,
        promise: Option<WritePromise>,
    ) {
        match self.state {
            HandshakeState::Established => {
                ctx.write(part);
                if let Some(promise) = promise {
                    promise.succeed();
                }
            }
            HandshakeState::Failed => {
                if let Some(promise) = promise {
                    promise.fail(error::transport(ConnectionClosed));
                }
            }
            HandshakeState::AwaitingSend | HandshakeState::AwaitingResponse => {
                tracing::trace!(
                    target: "connect_tunnel::handshake",
                    bytes = part.body_len(),
                    buffered = self.pending.len() + 1,
                    "Holding write until tunnel is established"
                );
                self.pending.push(part, promise);
            }
        }
    }

    /// An inbound part of the proxy's reply.
    pub fn channel_read(&mut self, ctx: &mut dyn PipelineContext, part: ResponsePart) {
        match self.state {
            HandshakeState::Established => ctx.forward_read(part),
            HandshakeState::Failed => {
                tracing::trace!(
                    target: "connect_tunnel::handshake",
                    "Discarding read after failed handshake"
                );
            }
            HandshakeState::AwaitingSend => {
                self.fail(ctx, error::decode(UnexpectedResponse));
            }
            HandshakeState::AwaitingResponse => self.on_response(ctx, part),
        }
    }

    fn on_response(&mut self, ctx: &mut dyn PipelineContext, part: ResponsePart) {
        match part {
            ResponsePart::Head(head) => {
                if self.status.is_some() {
                    tracing::warn!(
                        target: "connect_tunnel::handshake",
                        status = %head.status,
                        "Ignoring extra response head"
                    );
                } else if head.status.is_informational() {
                    tracing::debug!(
                        target: "connect_tunnel::handshake",
                        status = %head.status,
                        "Skipping informational response"
                    );
                } else if head.status.is_success() {
                    self.status = Some(head.status);
                } else {
                    self.fail(ctx, error::rejected(head.status));
                }
            }
            ResponsePart::Body(bytes) => {
                tracing::trace!(
                    target: "connect_tunnel::handshake",
                    bytes = bytes.len(),
                    "Discarding proxy response body"
                );
            }
            ResponsePart::End(_) => {
                if self.status.is_some() {
                    self.establish(ctx);
                } else {
                    self.fail(ctx, error::decode(IncompleteResponse));
                }
            }
        }
    }

    /// The transport closed.
    pub fn channel_inactive(&mut self, ctx: &mut dyn PipelineContext) {
        if self.state.is_pending() {
            self.fail(ctx, error::transport(ConnectionClosed));
        }
    }

    /// The transport (or a stage below) reported an error.
    pub fn error_caught(&mut self, ctx: &mut dyn PipelineContext, err: Error) {
        if self.state.is_pending() {
            self.fail(ctx, err);
        } else {
            tracing::debug!(
                target: "connect_tunnel::handshake",
                state = %self.state,
                error = %err,
                "Ignoring error after handshake finished"
            );
        }
    }

    /// Fail the handshake if `now` is at or past the deadline.
    ///
    /// Returns true if this call timed the handshake out.
    pub fn check_deadline(&mut self, ctx: &mut dyn PipelineContext, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if self.state.is_pending() && now >= deadline => {
                self.fail(ctx, error::timeout(TimedOut));
                true
            }
            _ => false,
        }
    }

    fn establish(&mut self, ctx: &mut dyn PipelineContext) {
        if !self.state.advance(HandshakeState::Established) {
            return;
        }
        self.deadline = None;
        let buffered = self.pending.drain();

        tracing::debug!(
            target: "connect_tunnel::handshake",
            target_addr = %self.config.server,
            status = ?self.status,
            buffered = buffered.len(),
            "Tunnel established"
        );

        self.on_connect.succeed(ctx);

        if !buffered.is_empty() {
            ctx.write_batch(buffered);
        }
        ctx.flush();
        self.remove_from_pipeline(ctx);
    }

    fn fail(&mut self, ctx: &mut dyn PipelineContext, err: Error) {
        if !self.state.advance(HandshakeState::Failed) {
            return;
        }
        self.deadline = None;
        let discarded = self.pending.discard();

        tracing::warn!(
            target: "connect_tunnel::handshake",
            target_addr = %self.config.server,
            proxy = %self.proxy_addr(),
            discarded = discarded,
            error = %err,
            "Tunnel handshake failed"
        );

        self.on_connect.fail(err);
        ctx.close();
    }

    fn remove_from_pipeline(&mut self, ctx: &mut dyn PipelineContext) {
        if !self.removed {
            self.removed = true;
            ctx.remove_handler();
        }
    }

    fn proxy_addr(&self) -> String {
        self.config
            .proxy
            .as_ref()
            .map(|p| p.endpoint().authority())
            .unwrap_or_default()
    }
}
