use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::oneshot;

use super::stream::TunnelStream;
use crate::codec::{ResponseDecoder, encode_request_part};
use crate::config::ConnectionConfig;
use crate::error::{self, OperationCanceled, Result};
use crate::pipeline::{PipelineContext, RequestPart, ResponsePart};
use crate::tunnel::TunnelHandler;

const READ_CHUNK: usize = 4096;

/// Pipeline over a single byte stream: the handler is the only stage, so writes
/// are encoded straight into an output buffer that the driver pushes on flush.
#[derive(Debug, Default)]
struct StreamPipeline {
    outbound: BytesMut,
    flush_requested: bool,
    removed: bool,
    closed: bool,
}

impl PipelineContext for StreamPipeline {
    fn write(&mut self, part: RequestPart) {
        encode_request_part(&part, &mut self.outbound);
    }

    fn flush(&mut self) {
        self.flush_requested = true;
    }

    fn forward_read(&mut self, part: ResponsePart) {
        // nothing above the handler on a bare stream
        tracing::trace!(
            target: "connect_tunnel::connect",
            part = ?part,
            "Dropping read forwarded past the handler"
        );
    }

    fn remove_handler(&mut self) {
        self.removed = true;
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

impl StreamPipeline {
    async fn flush_to<S: AsyncWrite + Unpin>(&mut self, stream: &mut S) -> std::io::Result<()> {
        if !self.flush_requested {
            return Ok(());
        }
        self.flush_requested = false;
        if !self.outbound.is_empty() {
            let out = self.outbound.split();
            stream.write_all(&out).await?;
        }
        stream.flush().await
    }
}

/// Negotiate a CONNECT tunnel over `stream`, which must be connected to the proxy
/// named in `config`.
///
/// `early_writes` are application bytes issued before the tunnel exists; they are
/// held back and written, in order, once the proxy confirms the tunnel.
///
/// # Errors
/// Returns the error the handshake ended with: configuration errors before any I/O,
/// otherwise rejection, transport, timeout or decode errors. On failure the stream
/// is shut down.
pub async fn establish_tunnel<S, I>(
    mut stream: S,
    config: ConnectionConfig,
    early_writes: I,
) -> Result<TunnelStream<S>>
where
    S: AsyncRead + AsyncWrite + Unpin,
    I: IntoIterator<Item = Bytes>,
{
    let (tx, mut rx) = oneshot::channel::<Result<()>>();
    let handler = TunnelHandler::new(config, move |result: Result<&mut dyn PipelineContext>| {
        let _ = tx.send(result.map(|_| ()));
    })?;

    let mut pipe = StreamPipeline::default();
    let mut decoder = ResponseDecoder::new();
    let mut read_buf = BytesMut::with_capacity(READ_CHUNK);

    let mut handler = handler.with_early_writes(early_writes.into_iter().map(RequestPart::Body));
    handler.channel_active(&mut pipe);
    let deadline = handler.deadline().map(tokio::time::Instant::from_std);

    let outcome = loop {
        // a proxy that stops reading can stall the write as well as the read
        let flushed = match deadline {
            Some(deadline) if handler.state().is_pending() => {
                match tokio::time::timeout_at(deadline, pipe.flush_to(&mut stream)).await {
                    Ok(flushed) => flushed,
                    Err(_elapsed) => {
                        handler.check_deadline(&mut pipe, deadline.into_std());
                        continue;
                    }
                }
            }
            _ => pipe.flush_to(&mut stream).await,
        };
        if let Err(err) = flushed {
            if handler.state().is_pending() {
                handler.error_caught(&mut pipe, err.into());
            } else {
                return Err(err.into());
            }
        }

        match rx.try_recv() {
            Ok(outcome) => break outcome,
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                break Err(error::canceled(OperationCanceled));
            }
        }

        match decoder.decode(&mut read_buf) {
            Ok(Some(part)) => {
                handler.channel_read(&mut pipe, part);
                continue;
            }
            Ok(None) => {}
            Err(err) => {
                handler.error_caught(&mut pipe, err);
                continue;
            }
        }

        read_buf.reserve(READ_CHUNK);
        let read = match deadline {
            Some(deadline) => {
                match tokio::time::timeout_at(deadline, stream.read_buf(&mut read_buf)).await {
                    Ok(read) => read,
                    Err(_elapsed) => {
                        handler.check_deadline(&mut pipe, deadline.into_std());
                        continue;
                    }
                }
            }
            None => stream.read_buf(&mut read_buf).await,
        };

        match read {
            Ok(0) => handler.channel_inactive(&mut pipe),
            Ok(n) => {
                tracing::trace!(
                    target: "connect_tunnel::connect",
                    bytes = n,
                    "Read from proxy"
                );
            }
            Err(err) => handler.error_caught(&mut pipe, err.into()),
        }
    };

    match outcome {
        Ok(()) => {
            debug_assert!(pipe.removed);
            tracing::debug!(
                target: "connect_tunnel::connect",
                leftover = read_buf.len(),
                "Handing stream to caller"
            );
            Ok(TunnelStream::new(stream, read_buf.freeze()))
        }
        Err(err) => {
            if pipe.closed {
                // peer may already be gone
                let _ = stream.shutdown().await;
            }
            Err(err)
        }
    }
}
