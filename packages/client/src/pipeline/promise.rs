use tokio::sync::oneshot;

use crate::error::{Error, Result};

/// Completion signal for a single outbound write.
///
/// Consumed when completed, so it can be satisfied at most once.
#[derive(Debug)]
pub struct WritePromise {
    tx: oneshot::Sender<Result<()>>,
}

impl WritePromise {
    /// Create a promise and the receiver its outcome is delivered to.
    #[must_use]
    pub fn new() -> (Self, oneshot::Receiver<Result<()>>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    pub fn succeed(self) {
        // receiver may have been dropped; nobody is waiting then
        let _ = self.tx.send(Ok(()));
    }

    pub fn fail(self, err: Error) {
        let _ = self.tx.send(Err(err));
    }
}
