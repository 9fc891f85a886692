use std::fmt;

/// Progress of one CONNECT handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandshakeState {
    /// Waiting for the transport to become active so the request can go out
    AwaitingSend,
    /// Request sent, waiting for the proxy's reply to end
    AwaitingResponse,
    /// Tunnel confirmed and handed to the caller
    Established,
    /// Handshake failed; the connection is being torn down
    Failed,
}

impl HandshakeState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, HandshakeState::Established | HandshakeState::Failed)
    }

    #[must_use]
    pub fn is_pending(self) -> bool {
        !self.is_terminal()
    }

    fn rank(self) -> u8 {
        match self {
            HandshakeState::AwaitingSend => 0,
            HandshakeState::AwaitingResponse => 1,
            HandshakeState::Established | HandshakeState::Failed => 2,
        }
    }

    /// Move forward to `next`. Returns false, leaving the state untouched, for any
    /// transition that would go backwards or leave a terminal state.
    pub(crate) fn advance(&mut self, next: HandshakeState) -> bool {
        if self.is_terminal() || next.rank() <= self.rank() {
            return false;
        }
        *self = next;
        true
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HandshakeState::AwaitingSend => "awaiting-send",
            HandshakeState::AwaitingResponse => "awaiting-response",
            HandshakeState::Established => "established",
            HandshakeState::Failed => "failed",
        }
    }
}

impl fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
