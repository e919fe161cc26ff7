//! Transport abstraction for outbound protocol actions.
//!
//! The transport collaborator owns framing, encryption, and delivery.
//! The engine hands it typed [`OutboundMessage`] values as fire-and-forget
//! sends and never waits for acknowledgement; retry and flow control, if
//! any, live on the other side of this trait.

use roster_core::AccountId;

use crate::error::Result;
use crate::messages::OutboundMessage;

/// Outbound half of the session, as the engine sees it.
///
/// Implementations must be thread-safe (`Send + Sync`) and must not block
/// on I/O inside [`send`](Transport::send); queue and return.
pub trait Transport: Send + Sync {
    /// Hand one message to the session for delivery.
    fn send(&self, message: OutboundMessage) -> Result<()>;

    /// The session's own account identity.
    ///
    /// Valid once the session is established, which by protocol
    /// convention is before the first inbound message reaches the engine.
    fn local_id(&self) -> AccountId;
}

/// A channel-backed transport for tests.
pub mod memory {
    use super::*;
    use crate::error::SyncError;
    use tokio::sync::mpsc;

    /// Transport that queues messages on an unbounded channel.
    pub struct MemoryTransport {
        local_id: AccountId,
        tx: mpsc::UnboundedSender<OutboundMessage>,
    }

    impl MemoryTransport {
        /// Create a transport and the receiver that drains its sends.
        pub fn pair(local_id: AccountId) -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
            let (tx, rx) = mpsc::unbounded_channel();
            (Self { local_id, tx }, rx)
        }
    }

    impl Transport for MemoryTransport {
        fn send(&self, message: OutboundMessage) -> Result<()> {
            self.tx
                .send(message)
                .map_err(|_| SyncError::Transport("session closed".into()))
        }

        fn local_id(&self) -> AccountId {
            self.local_id
        }
    }
}
