//! Events the engine publishes for application consumers.
//!
//! Every applied change is republished as a discrete event, in processing
//! order, with no buffering or coalescing. Events carry merged views, not
//! diffs; consumers re-read the fields they care about.

use roster_core::{AccountId, ChatEntryType, FriendPersona};

use crate::messages::FriendsListEntry;

/// A notification published by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// A friends-list snapshot was processed. Carries the raw entry list
    /// for consumers that want the unprocessed snapshot.
    FriendsList {
        /// The snapshot entries exactly as received.
        friends: Vec<FriendsListEntry>,
    },

    /// A persona delta was applied to one individual. Carries the merged
    /// record as it stands after the mutation.
    PersonaState {
        /// The post-merge view of the individual.
        persona: FriendPersona,
    },

    /// A chat payload arrived from a friend.
    ///
    /// The payload is decoded eagerly as UTF-8 (lossily, so a mangled
    /// message still surfaces rather than vanishing). Consumers needing
    /// the raw bytes should take them at the transport boundary.
    FriendMessage {
        /// Who sent it.
        sender: AccountId,
        /// What kind of chat entry it is.
        entry_type: ChatEntryType,
        /// The decoded message text.
        message: String,
    },
}

/// Sink the engine pushes events into.
///
/// Publication is fire-and-forget and must not block; a sink that hands
/// events to another thread should buffer internally.
pub trait EventSink: Send + Sync {
    /// Publish one event.
    fn publish(&self, event: RosterEvent);
}

/// A channel-backed sink for tests and single-consumer applications.
pub mod channel {
    use super::{EventSink, RosterEvent};
    use tokio::sync::mpsc;

    /// Sink half: hands events to an unbounded channel.
    pub struct ChannelSink {
        tx: mpsc::UnboundedSender<RosterEvent>,
    }

    impl ChannelSink {
        /// Create a sink and the receiver that drains it.
        pub fn pair() -> (Self, mpsc::UnboundedReceiver<RosterEvent>) {
            let (tx, rx) = mpsc::unbounded_channel();
            (Self { tx }, rx)
        }
    }

    impl EventSink for ChannelSink {
        fn publish(&self, event: RosterEvent) {
            // A dropped receiver means the consumer is gone; events are
            // then discarded, which is the documented teardown behavior.
            let _ = self.tx.send(event);
        }
    }
}
