//! # Roster Sync
//!
//! State reconciliation engine for the social-presence layer of a
//! game-platform client.
//!
//! ## Overview
//!
//! The engine keeps a local view of the user's social graph (friends and
//! clans) and each peer's live presence, fed by asynchronous, partial
//! push updates from the remote service. It bootstraps from a snapshot,
//! merges sparse flag-qualified deltas without clobbering unset fields,
//! and republishes every applied change as a discrete event.
//!
//! ## Key Properties
//!
//! - **Partial patches**: a delta only moves the fields its flags name
//! - **No implicit entities**: deltas about unknown identities are
//!   dropped silently, by documented policy
//! - **Atomic game info**: the game-activity triple changes as one unit
//! - **Uniform id aliasing**: the local user's id resolves through every
//!   peer-facing accessor
//!
//! ## Message Flow
//!
//! ```text
//! Service                        Engine                      Consumer
//!   |-------- FriendsList -------->|                            |
//!   |<------- RequestFriendData ---|---- FriendsList event ---->|
//!   |-------- PersonaState ------->|---- PersonaState event --->|
//!   |-------- FriendMessage ------>|---- FriendMessage event -->|
//!   |<------- ChangeStatus --------|  (set_persona_state)       |
//!   |<------- FriendMessage -------|  (send_chat_message)       |
//! ```

pub mod engine;
pub mod error;
pub mod events;
pub mod messages;
pub mod transport;

pub use engine::{EngineConfig, ReconciliationEngine};
pub use error::{Result, SyncError};
pub use events::{channel::ChannelSink, EventSink, RosterEvent};
pub use messages::{
    decode_frame, encode_body, kind, AccountInfoBody, ClientMessage, FriendMessageBody,
    FriendsListBody, FriendsListEntry, OutboundMessage, PersonaStateBody, PersonaStateEntry,
};
pub use transport::{memory::MemoryTransport, Transport};
