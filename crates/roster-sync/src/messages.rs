//! Inbound and outbound protocol messages.
//!
//! The session layer frames and decrypts; what reaches this module is a
//! message kind tag and a CBOR payload. [`decode_frame`] turns that pair
//! into the closed [`ClientMessage`] enum, decoded once at the boundary so
//! the engine can dispatch by exhaustive match. Tags outside the known set
//! decode to [`ClientMessage::Unknown`], making "ignore everything else" a
//! visible default arm rather than a dropped switch case.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use roster_core::{AccountId, ChatEntryType, FriendRelationship, PersonaState, StatusFlags};

use crate::error::{Result, SyncError};

/// Message kind tags, as carried in the frame header.
pub mod kind {
    /// Local account info for the signed-in user.
    pub const ACCOUNT_INFO: u32 = 0x0001;
    /// Bootstrap snapshot of the social graph.
    pub const FRIENDS_LIST: u32 = 0x0002;
    /// Incremental, flag-qualified presence delta.
    pub const PERSONA_STATE: u32 = 0x0003;
    /// Incoming chat payload from a friend.
    pub const FRIEND_MESSAGE: u32 = 0x0004;
}

/// Body of an account-info message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfoBody {
    /// The local user's display name.
    pub persona_name: String,
}

/// One relationship entry in a friends-list snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendsListEntry {
    /// The identity the entry describes (individual or clan).
    pub id: AccountId,
    /// The local user's relationship toward it.
    pub relationship: FriendRelationship,
}

/// Body of a friends-list snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendsListBody {
    /// All known relationship entries, individuals and clans mixed.
    pub friends: Vec<FriendsListEntry>,
}

/// One friend's slice of a persona-state delta.
///
/// Optional fields within a flagged category apply as that field's
/// default (empty/zero) when absent; fields in unflagged categories are
/// ignored entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaStateEntry {
    /// The identity the delta is about.
    pub id: AccountId,
    /// Display name; honored under `PLAYER_NAME`.
    pub persona_name: Option<String>,
    /// Presence state; honored under `PRESENCE`.
    pub persona_state: Option<PersonaState>,
    /// Game display name; honored under `GAME_EXTRA_INFO`.
    pub game_name: Option<String>,
    /// Packed game id; honored under `GAME_EXTRA_INFO`.
    pub game_id: Option<u64>,
    /// Game application id; honored under `GAME_EXTRA_INFO`.
    pub app_id: Option<u32>,
}

/// Body of a persona-state delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaStateBody {
    /// Which field categories this delta carries, for every entry.
    pub status_flags: StatusFlags,
    /// Per-friend partial updates.
    pub friends: Vec<PersonaStateEntry>,
}

/// Body of an incoming chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendMessageBody {
    /// Who sent it.
    pub sender: AccountId,
    /// What kind of chat entry it is.
    pub entry_type: ChatEntryType,
    /// The raw message payload.
    pub message: Bytes,
}

/// Decoded inbound messages, one variant per handled kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// Local account info for the signed-in user.
    AccountInfo(AccountInfoBody),
    /// Bootstrap snapshot of the social graph.
    FriendsList(FriendsListBody),
    /// Incremental presence delta.
    PersonaState(PersonaStateBody),
    /// Incoming chat payload.
    FriendMessage(FriendMessageBody),
    /// Any kind tag this engine does not handle. Always ignored.
    Unknown {
        /// The unrecognized kind tag, kept for diagnostics.
        kind: u32,
    },
}

/// Decode a framed payload into a [`ClientMessage`].
///
/// Unrecognized kind tags are not an error; they decode to
/// [`ClientMessage::Unknown`]. A recognized tag with a payload that does
/// not parse is a [`SyncError::Decode`], and the caller must drop the
/// whole frame.
pub fn decode_frame(kind_tag: u32, payload: &[u8]) -> Result<ClientMessage> {
    match kind_tag {
        kind::ACCOUNT_INFO => Ok(ClientMessage::AccountInfo(decode_body(payload)?)),
        kind::FRIENDS_LIST => Ok(ClientMessage::FriendsList(decode_body(payload)?)),
        kind::PERSONA_STATE => Ok(ClientMessage::PersonaState(decode_body(payload)?)),
        kind::FRIEND_MESSAGE => Ok(ClientMessage::FriendMessage(decode_body(payload)?)),
        other => Ok(ClientMessage::Unknown { kind: other }),
    }
}

/// Encode a message body to CBOR. Counterpart of [`decode_frame`] for
/// transports and tests that build frames.
pub fn encode_body<T: Serialize>(body: &T) -> Vec<u8> {
    let mut buf = Vec::new();
    // Serialization into a Vec cannot fail for these in-memory types.
    ciborium::ser::into_writer(body, &mut buf).expect("CBOR encoding to Vec");
    buf
}

fn decode_body<T: for<'de> Deserialize<'de>>(payload: &[u8]) -> Result<T> {
    ciborium::de::from_reader(payload).map_err(|e| SyncError::Decode(e.to_string()))
}

/// Outbound actions handed to the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutboundMessage {
    /// Ask the service for presence data about a batch of individuals.
    RequestFriendData {
        /// Which field categories are being requested.
        flags: StatusFlags,
        /// The individuals to fetch data for.
        friends: Vec<AccountId>,
    },

    /// Broadcast the local user's new presence state.
    ChangeStatus {
        /// The state to announce.
        state: PersonaState,
    },

    /// Send a chat payload to a friend.
    FriendMessage {
        /// The recipient.
        target: AccountId,
        /// What kind of chat entry it is.
        entry_type: ChatEntryType,
        /// The message payload.
        message: Bytes,
    },
}
