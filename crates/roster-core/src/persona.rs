//! Persona state, relationships, and roster entities.
//!
//! These are the values the reconciliation engine keeps per identity:
//! a display name, the social-graph relationship toward the local user,
//! and (for individuals) live presence and game-activity fields.

use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

use crate::account::AccountId;
use crate::error::CoreError;

/// Online status of an individual account.
///
/// Serialized as its wire code; unknown codes fail decoding rather than
/// mapping onto a wrong variant.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum PersonaState {
    /// Not connected, or presence not yet learned.
    #[default]
    Offline = 0,
    Online = 1,
    Busy = 2,
    Away = 3,
    Snooze = 4,
    LookingToTrade = 5,
    LookingToPlay = 6,
}

impl PersonaState {
    /// Parse from a wire code.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Offline),
            1 => Some(Self::Online),
            2 => Some(Self::Busy),
            3 => Some(Self::Away),
            4 => Some(Self::Snooze),
            5 => Some(Self::LookingToTrade),
            6 => Some(Self::LookingToPlay),
            _ => None,
        }
    }
}

impl From<PersonaState> for u8 {
    fn from(state: PersonaState) -> Self {
        state as u8
    }
}

impl TryFrom<u8> for PersonaState {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(CoreError::UnknownPersonaState(value))
    }
}

/// The local user's social-graph edge toward an identity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum FriendRelationship {
    /// No relationship (also the sentinel for unknown identities).
    #[default]
    None = 0,
    Blocked = 1,
    /// They sent us a friend request.
    RequestRecipient = 2,
    Friend = 3,
    /// We sent them a friend request.
    RequestInitiator = 4,
    Ignored = 5,
    IgnoredFriend = 6,
    SuggestedFriend = 7,
}

impl FriendRelationship {
    /// Parse from a wire code.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Blocked),
            2 => Some(Self::RequestRecipient),
            3 => Some(Self::Friend),
            4 => Some(Self::RequestInitiator),
            5 => Some(Self::Ignored),
            6 => Some(Self::IgnoredFriend),
            7 => Some(Self::SuggestedFriend),
            _ => None,
        }
    }
}

impl From<FriendRelationship> for u8 {
    fn from(relationship: FriendRelationship) -> Self {
        relationship as u8
    }
}

impl TryFrom<u8> for FriendRelationship {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(CoreError::UnknownRelationship(value))
    }
}

/// Kind of a chat payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum ChatEntryType {
    /// A plain text chat message.
    ChatMsg = 1,
    /// The sender is typing.
    Typing = 2,
    /// An invitation into a game.
    InviteGame = 3,
    /// An emote.
    Emote = 4,
    /// The sender left the conversation.
    LeftConversation = 6,
}

impl ChatEntryType {
    /// Parse from a wire code.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::ChatMsg),
            2 => Some(Self::Typing),
            3 => Some(Self::InviteGame),
            4 => Some(Self::Emote),
            6 => Some(Self::LeftConversation),
            _ => None,
        }
    }
}

impl From<ChatEntryType> for u8 {
    fn from(entry_type: ChatEntryType) -> Self {
        entry_type as u8
    }
}

impl TryFrom<u8> for ChatEntryType {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(CoreError::UnknownChatEntryType(value))
    }
}

/// Bitmask qualifying which field categories a persona delta carries.
///
/// Bits outside the known set are reserved and ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusFlags(pub u32);

impl StatusFlags {
    /// No categories.
    pub const EMPTY: Self = Self(0);
    /// The delta carries a display name.
    pub const PLAYER_NAME: Self = Self(1 << 1);
    /// The delta carries a presence state.
    pub const PRESENCE: Self = Self(1 << 4);
    /// The delta carries the game-activity triple.
    pub const GAME_EXTRA_INFO: Self = Self(1 << 8);

    /// Whether every bit of `other` is set in `self`.
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether no bits are set.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The raw bitmask.
    pub const fn bits(&self) -> u32 {
        self.0
    }
}

impl BitOr for StatusFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for StatusFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// The game an individual is currently playing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePlayed {
    /// Packed game identifier.
    pub game_id: u64,
    /// Application id of the game.
    pub app_id: u32,
    /// Display name of the game (may name a non-catalog game).
    pub name: String,
}

impl GamePlayed {
    /// Whether all three fields are at their zero values.
    ///
    /// An all-empty triple means "not playing anything".
    pub fn is_empty(&self) -> bool {
        self.game_id == 0 && self.app_id == 0 && self.name.is_empty()
    }
}

/// Known state of one individual: a friend, or the local user.
///
/// The id is fixed at construction. Every other field starts at its
/// default and is only ever moved by an informing message; a field that
/// was never informed stays at its default indefinitely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendPersona {
    /// The identity this record describes.
    pub id: AccountId,
    /// Display name; `None` until first informed.
    pub name: Option<String>,
    /// Relationship toward the local user.
    pub relationship: FriendRelationship,
    /// Presence state.
    pub state: PersonaState,
    /// Current game activity; `None` when not playing.
    pub game: Option<GamePlayed>,
}

impl FriendPersona {
    /// Create a record with all fields at their defaults.
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            name: None,
            relationship: FriendRelationship::None,
            state: PersonaState::Offline,
            game: None,
        }
    }
}

/// Known state of one clan: name and relationship only, no presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClanPersona {
    /// The identity this record describes.
    pub id: AccountId,
    /// Display name; `None` until first informed.
    pub name: Option<String>,
    /// Relationship toward the local user.
    pub relationship: FriendRelationship,
}

impl ClanPersona {
    /// Create a record with all fields at their defaults.
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            name: None,
            relationship: FriendRelationship::None,
        }
    }
}

/// A roster entity: either an individual or a clan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterEntry {
    /// An individual account with presence fields.
    Friend(FriendPersona),
    /// A clan account; relationship only.
    Clan(ClanPersona),
}

impl RosterEntry {
    /// The identity of this entry.
    pub fn id(&self) -> AccountId {
        match self {
            Self::Friend(f) => f.id,
            Self::Clan(c) => c.id,
        }
    }

    /// The display name, if informed.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Friend(f) => f.name.as_deref(),
            Self::Clan(c) => c.name.as_deref(),
        }
    }

    /// The relationship toward the local user.
    pub fn relationship(&self) -> FriendRelationship {
        match self {
            Self::Friend(f) => f.relationship,
            Self::Clan(c) => c.relationship,
        }
    }
}
