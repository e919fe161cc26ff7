//! # Roster Core
//!
//! Pure data model for the social-presence layer of a game-platform
//! client: account identifiers, persona state, relationships, and the
//! roster entity types.
//!
//! This crate contains no I/O, no locking, no networking. It is plain
//! data plus conversions to and from wire codes.
//!
//! ## Key Types
//!
//! - [`AccountId`] - packed 64-bit identifier for an account or clan
//! - [`FriendPersona`] / [`ClanPersona`] - per-identity known state
//! - [`PersonaState`] / [`FriendRelationship`] - presence and graph enums
//! - [`StatusFlags`] - bitmask scoping a partial presence delta

pub mod account;
pub mod error;
pub mod persona;

pub use account::AccountId;
pub use error::CoreError;
pub use persona::{
    ChatEntryType, ClanPersona, FriendPersona, FriendRelationship, GamePlayed, PersonaState,
    RosterEntry, StatusFlags,
};
