//! Proptest generators for property-based testing.

use proptest::prelude::*;

use roster_core::{AccountId, FriendRelationship, PersonaState, StatusFlags};
use roster_sync::PersonaStateEntry;

/// Generate an individual account id.
pub fn individual_id() -> impl Strategy<Value = AccountId> {
    (1u32..=u32::MAX).prop_map(AccountId::individual)
}

/// Generate a clan account id.
pub fn clan_id() -> impl Strategy<Value = AccountId> {
    (1u32..=u32::MAX).prop_map(AccountId::clan)
}

/// Generate any persona state.
pub fn persona_state() -> impl Strategy<Value = PersonaState> {
    (0u8..=6).prop_map(|code| PersonaState::from_u8(code).unwrap())
}

/// Generate any relationship.
pub fn relationship() -> impl Strategy<Value = FriendRelationship> {
    (0u8..=7).prop_map(|code| FriendRelationship::from_u8(code).unwrap())
}

/// Generate any subset of the known status-flag bits.
pub fn status_flags() -> impl Strategy<Value = StatusFlags> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(name, presence, game)| {
        let mut flags = StatusFlags::EMPTY;
        if name {
            flags |= StatusFlags::PLAYER_NAME;
        }
        if presence {
            flags |= StatusFlags::PRESENCE;
        }
        if game {
            flags |= StatusFlags::GAME_EXTRA_INFO;
        }
        flags
    })
}

/// Generate a display name.
pub fn display_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 _-]{0,23}".prop_map(String::from)
}

/// Generate a fully-populated delta entry for `id`.
///
/// Every category carries a value, so which fields actually move is
/// decided entirely by the flags a test pairs this with.
pub fn full_entry(id: AccountId) -> impl Strategy<Value = PersonaStateEntry> {
    (
        display_name(),
        persona_state(),
        display_name(),
        1u64..=u64::MAX,
        1u32..=u32::MAX,
    )
        .prop_map(
            move |(persona_name, state, game_name, game_id, app_id)| PersonaStateEntry {
                id,
                persona_name: Some(persona_name),
                persona_state: Some(state),
                game_name: Some(game_name),
                game_id: Some(game_id),
                app_id: Some(app_id),
            },
        )
}
