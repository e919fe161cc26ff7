//! Integration tests for the reconciliation engine.
//!
//! Each test drives decoded messages through an engine wired to
//! recording collaborators and asserts on the cache state, the outbound
//! actions, and the published events.

use roster_core::{
    AccountId, ChatEntryType, FriendRelationship, GamePlayed, PersonaState, StatusFlags,
};
use roster_sync::{
    encode_body, kind, AccountInfoBody, ClientMessage, FriendMessageBody, OutboundMessage,
    PersonaStateEntry, RosterEvent, SyncError,
};
use roster_testkit::fixtures::{
    clan_entry, friend_entry, game_entry, name_state_entry, TestHarness,
};

#[test]
fn bootstrap_seeds_cache_and_requests_presence_batch() {
    let harness = TestHarness::new();

    harness.bootstrap(vec![
        friend_entry(100, FriendRelationship::Friend),
        friend_entry(101, FriendRelationship::RequestRecipient),
        clan_entry(50),
    ]);

    assert_eq!(harness.engine.friend_count(), 2);
    assert_eq!(
        harness.engine.friend_relationship(AccountId::individual(100)),
        FriendRelationship::Friend
    );
    assert_eq!(
        harness.engine.friend_by_index(0),
        Some(AccountId::individual(100))
    );

    // Exactly one batched request for the two individuals, default flags.
    let sent = harness.outbound.take();
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        OutboundMessage::RequestFriendData { flags, friends } => {
            assert_eq!(*flags, StatusFlags::PLAYER_NAME | StatusFlags::PRESENCE);
            assert_eq!(
                friends,
                &vec![AccountId::individual(100), AccountId::individual(101)]
            );
        }
        other => panic!("expected RequestFriendData, got {other:?}"),
    }

    // One snapshot event carrying the raw entry list, clan included.
    let events = harness.events.take();
    assert_eq!(events.len(), 1);
    match &events[0] {
        RosterEvent::FriendsList { friends } => assert_eq!(friends.len(), 3),
        other => panic!("expected FriendsList event, got {other:?}"),
    }
}

#[test]
fn bootstrap_assigns_local_identity_once() {
    let local = AccountId::individual(42);
    let harness = TestHarness::with_local(local);
    assert_eq!(harness.engine.local_id(), AccountId::ZERO);

    harness.bootstrap(vec![]);
    assert_eq!(harness.engine.local_id(), local);

    // A later snapshot does not reassign it.
    harness.bootstrap(vec![friend_entry(7, FriendRelationship::Friend)]);
    assert_eq!(harness.engine.local_id(), local);
}

#[test]
fn empty_snapshot_still_requests_and_publishes() {
    let harness = TestHarness::new();
    harness.bootstrap(vec![]);

    let sent = harness.outbound.take();
    assert!(matches!(
        sent.as_slice(),
        [OutboundMessage::RequestFriendData { friends, .. }] if friends.is_empty()
    ));
    assert_eq!(harness.events.len(), 1);
}

#[test]
fn unclassified_snapshot_entries_are_dropped() {
    let harness = TestHarness::new();

    // Account type 8 is neither individual nor clan.
    let odd = AccountId::from_raw(5 | (8u64 << 52) | (1u64 << 56));
    assert!(!odd.is_individual() && !odd.is_clan());

    harness.bootstrap(vec![roster_sync::FriendsListEntry {
        id: odd,
        relationship: FriendRelationship::Friend,
    }]);

    assert_eq!(harness.engine.friend_count(), 0);
    assert_eq!(
        harness.engine.friend_relationship(odd),
        FriendRelationship::None
    );
    // The raw snapshot event still carries the entry untouched.
    match &harness.events.take()[0] {
        RosterEvent::FriendsList { friends } => assert_eq!(friends[0].id, odd),
        other => panic!("expected FriendsList event, got {other:?}"),
    }
}

#[test]
fn delta_merges_only_flagged_categories() {
    let harness = TestHarness::new();
    let id = AccountId::individual(100);
    harness.bootstrap(vec![friend_entry(100, FriendRelationship::Friend)]);
    harness.events.take();

    harness.persona_delta(
        StatusFlags::PLAYER_NAME | StatusFlags::PRESENCE,
        vec![name_state_entry(id, "Ana", PersonaState::Online)],
    );

    assert_eq!(harness.engine.friend_persona_name(id), "Ana");
    assert_eq!(harness.engine.friend_persona_state(id), PersonaState::Online);
    assert_eq!(harness.engine.friend_game_played(id), None);
    // Relationship is not a delta category; it came from the snapshot.
    assert_eq!(
        harness.engine.friend_relationship(id),
        FriendRelationship::Friend
    );

    let events = harness.events.take();
    assert_eq!(events.len(), 1);
    match &events[0] {
        RosterEvent::PersonaState { persona } => {
            assert_eq!(persona.id, id);
            assert_eq!(persona.name.as_deref(), Some("Ana"));
            assert_eq!(persona.state, PersonaState::Online);
        }
        other => panic!("expected PersonaState event, got {other:?}"),
    }
}

#[test]
fn unflagged_fields_survive_later_deltas() {
    let harness = TestHarness::new();
    let id = AccountId::individual(100);
    harness.bootstrap(vec![friend_entry(100, FriendRelationship::Friend)]);

    harness.persona_delta(
        StatusFlags::PLAYER_NAME | StatusFlags::PRESENCE,
        vec![name_state_entry(id, "Ana", PersonaState::Online)],
    );
    harness.persona_delta(StatusFlags::GAME_EXTRA_INFO, vec![game_entry(id, 440, 440, "Team Fortress 2")]);

    // A presence-only delta that also smuggles a name must not apply it.
    let mut entry = name_state_entry(id, "Mallory", PersonaState::Away);
    entry.game_name = Some("Wrong Game".into());
    harness.persona_delta(StatusFlags::PRESENCE, vec![entry]);

    assert_eq!(harness.engine.friend_persona_name(id), "Ana");
    assert_eq!(harness.engine.friend_persona_state(id), PersonaState::Away);
    assert_eq!(
        harness.engine.friend_game_played(id),
        Some(GamePlayed {
            game_id: 440,
            app_id: 440,
            name: "Team Fortress 2".into()
        })
    );
}

#[test]
fn game_triple_replaces_as_one_unit() {
    let harness = TestHarness::new();
    let id = AccountId::individual(100);
    harness.bootstrap(vec![friend_entry(100, FriendRelationship::Friend)]);

    harness.persona_delta(StatusFlags::GAME_EXTRA_INFO, vec![game_entry(id, 440, 440, "Team Fortress 2")]);
    harness.persona_delta(StatusFlags::GAME_EXTRA_INFO, vec![game_entry(id, 570, 570, "Dota 2")]);

    // Never a stale name with a fresh id.
    assert_eq!(
        harness.engine.friend_game_played(id),
        Some(GamePlayed {
            game_id: 570,
            app_id: 570,
            name: "Dota 2".into()
        })
    );

    // An all-empty triple clears the activity.
    harness.persona_delta(
        StatusFlags::GAME_EXTRA_INFO,
        vec![PersonaStateEntry {
            id,
            ..Default::default()
        }],
    );
    assert_eq!(harness.engine.friend_game_played(id), None);
}

#[test]
fn delta_for_unknown_identity_is_dropped_silently() {
    let harness = TestHarness::new();
    harness.bootstrap(vec![friend_entry(100, FriendRelationship::Friend)]);
    harness.events.take();

    let stranger = AccountId::individual(999);
    harness.persona_delta(
        StatusFlags::PLAYER_NAME | StatusFlags::PRESENCE,
        vec![name_state_entry(stranger, "Ghost", PersonaState::Online)],
    );

    assert!(harness.events.is_empty());
    assert_eq!(harness.engine.friend_count(), 1);
    assert_eq!(harness.engine.friend_persona_name(stranger), "");
    assert_eq!(
        harness.engine.friend_persona_state(stranger),
        PersonaState::Offline
    );
}

#[test]
fn delta_before_any_snapshot_is_dropped() {
    let harness = TestHarness::new();

    harness.persona_delta(
        StatusFlags::PRESENCE,
        vec![name_state_entry(
            AccountId::individual(100),
            "Early",
            PersonaState::Online,
        )],
    );

    assert!(harness.events.is_empty());
    assert!(harness.outbound.is_empty());
    assert_eq!(harness.engine.friend_count(), 0);
}

#[test]
fn delta_for_clan_identity_is_dropped() {
    let harness = TestHarness::new();
    harness.bootstrap(vec![clan_entry(50)]);
    harness.events.take();

    harness.persona_delta(
        StatusFlags::PRESENCE,
        vec![name_state_entry(
            AccountId::clan(50),
            "Clan",
            PersonaState::Online,
        )],
    );

    assert!(harness.events.is_empty());
}

#[test]
fn local_user_aliases_through_peer_accessors() {
    let local = AccountId::individual(42);
    let harness = TestHarness::with_local(local);
    harness.bootstrap(vec![]);
    harness.events.take();

    harness
        .engine
        .handle_message(ClientMessage::AccountInfo(AccountInfoBody {
            persona_name: "Me".into(),
        }));

    harness.persona_delta(
        StatusFlags::PRESENCE,
        vec![PersonaStateEntry {
            id: local,
            persona_state: Some(PersonaState::LookingToPlay),
            ..Default::default()
        }],
    );

    // Local accessors and peer-facing accessors agree on the same id.
    assert_eq!(harness.engine.persona_name(), "Me");
    assert_eq!(harness.engine.friend_persona_name(local), "Me");
    assert_eq!(harness.engine.persona_state(), PersonaState::LookingToPlay);
    assert_eq!(
        harness.engine.friend_persona_state(local),
        PersonaState::LookingToPlay
    );
    // The local user never shows up in the friend view.
    assert_eq!(harness.engine.friend_count(), 0);

    // The local delta was republished like any other applied change.
    let events = harness.events.take();
    assert!(matches!(
        events.as_slice(),
        [RosterEvent::PersonaState { persona }] if persona.id == local
    ));
}

#[test]
fn account_info_sets_local_name_without_event() {
    let harness = TestHarness::new();

    harness
        .engine
        .handle_message(ClientMessage::AccountInfo(AccountInfoBody {
            persona_name: "Me".into(),
        }));

    assert_eq!(harness.engine.persona_name(), "Me");
    assert!(harness.events.is_empty());
    assert!(harness.outbound.is_empty());
}

#[test]
fn friend_message_publishes_decoded_text() {
    let harness = TestHarness::new();
    let sender = AccountId::individual(100);

    harness
        .engine
        .handle_message(ClientMessage::FriendMessage(FriendMessageBody {
            sender,
            entry_type: ChatEntryType::ChatMsg,
            message: bytes::Bytes::from_static("hi there".as_bytes()),
        }));

    let events = harness.events.take();
    assert_eq!(
        events,
        vec![RosterEvent::FriendMessage {
            sender,
            entry_type: ChatEntryType::ChatMsg,
            message: "hi there".into(),
        }]
    );
    // Chat never mutates the cache.
    assert_eq!(harness.engine.friend_count(), 0);
}

#[test]
fn send_chat_message_emits_exactly_one_action() {
    let harness = TestHarness::new();
    let target = AccountId::individual(100);

    harness
        .engine
        .send_chat_message(target, ChatEntryType::ChatMsg, "hi")
        .unwrap();

    let sent = harness.outbound.take();
    assert_eq!(
        sent,
        vec![OutboundMessage::FriendMessage {
            target,
            entry_type: ChatEntryType::ChatMsg,
            message: bytes::Bytes::from_static(b"hi"),
        }]
    );
    assert!(harness.events.is_empty());
    assert_eq!(harness.engine.friend_count(), 0);
}

#[test]
fn set_persona_state_broadcasts_then_applies_locally() {
    let harness = TestHarness::new();

    harness.engine.set_persona_state(PersonaState::Away).unwrap();

    assert_eq!(
        harness.outbound.take(),
        vec![OutboundMessage::ChangeStatus {
            state: PersonaState::Away
        }]
    );
    // Applied optimistically, without waiting for confirmation.
    assert_eq!(harness.engine.persona_state(), PersonaState::Away);
    assert!(harness.events.is_empty());
}

#[test]
fn set_persona_name_fails_fast() {
    let harness = TestHarness::new();
    let err = harness.engine.set_persona_name("NewName").unwrap_err();
    assert!(matches!(err, SyncError::NotImplemented(_)));
    assert!(harness.outbound.is_empty());
    assert_eq!(harness.engine.persona_name(), "");
}

#[test]
fn malformed_frame_leaves_all_state_untouched() {
    // Capture the warn path instead of spilling it into test output.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let harness = TestHarness::new();
    harness.bootstrap(vec![friend_entry(100, FriendRelationship::Friend)]);
    harness.events.take();
    harness.outbound.take();

    harness
        .engine
        .handle_frame(kind::PERSONA_STATE, &[0xFF, 0x13, 0x37]);

    assert!(harness.events.is_empty());
    assert!(harness.outbound.is_empty());
    assert_eq!(harness.engine.friend_count(), 1);
    assert_eq!(
        harness.engine.friend_relationship(AccountId::individual(100)),
        FriendRelationship::Friend
    );
}

#[test]
fn unrecognized_frame_kind_is_a_no_op() {
    let harness = TestHarness::new();
    // Payload content is irrelevant for an unknown kind.
    harness.engine.handle_frame(0x9999, b"whatever");
    assert!(harness.events.is_empty());
    assert!(harness.outbound.is_empty());
}

#[test]
fn well_formed_frame_dispatches_like_a_decoded_message() {
    let harness = TestHarness::new();
    let payload = encode_body(&AccountInfoBody {
        persona_name: "Framed".into(),
    });

    harness.engine.handle_frame(kind::ACCOUNT_INFO, &payload);

    assert_eq!(harness.engine.persona_name(), "Framed");
}

#[test]
fn events_follow_processing_order_within_one_delta() {
    let harness = TestHarness::new();
    let first = AccountId::individual(1);
    let second = AccountId::individual(2);
    harness.bootstrap(vec![
        friend_entry(1, FriendRelationship::Friend),
        friend_entry(2, FriendRelationship::Friend),
    ]);
    harness.events.take();

    harness.persona_delta(
        StatusFlags::PRESENCE,
        vec![
            name_state_entry(first, "", PersonaState::Online),
            name_state_entry(second, "", PersonaState::Busy),
        ],
    );

    let events = harness.events.take();
    assert_eq!(events.len(), 2);
    assert!(
        matches!(&events[0], RosterEvent::PersonaState { persona } if persona.id == first)
    );
    assert!(
        matches!(&events[1], RosterEvent::PersonaState { persona } if persona.id == second)
    );
}
