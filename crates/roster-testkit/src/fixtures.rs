//! Test fixtures and helpers.
//!
//! Recording collaborators plus a harness that wires an engine to them,
//! so integration tests can feed inbound messages and assert on exactly
//! what went out and what was published.

use std::sync::{Arc, Mutex};

use roster_core::{AccountId, FriendRelationship, PersonaState, StatusFlags};
use roster_sync::{
    EventSink, FriendsListBody, FriendsListEntry, OutboundMessage, PersonaStateBody,
    PersonaStateEntry, ReconciliationEngine, Result, RosterEvent, Transport,
};

/// Shared, cloneable log of outbound messages.
#[derive(Clone, Default)]
pub struct SentLog(Arc<Mutex<Vec<OutboundMessage>>>);

impl SentLog {
    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.0.lock().unwrap())
    }

    /// Number of messages recorded so far.
    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared, cloneable log of published events.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<RosterEvent>>>);

impl EventLog {
    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<RosterEvent> {
        std::mem::take(&mut self.0.lock().unwrap())
    }

    /// Number of events recorded so far.
    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Transport that records every send.
pub struct RecordingTransport {
    local_id: AccountId,
    log: SentLog,
}

impl RecordingTransport {
    /// Create a transport for `local_id`, returning the shared log.
    pub fn new(local_id: AccountId) -> (Self, SentLog) {
        let log = SentLog::default();
        (
            Self {
                local_id,
                log: log.clone(),
            },
            log,
        )
    }
}

impl Transport for RecordingTransport {
    fn send(&self, message: OutboundMessage) -> Result<()> {
        self.log.0.lock().unwrap().push(message);
        Ok(())
    }

    fn local_id(&self) -> AccountId {
        self.local_id
    }
}

/// Sink that records every published event.
pub struct RecordingSink {
    log: EventLog,
}

impl RecordingSink {
    /// Create a sink, returning the shared log.
    pub fn new() -> (Self, EventLog) {
        let log = EventLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: RosterEvent) {
        self.log.0.lock().unwrap().push(event);
    }
}

/// An engine wired to recording collaborators.
pub struct TestHarness {
    /// The engine under test.
    pub engine: ReconciliationEngine<RecordingTransport, RecordingSink>,
    /// Everything the engine sent.
    pub outbound: SentLog,
    /// Everything the engine published.
    pub events: EventLog,
    /// The session identity the transport reports.
    pub local_id: AccountId,
}

impl TestHarness {
    /// Harness with the default local identity.
    pub fn new() -> Self {
        Self::with_local(AccountId::individual(1))
    }

    /// Harness whose transport reports `local_id` as the session identity.
    pub fn with_local(local_id: AccountId) -> Self {
        let (transport, outbound) = RecordingTransport::new(local_id);
        let (sink, events) = RecordingSink::new();
        Self {
            engine: ReconciliationEngine::new(transport, sink),
            outbound,
            events,
            local_id,
        }
    }

    /// Feed a friends-list snapshot through the engine.
    pub fn bootstrap(&self, friends: Vec<FriendsListEntry>) {
        self.engine
            .handle_message(roster_sync::ClientMessage::FriendsList(FriendsListBody {
                friends,
            }));
    }

    /// Feed a persona-state delta through the engine.
    pub fn persona_delta(&self, status_flags: StatusFlags, friends: Vec<PersonaStateEntry>) {
        self.engine
            .handle_message(roster_sync::ClientMessage::PersonaState(PersonaStateBody {
                status_flags,
                friends,
            }));
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot entry for an individual with the given relationship.
pub fn friend_entry(account_number: u32, relationship: FriendRelationship) -> FriendsListEntry {
    FriendsListEntry {
        id: AccountId::individual(account_number),
        relationship,
    }
}

/// A snapshot entry for a clan.
pub fn clan_entry(account_number: u32) -> FriendsListEntry {
    FriendsListEntry {
        id: AccountId::clan(account_number),
        relationship: FriendRelationship::None,
    }
}

/// A delta entry carrying a name and a state.
pub fn name_state_entry(id: AccountId, name: &str, state: PersonaState) -> PersonaStateEntry {
    PersonaStateEntry {
        id,
        persona_name: Some(name.to_owned()),
        persona_state: Some(state),
        ..Default::default()
    }
}

/// A delta entry carrying a game-activity triple.
pub fn game_entry(id: AccountId, game_id: u64, app_id: u32, game_name: &str) -> PersonaStateEntry {
    PersonaStateEntry {
        id,
        game_name: Some(game_name.to_owned()),
        game_id: Some(game_id),
        app_id: Some(app_id),
        ..Default::default()
    }
}

/// A random individual account id, for tests that need uniqueness but
/// not determinism.
pub fn random_individual() -> AccountId {
    use rand::Rng;
    AccountId::individual(rand::thread_rng().gen_range(1..=u32::MAX))
}
