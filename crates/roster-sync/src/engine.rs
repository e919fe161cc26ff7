//! The reconciliation engine.
//!
//! Receives decoded inbound messages in delivery order, applies them to
//! the local user and the roster cache, emits outbound protocol actions,
//! and republishes each applied change as a discrete event.

use std::sync::RwLock;

use roster_cache::RosterCache;
use roster_core::{
    AccountId, ChatEntryType, ClanPersona, FriendPersona, FriendRelationship, GamePlayed,
    PersonaState, RosterEntry, StatusFlags,
};

use crate::error::{Result, SyncError};
use crate::events::{EventSink, RosterEvent};
use crate::messages::{
    decode_frame, AccountInfoBody, ClientMessage, FriendMessageBody, FriendsListBody,
    OutboundMessage, PersonaStateBody, PersonaStateEntry,
};
use crate::transport::Transport;

/// Configuration for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Field categories requested for every individual in a snapshot.
    pub request_flags: StatusFlags,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            request_flags: StatusFlags::PLAYER_NAME | StatusFlags::PRESENCE,
        }
    }
}

/// Stateless dispatcher over the social-graph state.
///
/// All durable state lives in the cache and the distinguished local-user
/// slot; the engine itself only routes. Message handling is driven by a
/// single logical owner in delivery order, while the read accessors may
/// be called concurrently from other threads.
pub struct ReconciliationEngine<T: Transport, E: EventSink> {
    transport: T,
    events: E,
    cache: RosterCache,
    /// The signed-in user. Never stored in the cache; its id is assigned
    /// once, when the first snapshot arrives, and is stable thereafter.
    local_user: RwLock<FriendPersona>,
    config: EngineConfig,
}

impl<T: Transport, E: EventSink> ReconciliationEngine<T, E> {
    /// Create an engine with default configuration.
    pub fn new(transport: T, events: E) -> Self {
        Self::with_config(transport, events, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(transport: T, events: E, config: EngineConfig) -> Self {
        Self {
            transport,
            events,
            cache: RosterCache::new(),
            local_user: RwLock::new(FriendPersona::new(AccountId::ZERO)),
            config,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Inbound
    // ─────────────────────────────────────────────────────────────────────

    /// Decode and dispatch one framed inbound message.
    ///
    /// A payload that fails to decode is dropped whole: logged, no state
    /// touched, nothing published. Decode failures never propagate.
    pub fn handle_frame(&self, kind_tag: u32, payload: &[u8]) {
        match decode_frame(kind_tag, payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::warn!(kind = kind_tag, error = %e, "dropping malformed inbound message");
            }
        }
    }

    /// Dispatch one decoded inbound message.
    pub fn handle_message(&self, message: ClientMessage) {
        match message {
            ClientMessage::AccountInfo(body) => self.handle_account_info(body),
            ClientMessage::FriendsList(body) => self.handle_friends_list(body),
            ClientMessage::PersonaState(body) => self.handle_persona_state(body),
            ClientMessage::FriendMessage(body) => self.handle_friend_message(body),
            ClientMessage::Unknown { kind } => {
                tracing::trace!(kind, "ignoring unhandled message kind");
            }
        }
    }

    fn handle_account_info(&self, body: AccountInfoBody) {
        let mut local = self.local_user.write().unwrap();
        local.name = Some(body.persona_name);
        // No event: consumers learn the local name through the accessor.
    }

    /// Bootstrap: seed the cache from a relationship snapshot.
    ///
    /// Individuals and clans are created (or replaced) from their
    /// entries; ids classifying as neither are dropped. One batched
    /// presence request goes out for all individuals in the snapshot.
    /// A single request, not one per friend, so a large list does not
    /// turn into a request storm.
    fn handle_friends_list(&self, body: FriendsListBody) {
        {
            let mut local = self.local_user.write().unwrap();
            if !local.id.is_valid() {
                local.id = self.transport.local_id();
            }
        }

        let mut request_batch = Vec::new();

        for entry in &body.friends {
            if entry.id.is_individual() {
                let mut friend = FriendPersona::new(entry.id);
                friend.relationship = entry.relationship;
                self.cache.insert_friend(friend);
                request_batch.push(entry.id);
            } else if entry.id.is_clan() {
                self.cache.insert_clan(ClanPersona::new(entry.id));
            } else {
                tracing::debug!(id = %entry.id, "dropping snapshot entry of unknown account type");
            }
        }

        let request = OutboundMessage::RequestFriendData {
            flags: self.config.request_flags,
            friends: request_batch,
        };
        if let Err(e) = self.transport.send(request) {
            tracing::warn!(error = %e, "failed to request presence data for snapshot");
        }

        self.events.publish(RosterEvent::FriendsList {
            friends: body.friends,
        });
    }

    /// Merge a flag-qualified presence delta.
    ///
    /// Each entry resolves to the local user (id aliasing) or a cached
    /// friend. Entries about identities this engine has never learned of
    /// are dropped silently, by policy: a delta never materializes an
    /// entity. One event per applied entry, carrying the merged view.
    fn handle_persona_state(&self, body: PersonaStateBody) {
        let flags = body.status_flags;

        for entry in &body.friends {
            let merged = if self.is_local_id(entry.id) {
                let mut local = self.local_user.write().unwrap();
                apply_delta(&mut local, flags, entry);
                Some(local.clone())
            } else {
                self.cache
                    .patch_friend(entry.id, |friend| apply_delta(friend, flags, entry))
            };

            match merged {
                Some(persona) => self.events.publish(RosterEvent::PersonaState { persona }),
                None => {
                    tracing::trace!(id = %entry.id, "dropping persona delta for unknown identity");
                }
            }
        }
    }

    fn handle_friend_message(&self, body: FriendMessageBody) {
        let message = String::from_utf8_lossy(&body.message).into_owned();
        self.events.publish(RosterEvent::FriendMessage {
            sender: body.sender,
            entry_type: body.entry_type,
            message,
        });
    }

    // ─────────────────────────────────────────────────────────────────────
    // Outbound
    // ─────────────────────────────────────────────────────────────────────

    /// Broadcast a new presence state for the local user, then apply it
    /// locally without waiting for confirmation.
    ///
    /// If the service rejects the broadcast, local and remote state
    /// diverge; this engine has no reconciliation path for that.
    pub fn set_persona_state(&self, state: PersonaState) -> Result<()> {
        self.transport
            .send(OutboundMessage::ChangeStatus { state })?;
        self.local_user.write().unwrap().state = state;
        Ok(())
    }

    /// Send a chat message to a friend. No local mutation, no local echo.
    pub fn send_chat_message(
        &self,
        target: AccountId,
        entry_type: ChatEntryType,
        message: &str,
    ) -> Result<()> {
        self.transport.send(OutboundMessage::FriendMessage {
            target,
            entry_type,
            message: bytes::Bytes::copy_from_slice(message.as_bytes()),
        })
    }

    /// Set the local user's display name.
    ///
    /// The wire structure for this action is undefined in this engine;
    /// the call fails fast rather than silently doing nothing.
    pub fn set_persona_name(&self, _name: &str) -> Result<()> {
        Err(SyncError::NotImplemented("persona name broadcast"))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read surface
    // ─────────────────────────────────────────────────────────────────────
    //
    // Unknown identities return documented sentinels, never errors:
    // empty string for names, Offline for state, None relationship,
    // absent game. The local user's own id resolves through every
    // peer-facing accessor.

    /// The local user's identity, `AccountId::ZERO` before bootstrap.
    pub fn local_id(&self) -> AccountId {
        self.local_user.read().unwrap().id
    }

    /// The local user's display name, empty until informed.
    pub fn persona_name(&self) -> String {
        self.local_user
            .read()
            .unwrap()
            .name
            .clone()
            .unwrap_or_default()
    }

    /// The local user's presence state.
    pub fn persona_state(&self) -> PersonaState {
        self.local_user.read().unwrap().state
    }

    /// Number of friends known to the cache. Clans are not counted.
    pub fn friend_count(&self) -> usize {
        self.cache.friend_count()
    }

    /// The friend id at `index` in insertion order, if in range.
    pub fn friend_by_index(&self, index: usize) -> Option<AccountId> {
        self.cache.friend_by_index(index).map(|f| f.id)
    }

    /// Display name for any identity, empty if unknown or uninformed.
    pub fn friend_persona_name(&self, id: AccountId) -> String {
        if self.is_local_id(id) {
            return self.persona_name();
        }
        self.cache
            .get(id)
            .and_then(|entry| entry.name().map(str::to_owned))
            .unwrap_or_default()
    }

    /// Presence state for any identity, `Offline` if unknown.
    pub fn friend_persona_state(&self, id: AccountId) -> PersonaState {
        if self.is_local_id(id) {
            return self.persona_state();
        }
        match self.cache.get(id) {
            Some(RosterEntry::Friend(f)) => f.state,
            _ => PersonaState::Offline,
        }
    }

    /// Relationship toward any identity, `None` if unknown.
    pub fn friend_relationship(&self, id: AccountId) -> FriendRelationship {
        if self.is_local_id(id) {
            return self.local_user.read().unwrap().relationship;
        }
        self.cache
            .get(id)
            .map(|entry| entry.relationship())
            .unwrap_or_default()
    }

    /// Current game activity for any identity, absent if unknown or idle.
    pub fn friend_game_played(&self, id: AccountId) -> Option<GamePlayed> {
        if self.is_local_id(id) {
            return self.local_user.read().unwrap().game.clone();
        }
        match self.cache.get(id) {
            Some(RosterEntry::Friend(f)) => f.game,
            _ => None,
        }
    }

    fn is_local_id(&self, id: AccountId) -> bool {
        id.is_valid() && id == self.local_user.read().unwrap().id
    }
}

/// Apply the flag-gated field categories of one delta entry.
///
/// Unflagged categories leave their fields exactly as they were. The
/// game-activity triple moves as one unit; a stale game name can never
/// pair with a fresh id.
fn apply_delta(persona: &mut FriendPersona, flags: StatusFlags, entry: &PersonaStateEntry) {
    if flags.contains(StatusFlags::PLAYER_NAME) {
        persona.name = Some(entry.persona_name.clone().unwrap_or_default());
    }

    if flags.contains(StatusFlags::PRESENCE) {
        persona.state = entry.persona_state.unwrap_or_default();
    }

    if flags.contains(StatusFlags::GAME_EXTRA_INFO) {
        let game = GamePlayed {
            game_id: entry.game_id.unwrap_or(0),
            app_id: entry.app_id.unwrap_or(0),
            name: entry.game_name.clone().unwrap_or_default(),
        };
        persona.game = if game.is_empty() { None } else { Some(game) };
    }
}
