//! In-memory cache of roster entities.
//!
//! One entry per distinct [`AccountId`]. Message processing happens on a
//! single logical owner thread, but read accessors may be called from
//! other threads (a UI, typically), so the mapping sits behind an
//! `RwLock`. Mutations run as closures under the write lock, which is
//! what keeps a multi-field patch invisible until it is whole.

use std::collections::HashMap;
use std::sync::RwLock;

use roster_core::{AccountId, ClanPersona, FriendPersona, RosterEntry};

/// Thread-safe mapping from identity to roster entity.
///
/// Friends additionally keep their first-insertion order, which backs
/// the positional `friend_by_index` view. Entries are never evicted;
/// the cache lives and dies with the owning session.
pub struct RosterCache {
    inner: RwLock<Inner>,
}

struct Inner {
    /// All entities, friends and clans alike.
    entries: HashMap<AccountId, RosterEntry>,

    /// Friend ids in first-insertion order. Clans never appear here.
    friend_order: Vec<AccountId>,
}

impl RosterCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                friend_order: Vec::new(),
            }),
        }
    }

    /// Insert or replace the friend at `persona.id`.
    ///
    /// Idempotent: re-inserting an id replaces the record in place and
    /// never duplicates it in the positional view.
    pub fn insert_friend(&self, persona: FriendPersona) {
        let mut inner = self.inner.write().unwrap();
        let id = persona.id;
        if inner.entries.insert(id, RosterEntry::Friend(persona)).is_none() {
            inner.friend_order.push(id);
        }
    }

    /// Insert or replace the clan at `clan.id`. Idempotent.
    pub fn insert_clan(&self, clan: ClanPersona) {
        let mut inner = self.inner.write().unwrap();
        inner.entries.insert(clan.id, RosterEntry::Clan(clan));
    }

    /// Look up an entity by id. No side effects; absence is not an error.
    pub fn get(&self, id: AccountId) -> Option<RosterEntry> {
        let inner = self.inner.read().unwrap();
        inner.entries.get(&id).cloned()
    }

    /// Number of friends. Clans are not counted.
    pub fn friend_count(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.friend_order.len()
    }

    /// Positional access into the insertion-ordered friend view.
    ///
    /// Out-of-range indexes return `None` rather than an error.
    pub fn friend_by_index(&self, index: usize) -> Option<FriendPersona> {
        let inner = self.inner.read().unwrap();
        let id = inner.friend_order.get(index)?;
        match inner.entries.get(id) {
            Some(RosterEntry::Friend(f)) => Some(f.clone()),
            _ => None,
        }
    }

    /// Mutate the friend at `id` under the write lock and return the
    /// merged record.
    ///
    /// Returns `None` without running the closure when `id` is absent or
    /// resolves to a clan. Readers can never observe the record mid-patch.
    pub fn patch_friend<F>(&self, id: AccountId, patch: F) -> Option<FriendPersona>
    where
        F: FnOnce(&mut FriendPersona),
    {
        let mut inner = self.inner.write().unwrap();
        match inner.entries.get_mut(&id) {
            Some(RosterEntry::Friend(f)) => {
                patch(f);
                Some(f.clone())
            }
            _ => None,
        }
    }

    /// Total number of entities, clans included.
    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.entries.len()
    }

    /// Whether the cache holds no entities at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RosterCache {
    fn default() -> Self {
        Self::new()
    }
}
