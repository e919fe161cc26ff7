//! # Roster Cache
//!
//! Thread-safe, memory-only ownership of the identity → entity mapping.
//!
//! The cache holds every roster entity except the local user, who lives
//! in a distinguished slot owned by the engine and must never appear in
//! the mapping (or in the positional friend view). There is no
//! persistence and no per-entry eviction: the owning session discards
//! the whole cache on teardown.

pub mod cache;

pub use cache::RosterCache;
