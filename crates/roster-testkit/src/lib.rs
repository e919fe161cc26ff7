//! # Roster Testkit
//!
//! Testing utilities for the roster client.
//!
//! ## Overview
//!
//! - **Fixtures**: recording transport/sink collaborators and a
//!   [`TestHarness`] that wires an engine to them
//! - **Generators**: proptest strategies for ids, states, flag subsets,
//!   and delta entries
//!
//! ## Usage
//!
//! ```rust
//! use roster_core::FriendRelationship;
//! use roster_testkit::fixtures::{friend_entry, TestHarness};
//!
//! let harness = TestHarness::new();
//! harness.bootstrap(vec![friend_entry(100, FriendRelationship::Friend)]);
//! assert_eq!(harness.engine.friend_count(), 1);
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{
    clan_entry, friend_entry, game_entry, name_state_entry, random_individual, EventLog,
    RecordingSink, RecordingTransport, SentLog, TestHarness,
};
