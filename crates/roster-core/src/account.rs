//! Packed 64-bit account identifiers.
//!
//! An [`AccountId`] is an opaque, comparable reference to an account or
//! clan on the platform. The bit layout is fixed by the platform and is
//! consumed here only for classification; the id is otherwise treated as
//! a plain value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account type code for an individual user account.
const TYPE_INDIVIDUAL: u8 = 1;
/// Account type code for a clan (group) account.
const TYPE_CLAN: u8 = 7;
/// The public universe.
const UNIVERSE_PUBLIC: u8 = 1;
/// Desktop instance, used for individual accounts.
const INSTANCE_DESKTOP: u32 = 1;

/// A packed 64-bit account identifier.
///
/// Layout, low to high:
///
/// ```text
/// bits  0..32  account number
/// bits 32..52  instance
/// bits 52..56  account type
/// bits 56..64  universe
/// ```
///
/// Equality and hashing are by value. The zero value is reserved as a
/// "no identity" sentinel and classifies as neither individual nor clan;
/// it is also the `Default`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl AccountId {
    /// The reserved "no identity" value.
    pub const ZERO: Self = Self(0);

    /// Create from a raw 64-bit value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw 64-bit value.
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// Construct an individual account id in the public universe with the
    /// desktop instance. Primarily useful for tests and local tooling.
    pub const fn individual(account_number: u32) -> Self {
        Self(pack(
            account_number,
            INSTANCE_DESKTOP,
            TYPE_INDIVIDUAL,
            UNIVERSE_PUBLIC,
        ))
    }

    /// Construct a clan account id in the public universe.
    pub const fn clan(account_number: u32) -> Self {
        Self(pack(account_number, 0, TYPE_CLAN, UNIVERSE_PUBLIC))
    }

    /// The low 32 account-number bits.
    pub const fn account_number(&self) -> u32 {
        self.0 as u32
    }

    /// The 20 instance bits.
    pub const fn instance(&self) -> u32 {
        ((self.0 >> 32) & 0xF_FFFF) as u32
    }

    /// The 4 account-type bits.
    pub const fn account_type(&self) -> u8 {
        ((self.0 >> 52) & 0xF) as u8
    }

    /// The 8 universe bits.
    pub const fn universe(&self) -> u8 {
        (self.0 >> 56) as u8
    }

    /// Whether this id refers to an individual user account.
    pub const fn is_individual(&self) -> bool {
        self.account_type() == TYPE_INDIVIDUAL
    }

    /// Whether this id refers to a clan account.
    pub const fn is_clan(&self) -> bool {
        self.account_type() == TYPE_CLAN
    }

    /// Whether this id carries an identity at all (non-zero).
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

const fn pack(account_number: u32, instance: u32, account_type: u8, universe: u8) -> u64 {
    (account_number as u64)
        | ((instance as u64 & 0xF_FFFF) << 32)
        | ((account_type as u64 & 0xF) << 52)
        | ((universe as u64) << 56)
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AccountId(u{}:t{}:{})",
            self.universe(),
            self.account_type(),
            self.account_number()
        )
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AccountId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<AccountId> for u64 {
    fn from(id: AccountId) -> Self {
        id.0
    }
}
