//! Error types for core conversions.

use thiserror::Error;

/// Errors produced when mapping raw wire codes onto core enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A persona state code outside the known set.
    #[error("unknown persona state code: {0}")]
    UnknownPersonaState(u8),

    /// A relationship code outside the known set.
    #[error("unknown relationship code: {0}")]
    UnknownRelationship(u8),

    /// A chat entry type code outside the known set.
    #[error("unknown chat entry type code: {0}")]
    UnknownChatEntryType(u8),
}
