//! Error types for the sync engine.

use thiserror::Error;

/// Errors that can surface from the engine.
///
/// Protocol-normal conditions (unknown identity in a delta, out-of-range
/// index) are not errors; they are absent-value returns. Decode failures
/// on inbound frames are contained inside the engine and never reach the
/// public surface.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An inbound payload could not be decoded.
    #[error("malformed message payload: {0}")]
    Decode(String),

    /// The transport collaborator refused an outbound send.
    #[error("transport error: {0}")]
    Transport(String),

    /// The operation has no defined wire structure in this engine.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
