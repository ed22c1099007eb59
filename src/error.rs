//! Error types for the voxel world.
//!
//! Two kinds of failure exist. Environment failures (the chunk store rejecting a
//! read or write, a bad configuration file) are ordinary [`WorldError`] values
//! and propagate to the caller. Programmer errors (out-of-range local
//! coordinates, writing into a chunk that is not loaded) go through
//! [`programmer_error!`]: they panic in debug builds and are logged and
//! skipped in release builds.

use cgmath::Point2;

/// Result type used by world-level operations.
pub type WorldResult<T> = Result<T, WorldError>;

/// Failures reported by a chunk store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing filesystem failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record decoded but does not describe a valid chunk.
    #[error("Corrupt record for chunk ({}, {}): {reason}", .position.x, .position.y)]
    CorruptRecord {
        /// Chunk the record was requested for.
        position: Point2<i32>,
        /// What was wrong with it.
        reason: String,
    },

    /// The store refused the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Failures of world-level operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A chunk store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A config value is out of range or unparsable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Reports a violated caller contract.
///
/// Panics when debug assertions are enabled; otherwise logs the message at
/// error level and lets the caller fall through to its no-op path.
macro_rules! programmer_error {
    ($($arg:tt)+) => {
        if cfg!(debug_assertions) {
            panic!($($arg)+);
        } else {
            log::error!($($arg)+);
        }
    };
}

pub(crate) use programmer_error;
