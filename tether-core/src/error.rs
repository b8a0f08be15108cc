//! Crate Error Types
//!
//! Every failure the mutation pipeline or remote synchronization can surface
//! to a caller. Failures that are recovered locally (a corrupt snapshot, a
//! missing endpoint, an unresolvable binding target) never appear here; they
//! are logged and absorbed where they occur.

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by field writes and remote synchronization.
#[derive(Error, Debug)]
pub enum TetherError {
    /// The storage backend rejected a snapshot write.
    #[error("snapshot write failed: {0}")]
    Store(#[from] StoreError),

    /// A snapshot could not be serialized.
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// A remote request failed in transport or while decoding.
    #[error("remote request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A remote endpoint answered with a non-success status.
    #[error("remote endpoint returned status {status}")]
    EndpointStatus { status: u16 },
}

pub type Result<T> = std::result::Result<T, TetherError>;
