use thiserror::Error;

use crate::api::ApiError;

use super::QueryKey;

/// What a completed removal did to the cached collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The record was present; the cached collection no longer contains it.
    Removed,
    /// The identifier matched nothing; the cached collection is unchanged.
    NotPresent,
}

/// Failures reported by [`QueryCache::remove`](super::QueryCache::remove).
#[derive(Error, Debug)]
pub enum MutationError {
    /// At most one removal per record may be in flight. Later calls for the
    /// same identifier are rejected, not queued.
    #[error("Removal already in flight for record {0}")]
    DuplicateMutation(i64),

    /// The collection has no Ready data to remove from.
    #[error("Collection '{0}' has no loaded data to mutate")]
    CollectionNotReady(QueryKey),

    /// The backend step failed; the cached collection was left untouched.
    #[error("Backend removal failed: {0}")]
    Backend(#[from] ApiError),
}
