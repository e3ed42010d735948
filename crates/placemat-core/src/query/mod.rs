//! Client-side collection caching and mutation.
//!
//! This module is the data backbone of the app:
//!
//! - `QueryCache`: per-key fetch-once cache with coalesced loading
//! - `CollectionView`: what consumers observe (Loading / Error / Ready)
//! - `MutationOutcome`, `MutationError`: removal results and rejections
//!
//! Reads never trigger a second fetch; recovery from a failed fetch is an
//! explicit, user-initiated refetch.

pub mod cache;
pub mod mutation;

pub use cache::{CollectionView, FetchResult, QueryCache, QueryKey};
pub use mutation::{MutationError, MutationOutcome};
