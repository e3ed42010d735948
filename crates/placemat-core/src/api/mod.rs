//! HTTP client module for the posts API.
//!
//! This module provides the `ApiClient` for fetching the post collection
//! and issuing deletes, plus the `ApiError` taxonomy the cache and UI
//! surface to users.
//!
//! The API is an unauthenticated JSON endpoint; no tokens, no sessions.

pub mod client;
pub mod error;

pub use client::{ApiClient, DEFAULT_BASE_URL, MAX_POSTS};
pub use error::ApiError;
