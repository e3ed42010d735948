//! Data models for the posts API.
//!
//! This module contains the data structures flowing through the fetch and
//! cache pipeline:
//!
//! - `Post`: wire-format record as served by the posts endpoint
//! - `PostSummary`: the cached projection of a post (no `body`)

pub mod post;

pub use post::{Post, PostSummary};
