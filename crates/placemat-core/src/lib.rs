//! Core library for placemat.
//!
//! Everything the TUI needs that is not rendering lives here:
//!
//! - [`api`]: HTTP client and error taxonomy for the posts endpoint
//! - [`models`]: wire records and their cached projection
//! - [`query`]: the query-keyed collection cache and removal mutations
//! - [`auth`]: keychain-backed credential storage
//! - [`config`]: persisted application configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod query;
