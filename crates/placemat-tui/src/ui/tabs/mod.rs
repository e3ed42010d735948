//! Tab-specific content rendering.

pub mod auth;
pub mod home;
pub mod posts;
