//! Credential handling for the login flow.
//!
//! This module provides:
//! - `CredentialStore`: Secure OS-level credential storage via keyring
//!
//! There is no session or token layer; login is local to the device and a
//! user stays signed in as long as the keychain still holds their entry.

pub mod credentials;

pub use credentials::CredentialStore;
