//! OS keychain storage for login credentials.
//!
//! Passwords never touch the config file; each username maps to one
//! keychain entry under the service name.

use anyhow::{Context, Result};
use keyring::Entry;
use tracing::debug;

const SERVICE_NAME: &str = "placemat";

pub struct CredentialStore;

impl CredentialStore {
    /// Store a credential pair, replacing any previous password for the
    /// username
    pub fn store(username: &str, password: &str) -> Result<()> {
        let entry =
            Entry::new(SERVICE_NAME, username).context("Failed to create keyring entry")?;
        entry
            .set_password(password)
            .context("Failed to store password in keychain")?;
        debug!(username = %username, "Stored credentials");
        Ok(())
    }

    /// Retrieve the stored password for a username
    pub fn get_password(username: &str) -> Result<String> {
        let entry =
            Entry::new(SERVICE_NAME, username).context("Failed to create keyring entry")?;
        entry
            .get_password()
            .context("Failed to retrieve password from keychain")
    }

    /// Delete the stored credential for a username
    pub fn delete(username: &str) -> Result<()> {
        let entry =
            Entry::new(SERVICE_NAME, username).context("Failed to create keyring entry")?;
        entry
            .delete_credential()
            .context("Failed to delete credential from keychain")?;
        debug!(username = %username, "Deleted credentials");
        Ok(())
    }

    /// Check whether a password exists for a username
    pub fn has_credentials(username: &str) -> bool {
        Entry::new(SERVICE_NAME, username)
            .and_then(|entry| entry.get_password())
            .is_ok()
    }
}
