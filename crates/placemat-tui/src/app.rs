//! Application state management for Placemat.
//!
//! This module contains the core `App` struct that manages all application
//! state, including UI state, the query cache handle, the login form, and
//! background task coordination.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use placemat_core::api::ApiClient;
use placemat_core::auth::CredentialStore;
use placemat_core::config::{Config, DeleteMode, Theme};
use placemat_core::query::{CollectionView, MutationError, MutationOutcome, QueryCache, QueryKey};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// A handful of fetches and removals can be in flight at once; 32 leaves
/// plenty of headroom.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for username input.
/// Usernames are typically email addresses, 50 chars covers most.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Number of items to scroll on page up/down.
/// 10 rows matches the capped post list, so one page is the whole table.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Auth,
    Posts,
}

impl Tab {
    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Auth => "Auth",
            Tab::Posts => "Posts",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Home => Tab::Auth,
            Tab::Auth => Tab::Posts,
            Tab::Posts => Tab::Home,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Home => Tab::Posts,
            Tab::Auth => Tab::Home,
            Tab::Posts => Tab::Auth,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Result types from background tasks.
///
/// These variants are sent through an MPSC channel from spawned fetch and
/// removal tasks back to the main application. Collection data itself always
/// flows through the shared query cache; these messages only carry what the
/// status line needs.
enum TaskResult {
    /// The posts query settled after a fetch or refetch
    PostsSettled(CollectionView),
    /// A removal finished (record id, outcome or rejection)
    RemovalFinished(i64, Result<MutationOutcome, MutationError>),
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub api: ApiClient,
    pub queries: QueryCache,
    pub posts_key: QueryKey,

    // UI State
    pub state: AppState,
    pub current_tab: Tab,
    pub theme: Theme,

    // Login form state
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Signed-in user, None when logged out
    pub current_user: Option<String>,

    // Home tab state
    pub person_index: usize,

    // Posts tab state
    pub posts_selection: usize,
    posts_requested: bool,

    // Background task channel
    task_rx: Option<mpsc::Receiver<TaskResult>>,
    task_tx: mpsc::Sender<TaskResult>,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance
    pub async fn new() -> Result<Self> {
        debug!("App::new() starting");
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        debug!(delete_mode = ?config.delete_mode, "Config loaded");

        let api = ApiClient::new(&config.base_url)?;
        let queries = QueryCache::new();
        let posts_key = QueryKey::new("posts");

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        // Prefill the login form from env vars or config
        let login_username = std::env::var("PLACEMAT_USERNAME")
            .ok()
            .or_else(|| config.last_username.clone())
            .unwrap_or_default();
        let login_focus = if login_username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };

        // Restore the session when the keychain still holds an entry for
        // the remembered user
        let current_user = config
            .last_username
            .clone()
            .filter(|username| CredentialStore::has_credentials(username));
        if let Some(ref username) = current_user {
            info!(username = %username, "Restored session");
        }

        let theme = config.theme;

        Ok(Self {
            config,
            api,
            queries,
            posts_key,

            state: AppState::Normal,
            current_tab: Tab::Home,
            theme,

            login_username,
            login_password: String::new(),
            login_focus,
            login_error: None,
            current_user,

            person_index: 0,

            posts_selection: 0,
            posts_requested: false,

            task_rx: Some(rx),
            task_tx: tx,

            status_message: None,
        })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Switch tabs, kicking off the posts query on the first visit to Posts.
    pub fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        if tab == Tab::Posts {
            self.ensure_posts_query();
        }
    }

    /// Number of records currently renderable on the Posts tab.
    pub fn posts_len(&self) -> usize {
        match self.queries.snapshot(&self.posts_key) {
            Some(CollectionView::Ready(records)) => records.len(),
            _ => 0,
        }
    }

    fn clamp_posts_selection(&mut self) {
        let len = self.posts_len();
        self.posts_selection = self.posts_selection.min(len.saturating_sub(1));
    }

    // =========================================================================
    // Posts query
    // =========================================================================

    /// Start the posts query the first time the Posts tab is visited.
    ///
    /// Later visits read straight from the cache; only an explicit update
    /// fetches again.
    pub fn ensure_posts_query(&mut self) {
        if self.posts_requested {
            return;
        }
        self.posts_requested = true;

        let queries = self.queries.clone();
        let key = self.posts_key.clone();
        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let view = queries
                .get_collection(&key, move || {
                    let api = api.clone();
                    async move { api.fetch_posts().await }
                })
                .await;
            Self::send_result(&tx, TaskResult::PostsSettled(view)).await;
        });
        self.status_message = Some("Fetching posts...".to_string());
    }

    /// Re-fetch everything the cache knows about.
    ///
    /// The only path that fetches again after the first load, and therefore
    /// also the recovery path from a fetch error.
    pub fn refresh_posts(&mut self) {
        if !self.posts_requested {
            self.ensure_posts_query();
            return;
        }

        let queries = self.queries.clone();
        let key = self.posts_key.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            queries.refetch_all().await;
            if let Some(view) = queries.snapshot(&key) {
                Self::send_result(&tx, TaskResult::PostsSettled(view)).await;
            }
        });
        self.status_message = Some("Refreshing posts...".to_string());
    }

    /// Remove the selected post, honoring the configured delete mode.
    ///
    /// No-op while the row already has a removal in flight; that row's
    /// delete affordance is disabled, other rows stay live.
    pub fn remove_selected_post(&mut self) {
        let records = match self.queries.snapshot(&self.posts_key) {
            Some(CollectionView::Ready(records)) => records,
            _ => return,
        };
        let id = match records.get(self.posts_selection) {
            Some(record) => record.id,
            None => return,
        };
        if self.queries.pending_removals(&self.posts_key).contains(&id) {
            return;
        }

        let queries = self.queries.clone();
        let key = self.posts_key.clone();
        let api = self.api.clone();
        let tx = self.task_tx.clone();
        let mode = self.config.delete_mode;
        tokio::spawn(async move {
            let result = match mode {
                DeleteMode::Local => queries.remove_local(&key, id).await,
                DeleteMode::Remote => {
                    queries
                        .remove(&key, id, || async move { api.delete_post(id).await })
                        .await
                }
            };
            Self::send_result(&tx, TaskResult::RemovalFinished(id, result)).await;
        });
    }

    // =========================================================================
    // Login / logout
    // =========================================================================

    /// Attempt to log in with the form contents.
    ///
    /// Login is local to the device: success means the pair was written to
    /// the OS keychain and the username remembered in config.
    pub fn attempt_login(&mut self) {
        let username = self.login_username.trim().to_string();
        let password = self.login_password.clone();

        if let Some(problem) = login_form_error(&username, &password) {
            self.login_error = Some(problem.to_string());
            return;
        }
        self.login_error = None;

        match CredentialStore::store(&username, &password) {
            Ok(()) => {
                self.config.last_username = Some(username.clone());
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                self.login_password.clear();
                self.status_message = Some(format!("Selamat datang, {}!", username));
                info!(username = %username, "Login successful");
                self.current_user = Some(username);
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                self.login_error = Some("Failed to log in. Please try again.".to_string());
            }
        }
    }

    /// Log out, deleting the stored keychain entry.
    pub fn log_out(&mut self) {
        let username = match self.current_user.clone() {
            Some(username) => username,
            None => return,
        };

        match CredentialStore::delete(&username) {
            Ok(()) => {
                self.current_user = None;
                self.config.last_username = None;
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                // Prefill the form for the next login
                self.login_username = username;
                self.login_password.clear();
                self.login_focus = LoginFocus::Password;
                self.login_error = None;
                self.status_message = Some("Logged out".to_string());
                info!("Logged out");
            }
            Err(e) => {
                error!(error = %e, "Logout failed");
                self.status_message = Some("Failed to log out. Please try again.".to_string());
            }
        }
    }

    // =========================================================================
    // Theme
    // =========================================================================

    /// Flip between the dark and light palettes and persist the choice.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.config.theme = self.theme;
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }
    }

    // =========================================================================
    // Background task handling
    // =========================================================================

    /// Send a result through the channel, logging failures.
    async fn send_result(tx: &mpsc::Sender<TaskResult>, result: TaskResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send task result - channel closed");
        }
    }

    /// Poll for completed background work. Called from the event loop.
    pub async fn check_background_tasks(&mut self) {
        // Collect all pending results first to avoid borrow conflicts
        let results: Vec<TaskResult> = {
            if let Some(ref mut rx) = self.task_rx {
                let mut results = Vec::new();
                while let Ok(result) = rx.try_recv() {
                    results.push(result);
                }
                results
            } else {
                Vec::new()
            }
        };

        for result in results {
            self.process_task_result(result);
        }
    }

    /// Process a single background task result.
    fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::PostsSettled(CollectionView::Ready(records)) => {
                self.clamp_posts_selection();
                self.status_message = Some(format!("Loaded {} posts", records.len()));
            }
            TaskResult::PostsSettled(CollectionView::Error(err)) => {
                self.status_message = Some(format!("Update failed: {}", err));
            }
            TaskResult::PostsSettled(CollectionView::Loading) => {
                // Two refreshes raced; the later settlement will report.
            }
            TaskResult::RemovalFinished(id, Ok(MutationOutcome::Removed)) => {
                self.clamp_posts_selection();
                self.status_message = Some(format!("Deleted post {}", id));
            }
            TaskResult::RemovalFinished(id, Ok(MutationOutcome::NotPresent)) => {
                self.status_message = Some(format!("Post {} was already gone", id));
            }
            TaskResult::RemovalFinished(id, Err(MutationError::DuplicateMutation(_))) => {
                // Surfaced only through the disabled row, never as a message.
                debug!(id, "Duplicate removal ignored");
            }
            TaskResult::RemovalFinished(id, Err(err)) => {
                warn!(id, error = %err, "Removal failed");
                self.status_message = Some(format!("Delete failed: {}", err));
            }
        }
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

/// Check login form contents before touching the keychain
pub fn login_form_error(username: &str, password: &str) -> Option<&'static str> {
    if username.trim().is_empty() || password.trim().is_empty() {
        Some("Username and password are required")
    } else {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Tab Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_tab_next() {
        assert_eq!(Tab::Home.next(), Tab::Auth);
        assert_eq!(Tab::Auth.next(), Tab::Posts);
        assert_eq!(Tab::Posts.next(), Tab::Home); // Wraps around
    }

    #[test]
    fn test_tab_prev() {
        assert_eq!(Tab::Home.prev(), Tab::Posts); // Wraps around
        assert_eq!(Tab::Posts.prev(), Tab::Auth);
        assert_eq!(Tab::Auth.prev(), Tab::Home);
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_username_char() {
        // Valid chars within length
        assert!(can_add_username_char(0, 'a'));
        assert!(can_add_username_char(49, 'z'));
        // Exceeds max length
        assert!(!can_add_username_char(50, 'a'));
        assert!(!can_add_username_char(100, 'a'));
        // Control characters rejected
        assert!(!can_add_username_char(0, '\x00'));
        assert!(!can_add_username_char(0, '\n'));
        assert!(!can_add_username_char(0, '\t'));
    }

    #[test]
    fn test_can_add_password_char() {
        // Valid chars within length
        assert!(can_add_password_char(0, 'a'));
        assert!(can_add_password_char(127, '!'));
        // Exceeds max length
        assert!(!can_add_password_char(128, 'a'));
        assert!(!can_add_password_char(200, 'a'));
        // Control characters rejected
        assert!(!can_add_password_char(0, '\x00'));
        assert!(!can_add_password_char(0, '\r'));
    }

    // -------------------------------------------------------------------------
    // Login Form Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_login_form_error_requires_both_fields() {
        assert!(login_form_error("", "secret").is_some());
        assert!(login_form_error("user", "").is_some());
        assert!(login_form_error("", "").is_some());
        // Whitespace-only input does not count
        assert!(login_form_error("   ", "secret").is_some());
        assert!(login_form_error("user", "  ").is_some());
    }

    #[test]
    fn test_login_form_error_accepts_filled_form() {
        assert!(login_form_error("user", "secret").is_none());
    }
}
