//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{
    can_add_password_char, can_add_username_char, App, AppState, LoginFocus, Tab, PAGE_SCROLL_SIZE,
};
use crate::ui::tabs::home;

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // The login form captures typing while it is on screen
    if app.current_tab == Tab::Auth && app.current_user.is_none() {
        return handle_login_input(app, key);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
        }
        KeyCode::Char('1') => {
            app.set_tab(Tab::Home);
        }
        KeyCode::Char('2') => {
            app.set_tab(Tab::Auth);
        }
        KeyCode::Char('3') => {
            app.set_tab(Tab::Posts);
        }
        KeyCode::Left => {
            app.set_tab(app.current_tab.prev());
        }
        KeyCode::Right => {
            app.set_tab(app.current_tab.next());
        }
        KeyCode::Char('u') => {
            app.refresh_posts();
        }
        KeyCode::Esc => {
            app.status_message = None;
        }
        _ => {
            // Tab-specific input
            match app.current_tab {
                Tab::Home => handle_home_input(app, key),
                Tab::Auth => handle_auth_input(app, key),
                Tab::Posts => handle_posts_input(app, key),
            }
        }
    }

    Ok(false)
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Arrows still switch tabs; everything printable goes to the form
        KeyCode::Left => {
            app.set_tab(app.current_tab.prev());
        }
        KeyCode::Right => {
            app.set_tab(app.current_tab.next());
        }
        KeyCode::Esc => {
            app.login_error = None;
        }
        KeyCode::Down | KeyCode::Tab => {
            // Move to next field
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            // Move to previous field
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Username,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => {
            match app.login_focus {
                LoginFocus::Username => {
                    // Move to password
                    app.login_focus = LoginFocus::Password;
                }
                LoginFocus::Password => {
                    // Move to button
                    app.login_focus = LoginFocus::Button;
                }
                LoginFocus::Button => {
                    app.attempt_login();
                }
            }
        }
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.login_username.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.login_username.len(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.len(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {
                // Ignore character input on button
            }
        },
        _ => {}
    }
    Ok(false)
}

fn handle_home_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') | KeyCode::Enter => {
            app.person_index = (app.person_index + 1) % home::TEAM.len();
        }
        _ => {}
    }
}

fn handle_auth_input(app: &mut App, key: KeyEvent) {
    // Only reached while logged in; the form intercepts keys otherwise
    match key.code {
        KeyCode::Char('x') => {
            app.log_out();
        }
        _ => {}
    }
}

fn handle_posts_input(app: &mut App, key: KeyEvent) {
    let max_index = app.posts_len().saturating_sub(1);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.posts_selection = (app.posts_selection + 1).min(max_index);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.posts_selection = app.posts_selection.saturating_sub(1);
        }
        KeyCode::Home => {
            app.posts_selection = 0;
        }
        KeyCode::End => {
            app.posts_selection = max_index;
        }
        KeyCode::PageDown => {
            app.posts_selection = (app.posts_selection + PAGE_SCROLL_SIZE).min(max_index);
        }
        KeyCode::PageUp => {
            app.posts_selection = app.posts_selection.saturating_sub(PAGE_SCROLL_SIZE);
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            app.remove_selected_post();
        }
        _ => {}
    }
}
