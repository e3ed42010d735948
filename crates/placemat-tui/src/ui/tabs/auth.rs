//! Auth tab rendering - login form and session summary.
//!
//! Login is local to the device: the form writes the pair to the OS
//! keychain and remembers the username in config. No token is involved.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, LoginFocus};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_user {
        Some(ref user) => render_session(frame, app, user, area),
        None => render_login_form(frame, app, area),
    }
}

fn render_session(frame: &mut Frame, app: &App, user: &str, area: Rect) {
    let theme = app.theme;

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Selamat datang, {}!", user),
            styles::success_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Your credentials are stored in the OS keychain.",
            styles::muted_style(theme),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [x] ", styles::help_key_style(theme)),
            Span::styled("Logout", styles::help_desc_style(theme)),
        ]),
    ];

    let block = Block::default()
        .title(" User Dashboard ")
        .title_style(styles::muted_style(theme))
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme, true));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_login_form(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let mut lines = vec![Line::from("")];

    // Username field
    let username_focused = app.login_focus == LoginFocus::Username;
    let username_style = if username_focused {
        styles::selected_style(theme)
    } else {
        styles::list_item_style(theme)
    };
    let username_display = format!("{:<16}", app.login_username);
    let cursor = if username_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("Username: [", styles::muted_style(theme)),
        Span::styled(format!("{}{}", username_display, cursor), username_style),
        Span::styled("]", styles::muted_style(theme)),
    ]));

    // Password field
    let password_focused = app.login_focus == LoginFocus::Password;
    let password_style = if password_focused {
        styles::selected_style(theme)
    } else {
        styles::list_item_style(theme)
    };
    let password_masked: String = "*".repeat(app.login_password.len().min(16));
    let password_display = format!("{:<16}", password_masked);
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("Password: [", styles::muted_style(theme)),
        Span::styled(format!("{}{}", password_display, cursor), password_style),
        Span::styled("]", styles::muted_style(theme)),
    ]));

    // Login button
    let button_focused = app.login_focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::selected_style(theme)
    } else {
        styles::list_item_style(theme)
    };
    lines.push(Line::from(""));
    if button_focused {
        lines.push(Line::from(vec![
            Span::raw("        ["),
            Span::styled(" ▶ Login ◀ ", button_style),
            Span::raw("]"),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("        ["),
            Span::styled("   Login   ", button_style),
            Span::raw("]"),
        ]));
    }

    // Error message
    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            styles::error_style(theme),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Tab/↑/↓ ", styles::help_key_style(theme)),
        Span::styled("move   ", styles::help_desc_style(theme)),
        Span::styled("Enter ", styles::help_key_style(theme)),
        Span::styled("next field / submit", styles::help_desc_style(theme)),
    ]));

    let block = Block::default()
        .title(" Login ")
        .title_style(styles::muted_style(theme))
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme, true));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
