use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use placemat_core::config::{DeleteMode, Theme};

use crate::app::{App, AppState, Tab};

use super::styles;
use super::tabs::{auth, home, posts};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame, app);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let title = "  Placemat";
    let theme_icon = match theme {
        Theme::Dark => "☾",
        Theme::Light => "☀",
    };
    let right = format!("[t] {} {} | [?] Help", theme_icon, theme.label());

    // Glyph counts, not byte lengths; the theme icon is multibyte
    let padding = (area.width as usize)
        .saturating_sub(title.chars().count())
        .saturating_sub(right.chars().count())
        .saturating_sub(2);

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style(theme)),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, styles::muted_style(theme)),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style(theme));

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let tabs = [Tab::Home, Tab::Auth, Tab::Posts];

    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style(theme)));
        }
        let label = format!("[{}] {}", i + 1, tab.title());
        if *tab == app.current_tab {
            spans.push(Span::styled(label, styles::tab_style(theme, true)));
        } else {
            spans.push(Span::styled(label, styles::muted_style(theme)));
        }
    }

    let line = Line::from(spans);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style(theme));

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Home => home::render(frame, app, area),
        Tab::Auth => auth::render(frame, app, area),
        Tab::Posts => posts::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let shortcuts = "[t]heme | [u]pdate | [q]uit";

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        let age = app
            .queries
            .age_display(&app.posts_key)
            .unwrap_or_else(|| "never".to_string());
        format!(" Posts updated {} ", age)
    };

    let right_text = format!(" {} ", shortcuts);

    // Center text for the Posts tab - say where deletes go
    let center_text = if app.current_tab == Tab::Posts {
        match app.config.delete_mode {
            DeleteMode::Local => "deletes: local only".to_string(),
            DeleteMode::Remote => "deletes: sent to server".to_string(),
        }
    } else {
        String::new()
    };

    let width = area.width as usize;

    if center_text.is_empty() {
        // No center text - just left and right
        let padding_len = width
            .saturating_sub(left_text.len())
            .saturating_sub(right_text.len());
        let status_line = Line::from(vec![
            Span::styled(left_text, styles::muted_style(theme)),
            Span::raw(" ".repeat(padding_len)),
            Span::styled(right_text, styles::muted_style(theme)),
        ]);
        let paragraph = Paragraph::new(status_line).style(styles::status_bar_style(theme));
        frame.render_widget(paragraph, area);
    } else {
        // With center text - center it absolutely, regardless of left/right content
        let center_start = (width.saturating_sub(center_text.len())) / 2;
        let left_pad = center_start.saturating_sub(left_text.len());
        let right_start = center_start + center_text.len();
        let right_pad = width
            .saturating_sub(right_start)
            .saturating_sub(right_text.len());

        let status_line = Line::from(vec![
            Span::styled(left_text, styles::muted_style(theme)),
            Span::raw(" ".repeat(left_pad)),
            Span::styled(center_text, styles::muted_style(theme)),
            Span::raw(" ".repeat(right_pad)),
            Span::styled(right_text, styles::muted_style(theme)),
        ]);
        let paragraph = Paragraph::new(status_line).style(styles::status_bar_style(theme));
        frame.render_widget(paragraph, area);
    }
}

fn render_help_overlay(frame: &mut Frame, app: &App) {
    let theme = app.theme;

    // Fixed size dialog matching the quit overlay
    let area = centered_rect_fixed(52, 21, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        // ASCII Art Logo (centered for 52-width box, 50 interior)
        Line::from(Span::styled(
            "             ╔═╗╦  ╔═╗╔═╗╔═╗╔╦╗╔═╗╔╦╗",
            styles::title_style(theme),
        )),
        Line::from(Span::styled(
            "             ╠═╝║  ╠═╣║  ╠═ ║║║╠═╣ ║ ",
            styles::title_style(theme),
        )),
        Line::from(Span::styled(
            "             ╩  ╩═╝╩ ╩╚═╝╚═╝╩ ╩╩ ╩ ╩ ",
            styles::title_style(theme),
        )),
        Line::from(Span::styled(
            format!("                  version {}", version),
            styles::muted_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style(theme))),
        Line::from(vec![
            Span::styled("  1-3       ", styles::help_key_style(theme)),
            Span::styled("Switch tabs", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  ←/→       ", styles::help_key_style(theme)),
            Span::styled("Prev/next tab", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  ↑/↓ j/k   ", styles::help_key_style(theme)),
            Span::styled("Navigate the post list", styles::help_desc_style(theme)),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style(theme))),
        Line::from(vec![
            Span::styled("  t         ", styles::help_key_style(theme)),
            Span::styled("Toggle dark/light theme", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  u         ", styles::help_key_style(theme)),
            Span::styled("Update posts from the server", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  d/Del     ", styles::help_key_style(theme)),
            Span::styled("Delete the selected post", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  n         ", styles::help_key_style(theme)),
            Span::styled("Next person (Home tab)", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  x         ", styles::help_key_style(theme)),
            Span::styled("Log out (Auth tab)", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  q         ", styles::help_key_style(theme)),
            Span::styled("Quit", styles::help_desc_style(theme)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style(theme)),
            Span::styled("?", styles::help_key_style(theme)),
            Span::styled(" or ", styles::muted_style(theme)),
            Span::styled("Esc", styles::help_key_style(theme)),
            Span::styled(" to close", styles::muted_style(theme)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme, true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame, app: &App) {
    let theme = app.theme;

    // Fixed size dialog
    let area = centered_rect_fixed(46, 10, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "          ╔═╗╦  ╔═╗╔═╗╔═╗╔╦╗╔═╗╔╦╗",
            styles::title_style(theme),
        )),
        Line::from(Span::styled(
            "          ╠═╝║  ╠═╣║  ╠═ ║║║╠═╣ ║ ",
            styles::title_style(theme),
        )),
        Line::from(Span::styled(
            "          ╩  ╩═╝╩ ╩╚═╝╚═╝╩ ╩╩ ╩ ╩ ",
            styles::title_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(theme),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style(theme)),
            Span::styled("[Y]", styles::help_key_style(theme)),
            Span::styled(" to quit, ", styles::muted_style(theme)),
            Span::styled("[N]", styles::help_key_style(theme)),
            Span::styled(" to cancel", styles::muted_style(theme)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme, true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}
