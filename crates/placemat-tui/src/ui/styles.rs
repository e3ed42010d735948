// Allow dead code: Style functions defined for consistent UI
#![allow(dead_code)]

use placemat_core::config::Theme;
use ratatui::style::{Color, Modifier, Style};

/// The colors one theme draws from.
struct Palette {
    primary: Color,
    secondary: Color,
    accent: Color,
    error: Color,
    muted: Color,
    highlight: Color,
    text: Color,
    status_bg: Color,
}

const DARK: Palette = Palette {
    primary: Color::Rgb(64, 128, 192),
    secondary: Color::Rgb(96, 160, 96),
    accent: Color::Rgb(192, 160, 64),
    error: Color::Rgb(192, 64, 64),
    muted: Color::Rgb(128, 128, 128),
    highlight: Color::Rgb(48, 48, 64),
    text: Color::White,
    status_bg: Color::Rgb(32, 32, 40),
};

const LIGHT: Palette = Palette {
    primary: Color::Rgb(0, 96, 168),
    secondary: Color::Rgb(24, 128, 24),
    accent: Color::Rgb(152, 104, 0),
    error: Color::Rgb(176, 24, 24),
    muted: Color::Rgb(96, 96, 96),
    highlight: Color::Rgb(200, 208, 224),
    text: Color::Black,
    status_bg: Color::Rgb(224, 224, 232),
};

fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}

// Styles

pub fn title_style(theme: Theme) -> Style {
    Style::default()
        .fg(palette(theme).primary)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_style(theme: Theme) -> Style {
    Style::default()
        .bg(palette(theme).highlight)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).text)
}

pub fn muted_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).muted)
}

pub fn highlight_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).accent)
}

pub fn success_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).secondary)
}

pub fn error_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).error)
}

/// Rows with a removal in flight read as disabled.
pub fn pending_style(theme: Theme) -> Style {
    Style::default()
        .fg(palette(theme).muted)
        .add_modifier(Modifier::CROSSED_OUT)
}

pub fn note_style(theme: Theme) -> Style {
    Style::default()
        .fg(palette(theme).muted)
        .add_modifier(Modifier::ITALIC)
}

pub fn tab_style(theme: Theme, selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(palette(theme).primary)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(palette(theme).text)
    }
}

pub fn border_style(theme: Theme, focused: bool) -> Style {
    if focused {
        Style::default().fg(palette(theme).primary)
    } else {
        Style::default().fg(palette(theme).muted)
    }
}

pub fn status_bar_style(theme: Theme) -> Style {
    Style::default()
        .bg(palette(theme).status_bg)
        .fg(palette(theme).text)
}

pub fn help_key_style(theme: Theme) -> Style {
    Style::default()
        .fg(palette(theme).accent)
        .add_modifier(Modifier::BOLD)
}

pub fn help_desc_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).text)
}
