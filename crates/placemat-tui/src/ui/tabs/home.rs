//! Home tab rendering - a small bundled directory of people.
//!
//! Static demo content, never fetched. `n` cycles through the entries.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

/// A directory entry shown on the Home tab.
pub struct Person {
    pub name: &'static str,
    pub occupation: &'static str,
    pub age: u8,
}

/// The bundled directory.
pub const TEAM: &[Person] = &[
    Person { name: "John Doe", occupation: "Software Developer", age: 28 },
    Person { name: "Jane Smith", occupation: "UI/UX Designer", age: 32 },
    Person { name: "Bob Johnson", occupation: "Project Manager", age: 45 },
    Person { name: "Alice Brown", occupation: "Data Scientist", age: 30 },
];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let index = app.person_index % TEAM.len();
    let person = &TEAM[index];

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Person Information",
            styles::title_style(theme),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Name:        ", styles::muted_style(theme)),
            Span::styled(person.name, styles::list_item_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  Occupation:  ", styles::muted_style(theme)),
            Span::styled(person.occupation, styles::list_item_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  Age:         ", styles::muted_style(theme)),
            Span::styled(format!("{}", person.age), styles::list_item_style(theme)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Person {} of {}", index + 1, TEAM.len()),
            styles::muted_style(theme),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [n] ", styles::help_key_style(theme)),
            Span::styled("Show Next Person", styles::help_desc_style(theme)),
        ]),
    ];

    let block = Block::default()
        .title(" Home ")
        .title_style(styles::muted_style(theme))
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme, true));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
