//! Posts tab rendering - the cached post list.
//!
//! Everything drawn here is a snapshot read; rendering never triggers a
//! fetch. Rows with a removal in flight are struck through and their
//! delete key stays inert until the removal settles.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use placemat_core::api::ApiError;
use placemat_core::models::PostSummary;
use placemat_core::query::CollectionView;

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match app.queries.snapshot(&app.posts_key) {
        Some(CollectionView::Ready(records)) => render_table(frame, app, &records, area),
        Some(CollectionView::Error(err)) => render_error(frame, app, &err, area),
        Some(CollectionView::Loading) | None => render_loading(frame, app, area),
    }
}

fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Loading data...",
            styles::muted_style(theme),
        )),
    ];

    let block = Block::default()
        .title(" Posts ")
        .title_style(styles::muted_style(theme))
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme, true));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_error(frame: &mut Frame, app: &App, err: &ApiError, area: Rect) {
    let theme = app.theme;

    // The error stays on screen until an explicit update; nothing retries
    // on its own.
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Could not load posts",
            styles::error_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", err),
            styles::muted_style(theme),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [u] ", styles::help_key_style(theme)),
            Span::styled("Try again", styles::help_desc_style(theme)),
        ]),
    ];

    let block = Block::default()
        .title(" Posts ")
        .title_style(styles::muted_style(theme))
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme, true));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame, app: &App, records: &[PostSummary], area: Rect) {
    let theme = app.theme;
    let pending = app.queries.pending_removals(&app.posts_key);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Projection note
        ])
        .split(area);

    let header_cells = [
        Cell::from("ID"),
        Cell::from("User ID"),
        Cell::from("Title"),
        Cell::from(""),
    ];

    let header = Row::new(header_cells)
        .style(styles::title_style(theme))
        .height(1);

    // Build rows
    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let removing = pending.contains(&record.id);
            let style = if removing {
                styles::pending_style(theme)
            } else if i == app.posts_selection {
                styles::selected_style(theme)
            } else {
                styles::list_item_style(theme)
            };
            let marker = if removing { "Deleting..." } else { "" };

            Row::new(vec![
                Cell::from(format!("{:>3}", record.id)),
                Cell::from(format!("{:>4}", record.user_id)),
                Cell::from(record.title.clone()),
                Cell::from(marker),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // ID
        Constraint::Length(8),  // User ID
        Constraint::Fill(1),    // Title
        Constraint::Length(12), // Removal marker
    ];

    let title = format!(" Posts ({}) - [d]elete [u]pdate ", records.len());

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style(theme))
                .borders(Borders::ALL)
                .border_style(styles::border_style(theme, true)),
        )
        .row_highlight_style(styles::selected_style(theme));

    let mut state = TableState::default();
    state.select(Some(app.posts_selection));

    frame.render_stateful_widget(table, chunks[0], &mut state);

    let note = Paragraph::new(Line::from(Span::styled(
        " Note: The 'body' field has been removed from each post object",
        styles::note_style(theme),
    )));
    frame.render_widget(note, chunks[1]);
}
