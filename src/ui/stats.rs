use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::{app::App, ui::render_ui::status_color};

fn total_label(files: usize) -> String {
    let noun = if files == 1 { "file" } else { "files" };
    format!("Total: {files} {noun} changed")
}

/// Per-file line counts with a totals row, in place of the file list and diff.
pub fn render_stats(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(["Status", "File", "Added", "Removed"].map(|h| {
        Cell::from(h).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .style(Style::default().bg(Color::Blue))
    .bottom_margin(1);

    let mut rows: Vec<Row> = app
        .document
        .files()
        .iter()
        .map(|file| {
            let mut name = file.display_name();
            if file.is_binary {
                name.push_str(" (bin)");
            }
            Row::new([
                Cell::from(file.status.as_char().to_string())
                    .style(Style::default().fg(status_color(file.status))),
                Cell::from(name),
                Cell::from(format!("+{}", file.additions()))
                    .style(Style::default().fg(Color::Green)),
                Cell::from(format!("-{}", file.deletions())).style(Style::default().fg(Color::Red)),
            ])
        })
        .collect();

    let summary = app.document.summary();
    rows.push(
        Row::new([
            Cell::from(""),
            Cell::from(total_label(summary.files_changed)),
            Cell::from(format!("+{}", summary.insertions)).style(Style::default().fg(Color::Green)),
            Cell::from(format!("-{}", summary.deletions)).style(Style::default().fg(Color::Red)),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .top_margin(1),
    );

    let widths = [
        Constraint::Length(6),
        Constraint::Min(20),
        Constraint::Length(9),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Stats"))
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    // Follow the selected file so long file lists stay scrollable
    let mut state = TableState::default().with_selected(Some(app.selected_file));
    f.render_stateful_widget(table, area, &mut state);
}
