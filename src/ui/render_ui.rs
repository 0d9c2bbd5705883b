use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::{
    app::App,
    diff_file::FileStatus,
    ui::{
        footer::render_footer, side_by_side_diff::render_side_by_side_diff, stats::render_stats,
        unified_diff::render_unified_diff,
    },
};

pub fn status_color(status: FileStatus) -> Color {
    match status {
        FileStatus::Added => Color::Green,
        FileStatus::Deleted => Color::Red,
        FileStatus::Modified => Color::Yellow,
        FileStatus::Renamed => Color::Cyan,
    }
}

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    // Main layout with optional footer
    let (content_area, footer_area) = if app.show_shortcuts {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);
        (main_chunks[0], Some(main_chunks[1]))
    } else {
        (size, None)
    };

    if let Some(footer_area) = footer_area {
        render_footer(f, footer_area);
    }

    if app.show_stats {
        render_stats(f, content_area, app);
        return;
    }

    // Content layout (file list and diff)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(0)])
        .split(content_area);

    let files: Vec<ListItem> = app
        .document
        .files()
        .iter()
        .map(|file| {
            let mut spans = vec![
                Span::styled(
                    format!("{} ", file.status.as_char()),
                    Style::default()
                        .fg(status_color(file.status))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(file.display_name()),
            ];
            if file.is_binary {
                spans.push(Span::styled(" (bin)", Style::default().fg(Color::DarkGray)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let summary = app.document.summary();
    let title = Line::from(vec![
        Span::raw(format!("Files ({}) ", summary.files_changed)),
        Span::styled(
            format!("+{}", summary.insertions),
            Style::default().fg(Color::Green),
        ),
        Span::raw(" "),
        Span::styled(
            format!("-{}", summary.deletions),
            Style::default().fg(Color::Red),
        ),
    ]);

    let files_list = List::new(files)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state.clone());

    if let Some(file) = app.current_file() {
        if app.show_side_by_side {
            render_side_by_side_diff(f, chunks[1], file, app);
        } else {
            render_unified_diff(f, chunks[1], file, app);
        }
    }
}
