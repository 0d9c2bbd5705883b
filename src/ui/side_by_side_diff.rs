use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::{
    align::{AlignedRow, SideBySideRow, align_file},
    app::App,
    diff_file::{DiffLine, FileDiff, LineKind},
    ui::{
        ADDED_BG, ADDED_EMPHASIS_BG, FILLER_BG, REMOVED_BG, REMOVED_EMPHASIS_BG,
        diff_utils::{apply_diff_highlight, intra_line_ranges},
        gutter_style,
        highlight_line::{LineHighlighter, expand_tabs, with_background},
        hunk_header_style,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Old,
    New,
}

pub fn render_side_by_side_diff(f: &mut Frame, area: Rect, file: &FileDiff, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let visible_lines = area.height.saturating_sub(2) as usize;
    let panel_width = chunks[0].width.saturating_sub(2) as usize;
    let highlighter = LineHighlighter::new(
        app.get_syntax_for_file(file.path()),
        app.syntax_set(),
        app.theme(),
    );

    let rows = align_file(file);
    let mut old_lines = Vec::new();
    let mut new_lines = Vec::new();

    for row in rows.iter().skip(app.scroll_offset).take(visible_lines) {
        match row {
            SideBySideRow::HunkHeader(hunk) => {
                let header = Line::from(Span::styled(hunk.header(), hunk_header_style()));
                old_lines.push(header.clone());
                new_lines.push(header);
            }
            SideBySideRow::Pair(pair) => {
                let (old_line, new_line) = render_pair(pair, &highlighter, panel_width);
                old_lines.push(old_line);
                new_lines.push(new_line);
            }
        }
    }

    let horizontal = app.horizontal_scroll_offset.min(u16::MAX as usize) as u16;
    let old_title = format!("Old: {}", file.old_path.as_deref().unwrap_or("/dev/null"));
    let new_title = format!("New: {}", file.new_path.as_deref().unwrap_or("/dev/null"));

    let old_paragraph = Paragraph::new(Text::from(old_lines))
        .block(Block::default().borders(Borders::ALL).title(old_title))
        .scroll((0, horizontal));
    let new_paragraph = Paragraph::new(Text::from(new_lines))
        .block(Block::default().borders(Borders::ALL).title(new_title))
        .scroll((0, horizontal));

    f.render_widget(old_paragraph, chunks[0]);
    f.render_widget(new_paragraph, chunks[1]);

    if rows.len() > visible_lines {
        let mut scrollbar_state = ScrollbarState::new(rows.len()).position(app.scroll_offset);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));

        for chunk in chunks.iter() {
            f.render_stateful_widget(
                scrollbar.clone(),
                chunk.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }
}

fn render_pair(
    pair: &AlignedRow,
    highlighter: &LineHighlighter,
    panel_width: usize,
) -> (Line<'static>, Line<'static>) {
    if let (Some(old), Some(new)) = (pair.left, pair.right)
        && old.kind == LineKind::Removed
        && new.kind == LineKind::Added
    {
        let old_content = expand_tabs(&old.content);
        let new_content = expand_tabs(&new.content);
        if let Some((old_ranges, new_ranges)) = intra_line_ranges(&old_content, &new_content) {
            let old_spans = apply_diff_highlight(
                highlighter.highlight(&old_content),
                &old_ranges,
                REMOVED_BG,
                REMOVED_EMPHASIS_BG,
            );
            let new_spans = apply_diff_highlight(
                highlighter.highlight(&new_content),
                &new_ranges,
                ADDED_BG,
                ADDED_EMPHASIS_BG,
            );
            return (
                with_gutter(old.old_line_num, old_spans),
                with_gutter(new.new_line_num, new_spans),
            );
        }
    }

    (
        render_cell(pair.left, Side::Old, highlighter, panel_width),
        render_cell(pair.right, Side::New, highlighter, panel_width),
    )
}

fn render_cell(
    line: Option<&DiffLine>,
    side: Side,
    highlighter: &LineHighlighter,
    panel_width: usize,
) -> Line<'static> {
    let Some(line) = line else {
        // Blank column, filled to the panel width so the gap is visible
        return Line::from(Span::styled(
            " ".repeat(panel_width),
            Style::default().bg(FILLER_BG),
        ));
    };

    let spans = highlighter.highlight(&expand_tabs(&line.content));
    let spans = match line.kind {
        LineKind::Removed => with_background(spans, REMOVED_BG),
        LineKind::Added => with_background(spans, ADDED_BG),
        LineKind::Context => spans,
    };
    let number = match side {
        Side::Old => line.old_line_num,
        Side::New => line.new_line_num,
    };
    with_gutter(number, spans)
}

fn with_gutter(number: Option<u32>, spans: Vec<Span<'static>>) -> Line<'static> {
    let gutter = match number {
        Some(n) => format!("{n:4} "),
        None => "     ".to_string(),
    };
    let mut line_spans = vec![Span::styled(gutter, gutter_style())];
    line_spans.extend(spans);
    Line::from(line_spans)
}
