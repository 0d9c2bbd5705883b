use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::{
    app::App,
    diff_file::{DiffLine, FileDiff, LineKind, UnifiedRow},
    ui::{
        ADDED_BG, ADDED_EMPHASIS_BG, REMOVED_BG, REMOVED_EMPHASIS_BG,
        diff_utils::{apply_diff_highlight, intra_line_ranges},
        gutter_style,
        highlight_line::{LineHighlighter, expand_tabs, with_background},
        hunk_header_style,
    },
};

pub fn render_unified_diff(f: &mut Frame, area: Rect, file: &FileDiff, app: &App) {
    let visible_lines = area.height.saturating_sub(2) as usize;
    let highlighter = LineHighlighter::new(
        app.get_syntax_for_file(file.path()),
        app.syntax_set(),
        app.theme(),
    );

    let rows = file.unified_rows();
    let end_line = (app.scroll_offset + visible_lines).min(rows.len());
    let mut lines = Vec::new();
    let mut i = app.scroll_offset;

    while i < end_line {
        let diff_line = match rows[i] {
            UnifiedRow::HunkHeader(hunk) => {
                lines.push(Line::from(vec![
                    Span::styled("          @ ", hunk_header_style()),
                    Span::styled(hunk.header(), hunk_header_style()),
                ]));
                i += 1;
                continue;
            }
            UnifiedRow::Line(diff_line) => diff_line,
        };

        // A removed line directly followed by an added line gets intra-line emphasis
        if diff_line.kind == LineKind::Removed
            && i + 1 < end_line
            && let UnifiedRow::Line(next_line) = rows[i + 1]
            && next_line.kind == LineKind::Added
            && let Some((old_spans, new_spans)) =
                emphasized_pair(diff_line, next_line, &highlighter)
        {
            lines.push(render_diff_line(diff_line, old_spans));
            lines.push(render_diff_line(next_line, new_spans));
            i += 2;
            continue;
        }

        let spans = highlighter.highlight(&expand_tabs(&diff_line.content));
        let spans = match diff_line.kind {
            LineKind::Added => with_background(spans, ADDED_BG),
            LineKind::Removed => with_background(spans, REMOVED_BG),
            LineKind::Context => spans,
        };
        lines.push(render_diff_line(diff_line, spans));
        i += 1;
    }

    let title = format!("{} [{}]", file.display_name(), file.status.as_char());
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((0, app.horizontal_scroll_offset.min(u16::MAX as usize) as u16));

    f.render_widget(paragraph, area);

    if rows.len() > visible_lines {
        let mut scrollbar_state = ScrollbarState::new(rows.len()).position(app.scroll_offset);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));

        f.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn emphasized_pair(
    removed: &DiffLine,
    added: &DiffLine,
    highlighter: &LineHighlighter,
) -> Option<(Vec<Span<'static>>, Vec<Span<'static>>)> {
    let old_content = expand_tabs(&removed.content);
    let new_content = expand_tabs(&added.content);
    let (old_ranges, new_ranges) = intra_line_ranges(&old_content, &new_content)?;

    Some((
        apply_diff_highlight(
            highlighter.highlight(&old_content),
            &old_ranges,
            REMOVED_BG,
            REMOVED_EMPHASIS_BG,
        ),
        apply_diff_highlight(
            highlighter.highlight(&new_content),
            &new_ranges,
            ADDED_BG,
            ADDED_EMPHASIS_BG,
        ),
    ))
}

fn render_diff_line(diff_line: &DiffLine, content: Vec<Span<'static>>) -> Line<'static> {
    let line_num_text = match (diff_line.old_line_num, diff_line.new_line_num) {
        (Some(old), Some(new)) => format!("{old:4}:{new:4} "),
        (Some(old), None) => format!("{old:4}:     "),
        (None, Some(new)) => format!("     {new:4} "),
        (None, None) => "          ".to_string(),
    };

    let (prefix, prefix_style) = match diff_line.kind {
        LineKind::Added => ("+ ", Style::default().bg(ADDED_BG).fg(Color::White)),
        LineKind::Removed => ("- ", Style::default().bg(REMOVED_BG).fg(Color::White)),
        LineKind::Context => ("  ", Style::default().fg(Color::White)),
    };

    let mut spans = vec![
        Span::styled(line_num_text, gutter_style()),
        Span::styled(prefix, prefix_style),
    ];
    spans.extend(content);
    Line::from(spans)
}
