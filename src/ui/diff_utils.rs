use ratatui::{style::Color, text::Span};
use similar::{Algorithm, ChangeTag, TextDiff};
use std::ops::Range;

/// Below this similarity a removed/added pair is treated as unrelated text
/// and gets no intra-line emphasis.
const MIN_SIMILARITY: f32 = 0.4;

/// Byte ranges that differ between a removed line and the added line shown
/// next to it, as `(old ranges, new ranges)`.
///
/// Returns `None` when the lines share too little to make emphasis useful,
/// which is common since rows are paired by position rather than content.
pub fn intra_line_ranges(
    old_text: &str,
    new_text: &str,
) -> Option<(Vec<Range<usize>>, Vec<Range<usize>>)> {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_chars(old_text, new_text);

    if diff.ratio() < MIN_SIMILARITY {
        return None;
    }

    let mut old_ranges: Vec<Range<usize>> = Vec::new();
    let mut new_ranges: Vec<Range<usize>> = Vec::new();
    let mut old_idx = 0;
    let mut new_idx = 0;

    for change in diff.iter_all_changes() {
        let len = change.value().len();
        match change.tag() {
            ChangeTag::Equal => {
                old_idx += len;
                new_idx += len;
            }
            ChangeTag::Delete => {
                push_merged(&mut old_ranges, old_idx..old_idx + len);
                old_idx += len;
            }
            ChangeTag::Insert => {
                push_merged(&mut new_ranges, new_idx..new_idx + len);
                new_idx += len;
            }
        }
    }

    Some((old_ranges, new_ranges))
}

fn push_merged(ranges: &mut Vec<Range<usize>>, range: Range<usize>) {
    match ranges.last_mut() {
        Some(last) if last.end == range.start => last.end = range.end,
        _ => ranges.push(range),
    }
}

/// Re-style syntax highlighted spans so `diff_ranges` stand out.
///
/// * `base_bg` - background for the whole line (e.g. dark red for removed)
/// * `highlight_bg` - background for the changed parts
pub fn apply_diff_highlight(
    spans: Vec<Span<'static>>,
    diff_ranges: &[Range<usize>],
    base_bg: Color,
    highlight_bg: Color,
) -> Vec<Span<'static>> {
    let mut new_spans = Vec::new();
    let mut current_idx = 0;

    for span in spans {
        let content = span.content;
        let style = span.style;
        let span_end = current_idx + content.len();
        let mut last_processed = current_idx;

        for range in diff_ranges {
            if range.end <= current_idx {
                continue;
            }
            if range.start >= span_end {
                break;
            }

            let overlap_start = range.start.max(current_idx);
            let overlap_end = range.end.min(span_end);

            if overlap_start > last_processed {
                new_spans.push(Span::styled(
                    content[(last_processed - current_idx)..(overlap_start - current_idx)]
                        .to_string(),
                    style.bg(base_bg),
                ));
            }

            new_spans.push(Span::styled(
                content[(overlap_start - current_idx)..(overlap_end - current_idx)].to_string(),
                style.bg(highlight_bg),
            ));

            last_processed = overlap_end;
        }

        if last_processed < span_end {
            new_spans.push(Span::styled(
                content[(last_processed - current_idx)..].to_string(),
                style.bg(base_bg),
            ));
        }

        current_idx = span_end;
    }

    new_spans
}
