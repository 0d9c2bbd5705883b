use crate::diff_file::{DiffLine, FileDiff, Hunk, LineKind};

/// One side-by-side row. A `None` side renders as a blank column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedRow<'a> {
    pub left: Option<&'a DiffLine>,
    pub right: Option<&'a DiffLine>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SideBySideRow<'a> {
    HunkHeader(&'a Hunk),
    Pair(AlignedRow<'a>),
}

/// Pair a hunk's lines into two columns.
///
/// Removed lines go left, added lines go right and context lines go to both.
/// The two columns are then zipped by position, so a removed/added run of
/// unequal length leaves blanks at the end of the shorter side. Lines are never
/// re-paired by content.
pub fn align_hunk(hunk: &Hunk) -> Vec<AlignedRow<'_>> {
    let mut left = Vec::new();
    let mut right = Vec::new();

    for line in &hunk.lines {
        match line.kind {
            LineKind::Removed => left.push(line),
            LineKind::Added => right.push(line),
            LineKind::Context => {
                left.push(line);
                right.push(line);
            }
        }
    }

    (0..left.len().max(right.len()))
        .map(|i| AlignedRow {
            left: left.get(i).copied(),
            right: right.get(i).copied(),
        })
        .collect()
}

pub fn align_file(file: &FileDiff) -> Vec<SideBySideRow<'_>> {
    let mut rows = Vec::new();
    for hunk in &file.hunks {
        rows.push(SideBySideRow::HunkHeader(hunk));
        rows.extend(align_hunk(hunk).into_iter().map(SideBySideRow::Pair));
    }
    rows
}
