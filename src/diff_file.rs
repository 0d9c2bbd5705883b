#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Context,
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: LineKind,
    pub old_line_num: Option<u32>,
    pub new_line_num: Option<u32>,
    pub content: String,
}

impl DiffLine {
    pub fn new_added(line: &str, line_number: u32) -> Self {
        Self {
            kind: LineKind::Added,
            old_line_num: None,
            new_line_num: Some(line_number),
            content: line[1..].to_string(),
        }
    }

    pub fn new_removed(line: &str, line_number: u32) -> Self {
        Self {
            kind: LineKind::Removed,
            old_line_num: Some(line_number),
            new_line_num: None,
            content: line[1..].to_string(),
        }
    }

    pub fn new_context(line: &str, old_line_num: u32, new_line_num: u32) -> Self {
        Self {
            kind: LineKind::Context,
            old_line_num: Some(old_line_num),
            new_line_num: Some(new_line_num),
            content: line[1..].to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
    /// Text after the closing `@@`, usually the enclosing function.
    pub section: Option<String>,
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self {
            old_start,
            old_count,
            new_start,
            new_count,
            section: None,
            lines: Vec::new(),
        }
    }

    pub fn header(&self) -> String {
        let range = format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        );
        match &self.section {
            Some(section) => format!("{range} {section}"),
            None => range,
        }
    }

    pub fn count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl FileStatus {
    pub fn as_char(self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Deleted => 'D',
            FileStatus::Renamed => 'R',
        }
    }
}

/// One file's worth of a diff.
///
/// A `None` path marks the `/dev/null` side: the file does not exist before
/// (`old_path`) or after (`new_path`) the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub old_path: Option<String>,
    pub new_path: Option<String>,
    pub status: FileStatus,
    pub hunks: Vec<Hunk>,
    pub is_binary: bool,
}

impl FileDiff {
    pub fn new(old_path: &str, new_path: &str) -> Self {
        Self {
            old_path: Some(old_path.to_string()),
            new_path: Some(new_path.to_string()),
            status: FileStatus::Modified,
            hunks: Vec::new(),
            is_binary: false,
        }
    }

    pub fn path(&self) -> &str {
        self.new_path
            .as_deref()
            .or(self.old_path.as_deref())
            .unwrap_or_default()
    }

    pub fn display_name(&self) -> String {
        match (&self.status, &self.old_path, &self.new_path) {
            (FileStatus::Renamed, Some(old), Some(new)) => format!("{old} → {new}"),
            _ => self.path().to_string(),
        }
    }

    pub fn additions(&self) -> usize {
        self.hunks.iter().map(|h| h.count(LineKind::Added)).sum()
    }

    pub fn deletions(&self) -> usize {
        self.hunks.iter().map(|h| h.count(LineKind::Removed)).sum()
    }

    /// Flattened rows for the unified view: each hunk header followed by its lines.
    pub fn unified_rows(&self) -> Vec<UnifiedRow<'_>> {
        let mut rows = Vec::new();
        for hunk in &self.hunks {
            rows.push(UnifiedRow::HunkHeader(hunk));
            rows.extend(hunk.lines.iter().map(UnifiedRow::Line));
        }
        rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnifiedRow<'a> {
    HunkHeader(&'a Hunk),
    Line(&'a DiffLine),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffSummary {
    pub fn from_files(files: &[FileDiff]) -> Self {
        files.iter().fold(
            Self {
                files_changed: files.len(),
                ..Self::default()
            },
            |mut summary, file| {
                summary.insertions += file.additions();
                summary.deletions += file.deletions();
                summary
            },
        )
    }

    pub fn record(&mut self, kind: LineKind) {
        match kind {
            LineKind::Added => self.insertions += 1,
            LineKind::Removed => self.deletions += 1,
            LineKind::Context => {}
        }
    }
}

/// A parsed diff. Immutable once built; `summary` always describes `files`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffDocument {
    files: Vec<FileDiff>,
    summary: DiffSummary,
}

impl DiffDocument {
    /// `summary` is counted by the parser as it goes and must agree with a recount.
    pub fn with_summary(files: Vec<FileDiff>, summary: DiffSummary) -> Self {
        debug_assert_eq!(summary, DiffSummary::from_files(&files));
        Self { files, summary }
    }

    pub fn files(&self) -> &[FileDiff] {
        &self.files
    }

    pub fn summary(&self) -> DiffSummary {
        self.summary
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
