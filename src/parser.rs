use std::sync::LazyLock;

use regex::Regex;

use crate::diff_file::{DiffDocument, DiffLine, DiffSummary, FileDiff, FileStatus, Hunk};

const DEV_NULL: &str = "/dev/null";

/// `@@ -old_start[,old_count] +new_start[,new_count] @@[ section]`
static HUNK_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@ ?(.*)$")
        .expect("Invalid hunk header regex")
});

/// Parse `git diff` output into a [`DiffDocument`].
///
/// Never fails: fragments that cannot be understood are skipped and whatever
/// could be read is returned.
pub fn parse_diff(diff_text: &str) -> DiffDocument {
    let mut parser = DiffParser::default();
    for line in diff_text.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// Extended header facts collected for the open file.
#[derive(Debug, Default)]
struct FileHeaders {
    new_file: bool,
    deleted_file: bool,
    renamed: bool,
}

#[derive(Debug, Default)]
struct DiffParser {
    files: Vec<FileDiff>,
    current_file: Option<FileDiff>,
    headers: FileHeaders,
    current_hunk: Option<Hunk>,
    old_line_num: u32,
    new_line_num: u32,
    // Lines the open hunk still expects on each side.
    old_remaining: u32,
    new_remaining: u32,
    summary: DiffSummary,
}

impl DiffParser {
    fn feed(&mut self, line: &str) {
        if self.hunk_expects_content() && self.push_content(line) {
            return;
        }

        if let Some(rest) = line.strip_prefix("diff --git ") {
            self.flush_file();
            let (old_path, new_path) = split_git_header(rest);
            self.current_file = Some(FileDiff::new(&old_path, &new_path));
        } else if let Some(path) = line.strip_prefix("--- ") {
            // Plain `diff -u` output has no `diff --git` line between files
            if self.current_hunk.is_some()
                || self.current_file.as_ref().is_some_and(|f| !f.hunks.is_empty())
            {
                self.flush_file();
            }
            self.file_mut().old_path = parse_marker_path(path, "a/");
        } else if let Some(path) = line.strip_prefix("+++ ") {
            self.flush_hunk();
            self.file_mut().new_path = parse_marker_path(path, "b/");
        } else if line.starts_with("@@") {
            self.open_hunk(line);
        } else if self.current_hunk.is_some() && !line.starts_with('\\') {
            // The hunk got every line its header announced; anything else up
            // to the next header (a format-patch signature, say) is not content
            log::debug!("Ignoring line past the end of a hunk: {line}");
        } else {
            self.extended_header(line);
        }
    }

    fn hunk_expects_content(&self) -> bool {
        self.current_hunk.is_some() && (self.old_remaining > 0 || self.new_remaining > 0)
    }

    /// Returns `false` when `line` is not a content line.
    fn push_content(&mut self, line: &str) -> bool {
        let Some(hunk) = self.current_hunk.as_mut() else {
            return false;
        };

        let diff_line = match line.as_bytes().first() {
            Some(b'-') => {
                let diff_line = DiffLine::new_removed(line, self.old_line_num);
                self.old_line_num = self.old_line_num.saturating_add(1);
                self.old_remaining = self.old_remaining.saturating_sub(1);
                diff_line
            }
            Some(b'+') => {
                let diff_line = DiffLine::new_added(line, self.new_line_num);
                self.new_line_num = self.new_line_num.saturating_add(1);
                self.new_remaining = self.new_remaining.saturating_sub(1);
                diff_line
            }
            Some(b' ') => {
                let diff_line = DiffLine::new_context(line, self.old_line_num, self.new_line_num);
                self.old_line_num = self.old_line_num.saturating_add(1);
                self.new_line_num = self.new_line_num.saturating_add(1);
                self.old_remaining = self.old_remaining.saturating_sub(1);
                self.new_remaining = self.new_remaining.saturating_sub(1);
                diff_line
            }
            // "\ No newline at end of file"
            Some(b'\\') => return true,
            _ => return false,
        };

        self.summary.record(diff_line.kind);
        hunk.lines.push(diff_line);
        true
    }

    fn open_hunk(&mut self, line: &str) {
        let Some(captures) = HUNK_HEADER_REGEX.captures(line) else {
            log::debug!("Skipping malformed hunk header: {line}");
            return;
        };

        // An omitted count means 1; a number that does not fit is a broken header
        let number = |index: usize| match captures.get(index) {
            Some(m) => m.as_str().parse::<u32>().ok(),
            None => Some(1),
        };
        let (Some(old_start), Some(old_count), Some(new_start), Some(new_count)) =
            (number(1), number(2), number(3), number(4))
        else {
            log::debug!("Skipping hunk header with out of range numbers: {line}");
            return;
        };

        let mut hunk = Hunk::new(old_start, old_count, new_start, new_count);
        hunk.section = captures
            .get(5)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        self.flush_hunk();
        self.file_mut();

        self.old_line_num = hunk.old_start;
        self.new_line_num = hunk.new_start;
        self.old_remaining = hunk.old_count;
        self.new_remaining = hunk.new_count;
        self.current_hunk = Some(hunk);
    }

    fn extended_header(&mut self, line: &str) {
        let Some(file) = self.current_file.as_mut() else {
            return;
        };

        if line.starts_with("new file mode") {
            self.headers.new_file = true;
        } else if line.starts_with("deleted file mode") {
            self.headers.deleted_file = true;
        } else if let Some(path) = line.strip_prefix("rename from ") {
            file.old_path = Some(path.to_string());
            self.headers.renamed = true;
        } else if let Some(path) = line.strip_prefix("rename to ") {
            file.new_path = Some(path.to_string());
            self.headers.renamed = true;
        } else if line.starts_with("Binary files ") || line.starts_with("GIT binary patch") {
            file.is_binary = true;
        }
    }

    /// The open file, synthesizing an untitled one when content shows up
    /// before any `diff --git` header.
    fn file_mut(&mut self) -> &mut FileDiff {
        self.current_file.get_or_insert_with(|| {
            log::debug!("Diff content without a file header, synthesizing an untitled file");
            FileDiff::new("", "")
        })
    }

    fn flush_hunk(&mut self) {
        if let Some(hunk) = self.current_hunk.take() {
            self.file_mut().hunks.push(hunk);
        }
        self.old_remaining = 0;
        self.new_remaining = 0;
    }

    fn flush_file(&mut self) {
        self.flush_hunk();
        if let Some(mut file) = self.current_file.take() {
            file.status = derive_status(&file, &self.headers);
            self.files.push(file);
        }
        self.headers = FileHeaders::default();
    }

    fn finish(mut self) -> DiffDocument {
        self.flush_file();
        self.summary.files_changed = self.files.len();
        DiffDocument::with_summary(self.files, self.summary)
    }
}

fn derive_status(file: &FileDiff, headers: &FileHeaders) -> FileStatus {
    if file.old_path.is_none() || headers.new_file {
        FileStatus::Added
    } else if file.new_path.is_none() || headers.deleted_file {
        FileStatus::Deleted
    } else if headers.renamed || (file.old_path != file.new_path && file.hunks.is_empty()) {
        FileStatus::Renamed
    } else {
        FileStatus::Modified
    }
}

/// Split the `a/<old> b/<new>` remainder of a `diff --git` line.
fn split_git_header(rest: &str) -> (String, String) {
    if let Some(old) = rest.strip_prefix("a/")
        && let Some((old, new)) = old.rsplit_once(" b/")
    {
        return (old.to_string(), new.to_string());
    }

    // --no-prefix output, or paths git did not prefix
    match rest.split_once(' ') {
        Some((old, new)) => (old.to_string(), new.to_string()),
        None => (rest.to_string(), rest.to_string()),
    }
}

/// Path from a `---`/`+++` marker; `None` for the `/dev/null` sentinel.
fn parse_marker_path(raw: &str, prefix: &str) -> Option<String> {
    // Traditional diffs append a tab and a timestamp
    let path = raw.split('\t').next().unwrap_or(raw).trim_end();
    if path == DEV_NULL {
        return None;
    }
    Some(path.strip_prefix(prefix).unwrap_or(path).to_string())
}
