use anyhow::{Result, bail};
use ratatui::widgets::ListState;
use syntect::{
    highlighting::{Theme, ThemeSet},
    parsing::{SyntaxReference, SyntaxSet},
};

use crate::{
    align::align_file,
    diff_file::{DiffDocument, FileDiff},
};

pub const DEFAULT_THEME: &str = "base16-ocean.dark";
pub const PAGE_SIZE: usize = 10;
pub const MIN_SIDE_BY_SIDE_WIDTH: u16 = 120;

#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub side_by_side: bool,
    pub theme: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            side_by_side: true,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// Navigation state over an immutable [`DiffDocument`].
pub struct App {
    pub document: DiffDocument,
    pub selected_file: usize,
    pub file_list_state: ListState,
    pub scroll_offset: usize,
    pub horizontal_scroll_offset: usize,
    pub show_side_by_side: bool,
    pub show_shortcuts: bool,
    pub show_stats: bool,
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl App {
    pub fn new(document: DiffDocument, options: ViewOptions) -> Result<Self> {
        let mut theme_set = ThemeSet::load_defaults();
        let Some(theme) = theme_set.themes.remove(&options.theme) else {
            let available: Vec<_> = theme_set.themes.keys().cloned().collect();
            bail!(
                "Unknown theme '{}', available themes: {}",
                options.theme,
                available.join(", ")
            );
        };

        let mut state = ListState::default();
        if !document.is_empty() {
            state.select(Some(0));
        }

        Ok(Self {
            document,
            selected_file: 0,
            file_list_state: state,
            scroll_offset: 0,
            horizontal_scroll_offset: 0,
            show_side_by_side: options.side_by_side,
            show_shortcuts: true,
            show_stats: false,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Swap in a freshly parsed document, staying on the same file when it is
    /// still part of the diff.
    pub fn replace_document(&mut self, document: DiffDocument) {
        let previous = self.current_file().map(|f| f.path().to_string());
        self.document = document;

        let count = self.document.files().len();
        let same_file = previous
            .as_deref()
            .and_then(|path| self.document.files().iter().position(|f| f.path() == path));

        match same_file {
            Some(index) => {
                self.selected_file = index;
                self.file_list_state.select(Some(index));
                self.scroll_offset = self.scroll_offset.min(self.row_count().saturating_sub(1));
            }
            None if count > 0 => self.select_file(self.selected_file.min(count - 1)),
            None => {
                self.selected_file = 0;
                self.file_list_state.select(None);
                self.scroll_offset = 0;
                self.horizontal_scroll_offset = 0;
            }
        }
    }

    pub fn current_file(&self) -> Option<&FileDiff> {
        self.document.files().get(self.selected_file)
    }

    /// Number of rows the current file occupies in the active view.
    pub fn row_count(&self) -> usize {
        match self.current_file() {
            Some(file) if self.show_side_by_side => align_file(file).len(),
            Some(file) => file.unified_rows().len(),
            None => 0,
        }
    }

    pub fn next_file(&mut self) {
        let count = self.document.files().len();
        if count > 0 {
            self.select_file((self.selected_file + 1) % count);
        }
    }

    pub fn previous_file(&mut self) {
        let count = self.document.files().len();
        if count > 0 {
            let index = if self.selected_file == 0 {
                count - 1
            } else {
                self.selected_file - 1
            };
            self.select_file(index);
        }
    }

    fn select_file(&mut self, index: usize) {
        self.selected_file = index;
        self.file_list_state.select(Some(index));
        self.scroll_offset = 0;
        self.horizontal_scroll_offset = 0;
    }

    pub fn scroll_down(&mut self, rows: usize) {
        let last = self.row_count().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + rows).min(last);
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.row_count().saturating_sub(1);
    }

    pub fn scroll_right(&mut self, columns: usize) {
        self.horizontal_scroll_offset = self.horizontal_scroll_offset.saturating_add(columns);
    }

    pub fn scroll_left(&mut self, columns: usize) {
        self.horizontal_scroll_offset = self.horizontal_scroll_offset.saturating_sub(columns);
    }

    pub fn reset_horizontal_scroll(&mut self) {
        self.horizontal_scroll_offset = 0;
    }

    /// Side-by-side needs room for two columns; narrow terminals stay unified.
    pub fn toggle_view_mode(&mut self, width: u16) {
        self.show_side_by_side = width >= MIN_SIDE_BY_SIDE_WIDTH && !self.show_side_by_side;
        // Row counts differ between the views
        self.scroll_offset = self.scroll_offset.min(self.row_count().saturating_sub(1));
    }

    pub fn toggle_shortcuts(&mut self) {
        self.show_shortcuts = !self.show_shortcuts;
    }

    /// The stats table replaces the file list and diff; navigation keeps working.
    pub fn toggle_stats(&mut self) {
        self.show_stats = !self.show_stats;
    }

    pub fn get_syntax_for_file(&self, filename: &str) -> Option<&SyntaxReference> {
        // Try by extension first
        if let Some(extension) = std::path::Path::new(filename).extension()
            && let Some(ext_str) = extension.to_str()
        {
            match ext_str {
                "ts" | "tsx" => {
                    // TypeScript isn't in default syntect, use JavaScript syntax
                    return self
                        .syntax_set
                        .find_syntax_by_extension("js")
                        .or_else(|| self.syntax_set.find_syntax_by_name("JavaScript"));
                }
                "jsx" | "mjs" | "cjs" => return self.syntax_set.find_syntax_by_extension("js"),
                "cc" | "cxx" | "hpp" => return self.syntax_set.find_syntax_by_extension("cpp"),
                _ => {
                    if let Some(syntax) = self.syntax_set.find_syntax_by_extension(ext_str) {
                        return Some(syntax);
                    }
                }
            }
        }

        self.syntax_set
            .find_syntax_for_file(filename)
            .ok()
            .flatten()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn syntax_set(&self) -> &SyntaxSet {
        &self.syntax_set
    }
}
