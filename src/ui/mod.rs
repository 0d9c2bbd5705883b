use ratatui::style::{Color, Modifier, Style};

pub mod diff_utils;
pub mod footer;
pub mod highlight_line;
pub mod render_ui;
pub mod side_by_side_diff;
pub mod stats;
pub mod unified_diff;

pub const REMOVED_BG: Color = Color::Rgb(80, 0, 0);
pub const REMOVED_EMPHASIS_BG: Color = Color::Rgb(150, 20, 20);
pub const ADDED_BG: Color = Color::Rgb(0, 70, 0);
pub const ADDED_EMPHASIS_BG: Color = Color::Rgb(20, 130, 20);
pub const FILLER_BG: Color = Color::Rgb(40, 40, 40);

pub fn gutter_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn hunk_header_style() -> Style {
    Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}
