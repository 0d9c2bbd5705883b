use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};
use syntect::{
    easy::HighlightLines,
    highlighting::{FontStyle, Style as SyntectStyle, Theme},
    parsing::{SyntaxReference, SyntaxSet},
};

const TAB_WIDTH: usize = 4;

/// Syntax highlighting for the lines of one file.
pub struct LineHighlighter<'a> {
    syntax: Option<&'a SyntaxReference>,
    syntax_set: &'a SyntaxSet,
    theme: &'a Theme,
}

impl<'a> LineHighlighter<'a> {
    pub fn new(
        syntax: Option<&'a SyntaxReference>,
        syntax_set: &'a SyntaxSet,
        theme: &'a Theme,
    ) -> Self {
        Self {
            syntax,
            syntax_set,
            theme,
        }
    }

    /// Highlight a single line. Each line is highlighted on its own, so
    /// constructs spanning lines (block comments, multi-line strings) are not
    /// tracked.
    pub fn highlight(&self, content: &str) -> Vec<Span<'static>> {
        let Some(syntax) = self.syntax else {
            return vec![Span::raw(content.to_string())];
        };

        // The newline-aware syntax set expects terminated lines
        let line = format!("{content}\n");
        let mut highlighter = HighlightLines::new(syntax, self.theme);
        match highlighter.highlight_line(&line, self.syntax_set) {
            Ok(ranges) => ranges
                .into_iter()
                .filter_map(|(style, text)| {
                    let text = text.strip_suffix('\n').unwrap_or(text);
                    (!text.is_empty())
                        .then(|| Span::styled(text.to_string(), syntect_style_to_ratatui(style)))
                })
                .collect(),
            Err(err) => {
                log::trace!("Highlighting failed, rendering plain text: {err}");
                vec![Span::raw(content.to_string())]
            }
        }
    }
}

pub fn with_background(spans: Vec<Span<'static>>, bg: Color) -> Vec<Span<'static>> {
    spans
        .into_iter()
        .map(|span| Span::styled(span.content, span.style.bg(bg)))
        .collect()
}

/// Terminal cells don't render tabs, so replace them with spaces up to the next stop.
pub fn expand_tabs(content: &str) -> String {
    if !content.contains('\t') {
        return content.to_string();
    }

    let mut expanded = String::with_capacity(content.len() + TAB_WIDTH);
    let mut column = 0;
    for c in content.chars() {
        if c == '\t' {
            let width = TAB_WIDTH - column % TAB_WIDTH;
            expanded.extend(std::iter::repeat_n(' ', width));
            column += width;
        } else {
            expanded.push(c);
            column += 1;
        }
    }
    expanded
}

fn syntect_style_to_ratatui(syntect_style: SyntectStyle) -> Style {
    let fg_color = Color::Rgb(
        syntect_style.foreground.r,
        syntect_style.foreground.g,
        syntect_style.foreground.b,
    );

    let mut style = Style::default().fg(fg_color);

    if syntect_style.font_style.contains(FontStyle::BOLD) {
        style = style.add_modifier(Modifier::BOLD);
    }
    if syntect_style.font_style.contains(FontStyle::ITALIC) {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if syntect_style.font_style.contains(FontStyle::UNDERLINE) {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    style
}
