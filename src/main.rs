use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};

use crate::{
    app::{App, DEFAULT_THEME, MIN_SIDE_BY_SIDE_WIDTH, PAGE_SIZE, ViewOptions},
    parser::parse_diff,
    source::DiffSource,
    ui::render_ui::ui,
    watcher::GitWatcher,
};

mod align;
mod app;
mod diff_file;
mod logger;
mod parser;
mod source;
mod test;
mod ui;
mod watcher;

const SMALL_H_SCROLL: usize = 4;
const LARGE_H_SCROLL: usize = 20;
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Git diff arguments (e.g., "HEAD~1", "main..feature")
    #[arg(default_value = "")]
    diff_args: String,

    /// Show staged changes (git diff --staged)
    #[arg(short, long)]
    staged: bool,

    /// Read the diff from a file instead of running git ("-" for stdin)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Start in the unified view instead of side-by-side
    #[arg(short, long)]
    unified: bool,

    /// Syntax highlighting theme
    #[arg(long, default_value = DEFAULT_THEME)]
    theme: String,

    /// Do not reload when the repository changes
    #[arg(long)]
    no_watch: bool,

    /// Where to write the log (defaults to sidediff.log in the temp directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn reload(app: &mut App, source: &DiffSource) {
    match source.read() {
        Ok(diff_text) => {
            let document = parse_diff(&diff_text);
            let summary = document.summary();
            log::info!(
                "Reloaded {} files, +{} -{}",
                summary.files_changed,
                summary.insertions,
                summary.deletions
            );
            app.replace_document(document);
        }
        Err(err) => log::warn!("Keeping the previous diff, reload failed: {err}"),
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    source: &DiffSource,
    watcher: Option<&GitWatcher>,
) -> Result<()> {
    let mut redraw = true;
    loop {
        if redraw {
            terminal.draw(|f| ui(f, &app))?;
            redraw = false;
        }

        if watcher.is_some_and(GitWatcher::changed) {
            reload(&mut app, source);
            redraw = true;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        // Resizes and other events need a redraw too
        redraw = true;
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('j') | KeyCode::Char('n') | KeyCode::Down => app.next_file(),
            KeyCode::Char('k') | KeyCode::Char('p') | KeyCode::Up => app.previous_file(),
            KeyCode::Char('d') | KeyCode::PageDown => app.scroll_down(PAGE_SIZE),
            KeyCode::Char('u') | KeyCode::PageUp => app.scroll_up(PAGE_SIZE),
            KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
            KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),
            KeyCode::Char('l') | KeyCode::Right => app.scroll_right(SMALL_H_SCROLL),
            KeyCode::Char('h') | KeyCode::Left => app.scroll_left(SMALL_H_SCROLL),
            KeyCode::Char('L') => app.scroll_right(LARGE_H_SCROLL),
            KeyCode::Char('H') => app.scroll_left(LARGE_H_SCROLL),
            KeyCode::Char('0') => app.reset_horizontal_scroll(),
            KeyCode::Char('s') => {
                let width = terminal.size()?.width;
                app.toggle_view_mode(width);
            }
            KeyCode::Char('t') => app.toggle_stats(),
            KeyCode::Char('?') => app.toggle_shortcuts(),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = logger::init(args.log_file.clone())?;
    log::info!("Starting sidediff, logging to {}", log_path.display());

    let source = DiffSource::from_args(&args.diff_args, args.staged, args.file.clone());
    let diff_text = source.read().context("Failed to load diff")?;
    let document = parse_diff(&diff_text);

    let summary = document.summary();
    log::info!(
        "Parsed {} files, +{} -{}",
        summary.files_changed,
        summary.insertions,
        summary.deletions
    );

    if document.is_empty() {
        println!("No changes to display");
        return Ok(());
    }

    let options = ViewOptions {
        side_by_side: !args.unified,
        theme: args.theme,
    };
    let mut app = App::new(document, options)?;

    let watcher = match source {
        DiffSource::Git { .. } if !args.no_watch => GitWatcher::new()
            .inspect_err(|err| log::warn!("Auto-reload disabled: {err:#}"))
            .ok(),
        _ => None,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if terminal.size()?.width < MIN_SIDE_BY_SIDE_WIDTH {
        app.show_side_by_side = false;
    }

    let res = run_app(&mut terminal, app, &source, watcher.as_ref());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("{err:?}");
        eprintln!("{err:?}");
    }

    log::info!("Exiting sidediff");
    Ok(())
}
