use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::cursor::SetCursorStyle;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

mod app;
mod config;
mod copilot;
mod editor;
mod error;
mod events;
mod file_tree;
mod highlight;
mod logging;
mod notify;
mod recent;
mod samples;
mod suggestions;
mod text_layout;
mod theme;
mod ui;
mod workspace;

use app::App;
use config::EditorConfig;
use editor::{EditorRow, EditorSurface};
use events::AppEvent;
use file_tree::{FilteredTree, filter_tree};
use suggestions::{FileProfile, Suggestion, SuggestionCatalog};
use theme::Theme;
use workspace::Workspace;

#[derive(Debug, Parser)]
#[command(name = "pilotpad", version, about = "Terminal mock code editor with a canned copilot panel")]
struct Cli {
    /// Config file layered over the built-in defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Theme file; overrides `ui.theme_file` from config.
    #[arg(long, value_name = "PATH")]
    theme: Option<PathBuf>,
    /// Workspace path to open first.
    #[arg(long, value_name = "PATH", default_value = samples::DEFAULT_ACTIVE_FILE)]
    open: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the highlighted lines of a file on disk as JSON.
    Highlight { file: PathBuf },
    /// Print the canned suggestion set for a file name as JSON.
    Suggest { file: String },
    /// Print the sample workspace tree, optionally filtered, as JSON.
    Tree {
        #[arg(long, value_name = "QUERY", default_value = "")]
        filter: String,
    },
}

#[derive(Debug, Serialize)]
struct HighlightOutput {
    file: String,
    language: &'static str,
    lines: Vec<EditorRow>,
}

#[derive(Debug, Serialize)]
struct SuggestOutput<'a> {
    file: &'a str,
    profile: FileProfile,
    suggestions: &'a [Suggestion],
}

#[derive(Debug, Serialize)]
struct TreeOutput<'a> {
    query: &'a str,
    #[serde(flatten)]
    tree: FilteredTree,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = EditorConfig::load(cli.config.as_deref())?;
    match &cli.command {
        Some(command) => run_headless(command),
        None => run_interactive(&cli, &config),
    }
}

fn run_headless(command: &Command) -> Result<()> {
    let json = match command {
        Command::Highlight { file } => serde_json::to_string_pretty(&highlight_file(file)?)?,
        Command::Suggest { file } => {
            let catalog = SuggestionCatalog::builtin()?;
            let profile = FileProfile::for_file(file);
            serde_json::to_string_pretty(&SuggestOutput {
                file,
                profile,
                suggestions: catalog.for_profile(profile),
            })?
        }
        Command::Tree { filter } => serde_json::to_string_pretty(&TreeOutput {
            query: filter,
            tree: filter_tree(&samples::sample_tree(), filter),
        })?,
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

fn highlight_file(path: &Path) -> Result<HighlightOutput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file = path.display().to_string();
    let surface = EditorSurface::new(&file);
    Ok(HighlightOutput {
        language: surface.language(),
        lines: surface.rows(&content),
        file,
    })
}

fn run_interactive(cli: &Cli, config: &EditorConfig) -> Result<()> {
    let _log_guard = logging::init_file_logging(&config.log_file_path(), &config.logging.level)?;
    let theme_path = cli.theme.clone().unwrap_or_else(|| config.theme_path());
    let theme = Theme::load_or_default(&theme_path);
    let catalog = Arc::new(SuggestionCatalog::builtin()?);
    let workspace = Workspace::sample(&cli.open, config.toast_duration());
    let app = App::new(workspace, catalog, config.copilot_timing());
    info!(open = %cli.open, theme = %theme_path.display(), "starting editor");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetCursorStyle::SteadyBar
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    let result = run_app(&mut terminal, app, &theme);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        SetCursorStyle::DefaultUserShape,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        warn!("editor exited with error: {err:#}");
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    theme: &Theme,
) -> Result<()> {
    while app.running {
        let size = terminal.size()?;
        app.set_screen(Rect::new(0, 0, size.width, size.height));
        app.on_tick()?;
        terminal.draw(|frame| ui::render(frame, &app, theme))?;

        match events::next_event()? {
            AppEvent::Tick => {}
            event => app.handle_event(event)?,
        }
    }
    app.shutdown();
    info!("editor closed");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/main_launch_tests.rs"]
mod launch_tests;
