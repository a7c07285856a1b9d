//! Terminal front-end: browse a JSON dataset in any of the five views.
//!
//! Run without arguments for the built-in `users` demo, or pass a JSON file
//! holding an array of objects.

mod app;
mod config;
mod dataset;

use std::io::{self, stderr, Stderr};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use multiview::core::roles::CardLayout;
use multiview::{ColumnDef, DataView, DataViewOptions, JsonRecord, ViewMode};
use ratatui::{
    backend::CrosstermBackend,
    layout::Alignment,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    layout::{view_block, AppLayout},
    popup,
    state::{ActiveView, AppState},
};
use crate::config::{AppConfig, MAX_PAGE_SIZE};
use crate::dataset::Demo;
use multiview::ui::theme::Theme;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version,
    about = "Browse a JSON dataset as a table, cards, a list, a kanban board or a gallery"
)]
struct Cli {
    /// JSON file holding an array of objects.
    data: Option<PathBuf>,

    /// JSON file with column definitions (keys, labels, per-view roles).
    #[arg(long)]
    columns: Option<PathBuf>,

    /// Built-in dataset to show instead of a file.
    #[arg(long, value_enum, conflicts_with = "data")]
    demo: Option<Demo>,

    /// View to start in.
    #[arg(long)]
    view: Option<ViewMode>,

    /// Comma-separated views offered by the switcher.
    #[arg(long, value_delimiter = ',')]
    views: Option<Vec<ViewMode>>,

    /// Rows per page.
    #[arg(long)]
    page_size: Option<usize>,

    /// Only show rows whose COLUMN contains VALUE (repeatable).
    #[arg(long = "filter", value_name = "COLUMN=VALUE", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Disable the search line.
    #[arg(long)]
    no_search: bool,

    /// Disable sorting.
    #[arg(long)]
    no_sort: bool,

    /// Write logs here instead of stderr (filter with RUST_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((col, value)) if !col.trim().is_empty() => {
            Ok((col.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected COLUMN=VALUE, got `{s}`")),
    }
}

// ───────────────────────────────────────── setup ─────────────

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        // Never pollute stdout.
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

/// Records, columns and a frame title for whatever the CLI points at.
fn load_dataset(cli: &Cli) -> Result<(Vec<JsonRecord>, Vec<ColumnDef<JsonRecord>>, String)> {
    let (records, mut columns, title) = match &cli.data {
        Some(path) => {
            let records = dataset::load_records(path)?;
            let columns = match &cli.columns {
                Some(spec) => dataset::load_columns(spec)?,
                None => dataset::infer_columns(&records),
            };
            let title = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            (records, columns, title)
        }
        None => {
            let demo = cli.demo.unwrap_or(Demo::Users);
            let (records, columns) = demo.dataset();
            let columns = match &cli.columns {
                Some(spec) => dataset::load_columns(spec)?,
                None => columns,
            };
            (records, columns, format!("{demo:?} demo").to_lowercase())
        }
    };

    // Columns named on the command line become filterable.
    for (key, _) in &cli.filters {
        match columns.iter_mut().find(|c| &c.key == key) {
            Some(column) => column.filterable = true,
            None => bail!("--filter: unknown column `{key}`"),
        }
    }
    Ok((records, columns, title))
}

fn build_view(cli: &Cli, config: &AppConfig) -> Result<(DataView<JsonRecord>, String)> {
    let (records, columns, title) = load_dataset(cli)?;
    let page_size = cli.page_size.unwrap_or(config.page_size).min(MAX_PAGE_SIZE);

    let options = DataViewOptions::new(records, columns)
        .default_view(cli.view.unwrap_or(config.default_view))
        .views(cli.views.clone().unwrap_or_else(|| config.views.clone()))
        .enable_sorting(config.enable_sorting && !cli.no_sort)
        .enable_filtering(!cli.filters.is_empty())
        .enable_global_filter(config.enable_global_filter && !cli.no_search)
        .page_size(page_size);
    let mut view = DataView::new(options).context("invalid view options")?;

    for (key, value) in &cli.filters {
        view.set_column_filter(key, value);
    }
    Ok((view, title))
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());

    frame.render_widget(
        state.view.view_switcher().show_labels(state.config.show_labels),
        layout.switcher_area,
    );
    frame.render_widget(filter_line(state), layout.filter_area);
    frame.render_widget(
        state
            .view
            .view_renderer()
            .block(view_block(&state.title))
            .selected(state.selected),
        layout.view_area,
    );

    // ── status bar ─────────────────────────────────────────────
    let hint = state.config.status_bar_hint();
    let left = state.status_message.as_deref().unwrap_or(&hint);
    frame.render_widget(
        Paragraph::new(format!(" {left}")).style(Theme::status_bar_style()),
        layout.status_area,
    );
    let pagination = format!(
        "Page {} of {} · {} rows · {}/page ",
        state.view.page_index() + 1,
        state.view.page_count(),
        state.view.total_rows(),
        state.view.page_size(),
    );
    frame.render_widget(
        Paragraph::new(pagination)
            .alignment(Alignment::Right)
            .style(Theme::status_bar_style()),
        layout.status_area,
    );

    // ── overlays ───────────────────────────────────────────────
    match state.active_view {
        ActiveView::Settings => frame.render_widget(popup::SettingsPopup { state }, frame.area()),
        ActiveView::Help => frame.render_widget(
            popup::HelpPopup {
                config: &state.config,
            },
            frame.area(),
        ),
        ActiveView::Detail => {
            let rows = state.view.rows();
            if let Some(&row) = state.selected.and_then(|i| rows.get(i)) {
                let columns = state.view.columns();
                let title = CardLayout::resolve(columns)
                    .primary
                    .map(|c| row.text(&c.key))
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| format!("Record {}", row.id + 1));
                frame.render_widget(popup::DetailPopup { title, row, columns }, frame.area());
            }
        }
        ActiveView::Browse | ActiveView::Filter => {}
    }
}

/// Search input plus any active column filters.
fn filter_line(state: &AppState) -> Paragraph<'static> {
    let mut spans = Vec::new();
    let query = state.view.global_filter();
    if state.active_view == ActiveView::Filter {
        spans.push(Span::styled(format!(" / {query}▏"), Theme::command_input_style()));
    } else if !query.is_empty() {
        spans.push(Span::styled(format!(" / {query}"), Theme::command_input_style()));
        spans.push(Span::styled("  (Esc clears)", Theme::placeholder_style()));
    } else if state.view.features().enable_global_filter {
        spans.push(Span::styled(" / to search", Theme::placeholder_style()));
    }
    for filter in state.view.column_filters() {
        spans.push(Span::styled(
            format!("  {}={}", state.column_label(&filter.id), filter.value),
            Theme::badge_style(),
        ));
    }
    Paragraph::new(Line::from(spans))
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = AppConfig::load();
    let (view, title) = build_view(&cli, &config)?;
    tracing::info!(
        rows = view.data().len(),
        mode = %view.view_mode(),
        "starting"
    );
    let state = AppState::new(view, config, title);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stderr(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stderr()))?;

    let result = run(&mut terminal, state).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(terminal: &mut Terminal<CrosstermBackend<Stderr>>, mut state: AppState) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(250));

    while !state.should_quit {
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            draw(frame, &state);
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
            AppEvent::Resize(_, _) | AppEvent::Tick => {}
        }
    }
    Ok(())
}
