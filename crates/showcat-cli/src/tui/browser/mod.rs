//! Catalog browser TUI main loop.

/// Browser state types.
pub mod state;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::FuturesUnordered;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use showcat_api::tvmaze::{Catalog, LocalTvMazeApi};
use showcat_catalog::{DetailTicket, RatingFloor, load_details};
use tokio::sync::mpsc;

use self::state::{BrowserState, InputMode};
use super::TerminalGuard;

/// How long one frame waits for detail fetches before redrawing.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// TVmaze web page used when a show carries no URL of its own.
const TVMAZE_SHOW_URL: &str = "https://www.tvmaze.com/shows";

/// What the main loop should do after a key press.
enum Action {
    /// Keep going.
    None,
    /// Start fetching details for a new selection.
    LoadDetails(DetailTicket),
    /// Leave the browser.
    Quit,
}

/// Runs the catalog browser TUI.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
#[allow(clippy::module_name_repetitions)]
pub async fn run_browser(
    api: &(impl LocalTvMazeApi + Sync),
    catalog: Catalog,
    genres: Vec<String>,
    ratings: Vec<RatingFloor>,
) -> Result<()> {
    let mut state = BrowserState::new(catalog, genres, ratings);

    let guard = TerminalGuard::acquire();
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, api).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    drop(guard);

    result
}

/// Main event loop.
///
/// Detail loads run as futures owned by this loop; each frame drives them
/// for up to `FRAME_INTERVAL`, then drains their updates into the state.
async fn run_event_loop<'a, A: LocalTvMazeApi + Sync>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    api: &'a A,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut loads: FuturesUnordered<LocalBoxFuture<'a, ()>> = FuturesUnordered::new();

    loop {
        while let Ok(update) = rx.try_recv() {
            state.apply_detail(update);
        }

        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            let Event::Key(key) = event::read().context("failed to read event")? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match handle_key(state, key) {
                Action::None => {}
                Action::Quit => return Ok(()),
                Action::LoadDetails(ticket) => {
                    let tx = tx.clone();
                    loads.push(async move { load_details(api, ticket, &tx).await }.boxed_local());
                }
            }
        }

        tokio::select! {
            Some(()) = loads.next(), if !loads.is_empty() => {}
            () = tokio::time::sleep(FRAME_INTERVAL) => {}
        }
    }
}

/// Dispatches a key press by input mode.
fn handle_key(state: &mut BrowserState, key: KeyEvent) -> Action {
    match state.input_mode {
        InputMode::Search => {
            handle_search_input(state, key.code);
            Action::None
        }
        InputMode::Normal => handle_normal_input(state, key.code, key.modifiers),
    }
}

/// Handles key input in search mode.
fn handle_search_input(state: &mut BrowserState, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            state.search_clear();
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.search_pop();
        }
        KeyCode::Char(c) => {
            state.search_push(c);
        }
        _ => {}
    }
}

/// Handles key input in normal mode.
fn handle_normal_input(state: &mut BrowserState, key: KeyCode, modifiers: KeyModifiers) -> Action {
    match key {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Left | KeyCode::PageUp => state.prev_page(),
        KeyCode::Right | KeyCode::PageDown => state.next_page(),
        KeyCode::Home => state.first_page(),
        KeyCode::End => state.last_page(),
        KeyCode::Char('/') => state.input_mode = InputMode::Search,
        KeyCode::Char('g') => state.cycle_genre(),
        KeyCode::Char('r') => state.cycle_rating(),
        KeyCode::Enter => {
            if let Some(ticket) = state.open_details() {
                return Action::LoadDetails(ticket);
            }
        }
        KeyCode::Esc => state.close_details(),
        KeyCode::Char('o') => open_show_url(state),
        _ => {}
    }
    Action::None
}

/// Opens the TVmaze page of the show under the cursor.
fn open_show_url(state: &BrowserState) {
    let Some(show) = state.current_show() else {
        return;
    };
    let url = show
        .url
        .clone()
        .unwrap_or_else(|| format!("{TVMAZE_SHOW_URL}/{}", show.id));
    if let Err(err) = open::that(&url) {
        tracing::debug!(%url, "failed to open browser: {err}");
    }
}
