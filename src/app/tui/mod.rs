mod actions;
mod render;
mod session;

use std::collections::HashSet;
use std::io;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::ListState;

use crate::http::FetchError;

use super::catalog::{Episode, Show};
use super::client::CatalogClient;
use super::state::{CatalogState, Selection, ViewMode};
use super::view::build_view;

use self::actions::{spawn_episodes_fetch, spawn_shows_fetch, status_error, status_info};
use self::render::draw_tui;
use self::session::TuiSession;

/// Which control receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    Search,
    List,
}

impl Focus {
    fn toggled(self) -> Self {
        match self {
            Self::Search => Self::List,
            Self::List => Self::Search,
        }
    }
}

/// Completion message from a background fetch thread. The event loop is the
/// only writer of the cache; threads just report what they got.
#[derive(Debug)]
pub(super) enum FetchOutcome {
    Shows(Result<Vec<Show>, FetchError>),
    Episodes {
        show_id: u64,
        result: Result<Vec<Episode>, FetchError>,
    },
}

pub(crate) fn run_tui(client: &CatalogClient) -> Result<()> {
    let mut session = TuiSession::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("failed to initialize terminal backend")?;
    terminal.clear()?;

    let mut state = CatalogState::new();
    let mut list_state = ListState::default();
    let mut focus = Focus::List;
    let (fetch_tx, fetch_rx) = mpsc::channel::<FetchOutcome>();

    // Issued-but-unanswered episode fetches; the guard against firing a
    // duplicate request for a key whose first fetch is still in flight.
    let mut in_flight: HashSet<u64> = HashSet::new();
    // The show the user most recently asked for. A fetch result that no
    // longer matches is cached but not rendered.
    let mut pending_show: Option<u64> = None;
    let mut shows_loading = true;

    spawn_shows_fetch(client, &fetch_tx);
    let mut status = status_info("Loading shows from TVMaze...");

    loop {
        while let Ok(outcome) = fetch_rx.try_recv() {
            match outcome {
                FetchOutcome::Shows(Ok(shows)) => {
                    shows_loading = false;
                    state.install_shows(shows);
                    list_state.select((!state.shows().is_empty()).then_some(0));
                    status = status_info("Ready. Type to search, Enter to open a show.");
                }
                FetchOutcome::Shows(Err(err)) => {
                    shows_loading = false;
                    status = status_error(&format!(
                        "Failed to load shows: {err}. Press r to try again."
                    ));
                }
                FetchOutcome::Episodes { show_id, result } => {
                    in_flight.remove(&show_id);
                    match result {
                        Ok(episodes) => {
                            state.cache_mut().store_episodes(show_id, episodes);
                            if pending_show == Some(show_id) {
                                pending_show = None;
                                state.enter_cached_show(show_id);
                                list_state.select(Some(0));
                                status = status_info(
                                    "Episodes loaded. Esc goes back to the show list.",
                                );
                            }
                            // A stale response stays cached for the next visit.
                        }
                        Err(err) => {
                            if pending_show == Some(show_id) {
                                pending_show = None;
                            }
                            status = status_error(&format!(
                                "Failed to load episodes for show {show_id}: {err}"
                            ));
                        }
                    }
                }
            }
        }

        let view = build_view(&state);
        let loading = shows_loading || pending_show.is_some();
        terminal.draw(|frame| {
            draw_tui(frame, &state, &view, &mut list_state, focus, &status, loading)
        })?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.code == KeyCode::Tab {
            focus = focus.toggled();
            continue;
        }

        match focus {
            Focus::Search => match key.code {
                KeyCode::Char(ch) => {
                    let mut term = state.filter_term().to_string();
                    term.push(ch);
                    state.set_filter_term(term);
                    list_state.select(jump_list_home(&state));
                }
                KeyCode::Backspace => {
                    let mut term = state.filter_term().to_string();
                    term.pop();
                    state.set_filter_term(term);
                    list_state.select(jump_list_home(&state));
                }
                KeyCode::Enter | KeyCode::Esc => focus = Focus::List,
                _ => {}
            },
            Focus::List => match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Char('r') => {
                    if !shows_loading && !state.cache().has_shows() {
                        shows_loading = true;
                        spawn_shows_fetch(client, &fetch_tx);
                        status = status_info("Loading shows from TVMaze...");
                    }
                }
                KeyCode::Up => {
                    if let Some(selected) = list_state.selected() {
                        list_state.select(Some(selected.saturating_sub(1)));
                    }
                }
                KeyCode::Down => {
                    if let Some(selected) = list_state.selected() {
                        let last = jump_list_len(&state).saturating_sub(1);
                        list_state.select(Some((selected + 1).min(last)));
                    }
                }
                KeyCode::Enter => match state.mode() {
                    ViewMode::Shows => {
                        let Some(show_id) = highlighted_show(&state, &list_state) else {
                            continue;
                        };
                        if state.enter_cached_show(show_id) {
                            pending_show = None;
                            list_state.select(Some(0));
                            status = status_info(
                                "Episodes loaded from cache. Esc goes back to the show list.",
                            );
                        } else {
                            pending_show = Some(show_id);
                            if in_flight.insert(show_id) {
                                spawn_episodes_fetch(client, show_id, &fetch_tx);
                            }
                            status = status_info("Loading episodes...");
                        }
                    }
                    ViewMode::Episodes => {
                        let selection = match list_state.selected() {
                            Some(0) | None => Selection::All,
                            Some(index) => match state.episodes().get(index - 1) {
                                Some(episode) => Selection::One(episode.id),
                                None => Selection::All,
                            },
                        };
                        state.set_selection(selection);
                        status = match selection {
                            Selection::All => status_info("Showing all episodes."),
                            Selection::One(_) => status_info("Jumped to one episode."),
                        };
                    }
                },
                KeyCode::Esc => match state.mode() {
                    ViewMode::Episodes => {
                        let came_from = state.active_show();
                        state.exit_to_shows();
                        pending_show = None;
                        list_state.select(show_position(&state, came_from));
                        status = status_info("Back to the show list.");
                    }
                    ViewMode::Shows => break,
                },
                _ => {}
            },
        }
    }

    terminal.show_cursor()?;
    session.leave()?;
    Ok(())
}

/// Number of entries in the jump list: every show, or the "all episodes"
/// sentinel plus every episode.
fn jump_list_len(state: &CatalogState) -> usize {
    match state.mode() {
        ViewMode::Shows => state.shows().len(),
        ViewMode::Episodes => state.episodes().len() + 1,
    }
}

fn jump_list_home(state: &CatalogState) -> Option<usize> {
    (jump_list_len(state) > 0).then_some(0)
}

fn highlighted_show(state: &CatalogState, list_state: &ListState) -> Option<u64> {
    let index = list_state.selected()?;
    state.shows().get(index).map(|show| show.id)
}

fn show_position(state: &CatalogState, show_id: Option<u64>) -> Option<usize> {
    if let Some(id) = show_id
        && let Some(index) = state.shows().iter().position(|show| show.id == id)
    {
        return Some(index);
    }
    (!state.shows().is_empty()).then_some(0)
}
