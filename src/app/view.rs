use super::catalog::{Episode, Show, format_episode_code};
use super::filter::{filter_episodes, filter_shows};
use super::state::{CatalogState, Selection, ViewMode};

pub(crate) const TVMAZE_ATTRIBUTION: &str = "Data provided by TVMaze.com";

/// One card in the rendered list. `summary` carries the upstream's raw
/// markup; each rendering target decides how to display it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ViewCard {
    pub(crate) title: String,
    pub(crate) meta: Option<String>,
    pub(crate) summary: Option<String>,
    pub(crate) image: Option<String>,
    pub(crate) link: Option<String>,
}

/// Everything a rendering target needs to display: the cards, the
/// `Showing X / Y` count line, an optional status message that replaces the
/// card list, and the attribution line carried by episode views.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ViewDescription {
    pub(crate) cards: Vec<ViewCard>,
    pub(crate) count_line: String,
    pub(crate) status: Option<String>,
    pub(crate) attribution: Option<&'static str>,
}

/// Deterministic projection from the current catalog state to a
/// [`ViewDescription`]. An explicit selection overrides the filter term; a
/// selection that matches nothing is reported as a status message, never as
/// an error. An empty filtered result is a valid zero-card view.
pub(crate) fn build_view(state: &CatalogState) -> ViewDescription {
    match state.mode() {
        ViewMode::Shows => build_show_view(state.shows(), state.filter_term(), state.selection()),
        ViewMode::Episodes => {
            build_episode_view(state.episodes(), state.filter_term(), state.selection())
        }
    }
}

fn build_show_view(shows: &[Show], term: &str, selection: Selection) -> ViewDescription {
    let total = shows.len();
    if let Selection::One(id) = selection {
        return match shows.iter().find(|show| show.id == id) {
            Some(show) => ViewDescription {
                cards: vec![show_card(show)],
                count_line: count_line(1, total, "shows"),
                status: None,
                attribution: None,
            },
            None => not_found_view(total, "shows"),
        };
    }

    let visible = filter_shows(shows, term);
    ViewDescription {
        count_line: count_line(visible.len(), total, "shows"),
        cards: visible.into_iter().map(show_card).collect(),
        status: None,
        attribution: None,
    }
}

fn build_episode_view(episodes: &[Episode], term: &str, selection: Selection) -> ViewDescription {
    let total = episodes.len();
    if let Selection::One(id) = selection {
        return match episodes.iter().find(|episode| episode.id == id) {
            Some(episode) => ViewDescription {
                cards: vec![episode_card(episode)],
                count_line: count_line(1, total, "episodes"),
                status: None,
                attribution: Some(TVMAZE_ATTRIBUTION),
            },
            None => not_found_view(total, "episodes"),
        };
    }

    let visible = filter_episodes(episodes, term);
    ViewDescription {
        count_line: count_line(visible.len(), total, "episodes"),
        cards: visible.into_iter().map(episode_card).collect(),
        status: None,
        attribution: Some(TVMAZE_ATTRIBUTION),
    }
}

fn not_found_view(total: usize, noun: &str) -> ViewDescription {
    ViewDescription {
        cards: Vec::new(),
        count_line: count_line(0, total, noun),
        status: Some("No entry matches the current selection.".to_string()),
        attribution: None,
    }
}

fn count_line(shown: usize, total: usize, noun: &str) -> String {
    format!("Showing {shown} / {total} {noun}")
}

fn show_card(show: &Show) -> ViewCard {
    let rating = show
        .rating
        .map(|value| format!("{value:.1}"))
        .unwrap_or_else(|| "N/A".to_string());
    let runtime = show
        .runtime
        .map(|minutes| format!("{minutes} min"))
        .unwrap_or_else(|| "N/A".to_string());
    let mut meta = format!(
        "Status: {} | Rating: {rating} | Runtime: {runtime}",
        show.status.as_deref().unwrap_or("N/A")
    );
    if !show.genres.is_empty() {
        meta.push_str(&format!(" | Genres: {}", show.genres.join(", ")));
    }

    ViewCard {
        title: show.name.clone(),
        meta: Some(meta),
        summary: show.summary.clone(),
        image: show.image.clone(),
        link: show.url.clone(),
    }
}

fn episode_card(episode: &Episode) -> ViewCard {
    let code = format_episode_code(episode.season, episode.number);
    ViewCard {
        title: format!("{} - {code}", episode.name),
        meta: Some(format!(
            "Season {}, Episode {}",
            episode.season, episode.number
        )),
        summary: episode.summary.clone(),
        image: episode.image.clone(),
        link: episode.url.clone(),
    }
}
