use std::collections::HashMap;

use crate::http::FetchError;

use super::catalog::{Episode, Show, sort_shows_by_name};
use super::client::CatalogClient;

/// Which data set and controls are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViewMode {
    Shows,
    Episodes,
}

/// Jump-list state: either the "all entries" sentinel or one specific entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Selection {
    All,
    One(u64),
}

/// Session-scoped memo of everything fetched so far. Entries are written at
/// most once per key and never evicted; owned by the event-loop thread.
#[derive(Debug, Default)]
pub(crate) struct Cache {
    shows: Option<Vec<Show>>,
    episodes_by_show: HashMap<u64, Vec<Episode>>,
}

impl Cache {
    pub(crate) fn get_or_load_shows<F>(&mut self, loader: F) -> Result<&[Show], FetchError>
    where
        F: FnOnce() -> Result<Vec<Show>, FetchError>,
    {
        if self.shows.is_none() {
            self.shows = Some(loader()?);
        }
        Ok(self.shows.as_deref().unwrap_or_default())
    }

    pub(crate) fn get_or_load_episodes<F>(
        &mut self,
        show_id: u64,
        loader: F,
    ) -> Result<&[Episode], FetchError>
    where
        F: FnOnce() -> Result<Vec<Episode>, FetchError>,
    {
        if !self.episodes_by_show.contains_key(&show_id) {
            let episodes = loader()?;
            self.episodes_by_show.insert(show_id, episodes);
        }
        Ok(self
            .episodes_by_show
            .get(&show_id)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    pub(crate) fn has_shows(&self) -> bool {
        self.shows.is_some()
    }

    pub(crate) fn shows(&self) -> Option<&[Show]> {
        self.shows.as_deref()
    }

    pub(crate) fn episodes(&self, show_id: u64) -> Option<&[Episode]> {
        self.episodes_by_show.get(&show_id).map(Vec::as_slice)
    }

    /// Write-once: a second store for the same key keeps the first value.
    pub(crate) fn store_shows(&mut self, shows: Vec<Show>) {
        if self.shows.is_none() {
            self.shows = Some(shows);
        }
    }

    /// Write-once: a second store for the same key keeps the first value.
    pub(crate) fn store_episodes(&mut self, show_id: u64, episodes: Vec<Episode>) {
        self.episodes_by_show.entry(show_id).or_insert(episodes);
    }
}

/// The one mutable view state: active data sets, mode, filter term and
/// selection, plus the cache behind them. All catalog operations reset the
/// filter term and selection together so a stale filter can never survive a
/// mode transition.
#[derive(Debug)]
pub(crate) struct CatalogState {
    cache: Cache,
    shows: Vec<Show>,
    episodes: Vec<Episode>,
    active_show: Option<u64>,
    mode: ViewMode,
    filter_term: String,
    selection: Selection,
}

impl CatalogState {
    pub(crate) fn new() -> Self {
        Self {
            cache: Cache::default(),
            shows: Vec::new(),
            episodes: Vec::new(),
            active_show: None,
            mode: ViewMode::Shows,
            filter_term: String::new(),
            selection: Selection::All,
        }
    }

    /// Fetch-or-cache the full show collection, sorted by name, and make it
    /// the active data set.
    pub(crate) fn load_all_shows(&mut self, client: &CatalogClient) -> Result<(), FetchError> {
        let shows = self.cache.get_or_load_shows(|| {
            let mut shows = client.fetch_shows()?;
            sort_shows_by_name(&mut shows);
            Ok(shows)
        })?;
        self.shows = shows.to_vec();
        self.mode = ViewMode::Shows;
        self.active_show = None;
        self.reset_controls();
        Ok(())
    }

    /// Fetch-or-cache one show's episodes and switch to the episode view.
    pub(crate) fn select_show(
        &mut self,
        client: &CatalogClient,
        show_id: u64,
    ) -> Result<(), FetchError> {
        let episodes = self
            .cache
            .get_or_load_episodes(show_id, || client.fetch_episodes(show_id))?;
        self.episodes = episodes.to_vec();
        self.mode = ViewMode::Episodes;
        self.active_show = Some(show_id);
        self.reset_controls();
        Ok(())
    }

    /// Accept a show collection fetched off-thread: sorted, cached
    /// write-once, and made the active data set when the show list is the
    /// current view.
    pub(crate) fn install_shows(&mut self, mut shows: Vec<Show>) {
        sort_shows_by_name(&mut shows);
        self.cache.store_shows(shows);
        if self.mode == ViewMode::Shows {
            self.shows = self.cache.shows().unwrap_or_default().to_vec();
            self.reset_controls();
        }
    }

    /// Switch to the episode view for a show already in the cache. Returns
    /// false (and changes nothing) on a cache miss.
    pub(crate) fn enter_cached_show(&mut self, show_id: u64) -> bool {
        let Some(episodes) = self.cache.episodes(show_id) else {
            return false;
        };
        self.episodes = episodes.to_vec();
        self.mode = ViewMode::Episodes;
        self.active_show = Some(show_id);
        self.reset_controls();
        true
    }

    /// Back navigation: show list becomes the active data set again.
    pub(crate) fn exit_to_shows(&mut self) {
        self.mode = ViewMode::Shows;
        self.active_show = None;
        self.episodes.clear();
        self.reset_controls();
    }

    /// Typing in the search box forces the jump list back to "all".
    pub(crate) fn set_filter_term(&mut self, term: impl Into<String>) {
        self.filter_term = term.into();
        self.selection = Selection::All;
    }

    /// Choosing a jump-list entry clears the search term.
    pub(crate) fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.filter_term.clear();
    }

    fn reset_controls(&mut self) {
        self.filter_term.clear();
        self.selection = Selection::All;
    }

    pub(crate) fn mode(&self) -> ViewMode {
        self.mode
    }

    pub(crate) fn shows(&self) -> &[Show] {
        &self.shows
    }

    pub(crate) fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub(crate) fn active_show(&self) -> Option<u64> {
        self.active_show
    }

    pub(crate) fn filter_term(&self) -> &str {
        &self.filter_term
    }

    pub(crate) fn selection(&self) -> Selection {
        self.selection
    }

    pub(crate) fn cache(&self) -> &Cache {
        &self.cache
    }

    pub(crate) fn cache_mut(&mut self) -> &mut Cache {
        &mut self.cache
    }
}
