use crate::http::{self, CONNECT_TIMEOUT, FetchError, READ_TIMEOUT};

use super::catalog::{Episode, Show, parse_episodes, parse_shows};

pub(crate) const TVMAZE_BASE_URL: &str = "https://api.tvmaze.com";

/// Read-only client for the catalog service. Each fetch is exactly one
/// round trip; the caller owns caching and there is no retry.
#[derive(Debug, Clone)]
pub(crate) struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub(crate) fn tvmaze() -> Self {
        Self::new(TVMAZE_BASE_URL)
    }

    pub(crate) fn fetch_shows(&self) -> Result<Vec<Show>, FetchError> {
        let url = format!("{}/shows", self.base_url);
        let body = http::get_text(&url, CONNECT_TIMEOUT, READ_TIMEOUT)?;
        parse_shows(&body)
    }

    pub(crate) fn fetch_episodes(&self, show_id: u64) -> Result<Vec<Episode>, FetchError> {
        let url = format!("{}/shows/{show_id}/episodes", self.base_url);
        let body = http::get_text(&url, CONNECT_TIMEOUT, READ_TIMEOUT)?;
        parse_episodes(&body)
    }
}
