use super::catalog::{Episode, Show, strip_markup};

/// Case-insensitive substring match over name, markup-stripped summary and
/// space-joined genre tags. An empty or whitespace-only term is the
/// identity: every show, original order.
pub(crate) fn filter_shows<'a>(shows: &'a [Show], term: &str) -> Vec<&'a Show> {
    let needle = term.trim().to_lowercase();
    shows
        .iter()
        .filter(|show| {
            needle.is_empty()
                || show.name.to_lowercase().contains(&needle)
                || summary_matches(show.summary.as_deref(), &needle)
                || show.genres.join(" ").to_lowercase().contains(&needle)
        })
        .collect()
}

/// Same contract as [`filter_shows`], minus the genre haystack.
pub(crate) fn filter_episodes<'a>(episodes: &'a [Episode], term: &str) -> Vec<&'a Episode> {
    let needle = term.trim().to_lowercase();
    episodes
        .iter()
        .filter(|episode| {
            needle.is_empty()
                || episode.name.to_lowercase().contains(&needle)
                || summary_matches(episode.summary.as_deref(), &needle)
        })
        .collect()
}

fn summary_matches(summary: Option<&str>, needle: &str) -> bool {
    summary.is_some_and(|raw| strip_markup(raw).to_lowercase().contains(needle))
}
