use serde_json::Value;

use crate::http::FetchError;

/// A series entry from the catalog. Immutable once fetched; `summary` keeps
/// the upstream's raw markup, stripping happens only for search and display.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Show {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) summary: Option<String>,
    pub(crate) genres: Vec<String>,
    pub(crate) status: Option<String>,
    pub(crate) rating: Option<f64>,
    pub(crate) runtime: Option<u32>,
    pub(crate) image: Option<String>,
    pub(crate) url: Option<String>,
}

/// A single installment of a show.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Episode {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) season: u32,
    pub(crate) number: u32,
    pub(crate) summary: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) image: Option<String>,
}

/// `SxxExx` display label. Padding is a minimum width, so season or episode
/// numbers of 100 and above keep all their digits.
pub(crate) fn format_episode_code(season: u32, number: u32) -> String {
    format!("S{season:02}E{number:02}")
}

pub(crate) fn parse_shows(raw: &str) -> Result<Vec<Show>, FetchError> {
    let parsed: Value =
        serde_json::from_str(raw).map_err(|err| FetchError::Decode(err.to_string()))?;
    let Some(records) = parsed.as_array() else {
        return Err(FetchError::Decode("expected a JSON array of shows".to_string()));
    };

    Ok(records.iter().filter_map(parse_show_record).collect())
}

pub(crate) fn parse_episodes(raw: &str) -> Result<Vec<Episode>, FetchError> {
    let parsed: Value =
        serde_json::from_str(raw).map_err(|err| FetchError::Decode(err.to_string()))?;
    let Some(records) = parsed.as_array() else {
        return Err(FetchError::Decode(
            "expected a JSON array of episodes".to_string(),
        ));
    };

    Ok(records.iter().filter_map(parse_episode_record).collect())
}

// Records missing identity fields are skipped, not fatal: the upstream has
// shipped partial records before and one bad row should not blank the page.
fn parse_show_record(record: &Value) -> Option<Show> {
    let id = record.get("id")?.as_u64()?;
    let name = non_empty_str(record.get("name")?)?;

    let genres = record
        .get("genres")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(|tag| tag.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let runtime = record
        .get("runtime")
        .and_then(Value::as_u64)
        .or_else(|| record.get("averageRuntime").and_then(Value::as_u64))
        .map(|minutes| minutes as u32);

    Some(Show {
        id,
        name,
        summary: record.get("summary").and_then(non_empty_str),
        genres,
        status: record.get("status").and_then(non_empty_str),
        rating: record.pointer("/rating/average").and_then(Value::as_f64),
        runtime,
        image: record.pointer("/image/medium").and_then(non_empty_str),
        url: record.get("url").and_then(non_empty_str),
    })
}

fn parse_episode_record(record: &Value) -> Option<Episode> {
    let id = record.get("id")?.as_u64()?;
    let name = non_empty_str(record.get("name")?)?;
    let season = record.get("season")?.as_u64()? as u32;
    let number = record.get("number")?.as_u64()? as u32;

    Some(Episode {
        id,
        name,
        season,
        number,
        summary: record.get("summary").and_then(non_empty_str),
        url: record.get("url").and_then(non_empty_str),
        image: record.pointer("/image/medium").and_then(non_empty_str),
    })
}

fn non_empty_str(value: &Value) -> Option<String> {
    let text = value.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Remove `<...>` tag spans. Search relevance only; callers keep the raw
/// markup around for anything user-facing that can render it.
pub(crate) fn strip_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for ch in raw.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Case-insensitive sort by display name. `sort_by` is stable, so shows with
/// names that compare equal keep their original fetch order.
pub(crate) fn sort_shows_by_name(shows: &mut [Show]) {
    shows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    let mut out = s.to_string();
    if out.chars().count() > max {
        out = out.chars().take(max.saturating_sub(3)).collect::<String>() + "...";
    }
    out
}
