use std::sync::mpsc;

use super::super::client::CatalogClient;
use super::FetchOutcome;

pub(super) fn status_info(msg: &str) -> String {
    format!("INFO: {msg}")
}

pub(super) fn status_error(msg: &str) -> String {
    format!("ERROR: {msg}")
}

/// One thread per issued request; the result comes back over the channel and
/// only the event loop touches the cache. Send failures mean the loop is
/// gone, so they are ignored.
pub(super) fn spawn_shows_fetch(client: &CatalogClient, tx: &mpsc::Sender<FetchOutcome>) {
    let client = client.clone();
    let tx = tx.clone();
    std::thread::spawn(move || {
        let _ = tx.send(FetchOutcome::Shows(client.fetch_shows()));
    });
}

pub(super) fn spawn_episodes_fetch(
    client: &CatalogClient,
    show_id: u64,
    tx: &mpsc::Sender<FetchOutcome>,
) {
    let client = client.clone();
    let tx = tx.clone();
    std::thread::spawn(move || {
        let _ = tx.send(FetchOutcome::Episodes {
            show_id,
            result: client.fetch_episodes(show_id),
        });
    });
}
