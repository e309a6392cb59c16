mod catalog;
mod client;
mod filter;
mod state;
mod tui;
mod view;


use anyhow::{Context, Result};

use crate::cli::{Cli, Command};

use self::catalog::strip_markup;
use self::client::CatalogClient;
use self::state::CatalogState;
use self::view::{ViewDescription, build_view};

pub fn run(cli: Cli) -> Result<()> {
    let client = CatalogClient::tvmaze();

    match cli.command {
        Some(Command::Shows { filter }) => run_shows(&client, filter.as_deref())?,
        Some(Command::Episodes { show_id, filter }) => {
            run_episodes(&client, show_id, filter.as_deref())?;
        }
        Some(Command::Tui) | None => tui::run_tui(&client)?,
    }

    Ok(())
}

fn run_shows(client: &CatalogClient, filter: Option<&str>) -> Result<()> {
    let mut state = CatalogState::new();
    state
        .load_all_shows(client)
        .context("failed to load the show list")?;
    if let Some(term) = filter {
        state.set_filter_term(term);
    }
    print_view(&build_view(&state));
    Ok(())
}

fn run_episodes(client: &CatalogClient, show_id: u64, filter: Option<&str>) -> Result<()> {
    let mut state = CatalogState::new();
    state
        .select_show(client, show_id)
        .with_context(|| format!("failed to load episodes for show {show_id}"))?;
    if let Some(term) = filter {
        state.set_filter_term(term);
    }
    print_view(&build_view(&state));
    Ok(())
}

/// Plain-text rendering target for the headless subcommands.
fn print_view(view: &ViewDescription) {
    println!("{}", view.count_line);

    if let Some(status) = &view.status {
        println!("{status}");
    } else {
        for card in &view.cards {
            println!();
            println!("{}", card.title);
            if let Some(meta) = &card.meta {
                println!("  {meta}");
            }
            if let Some(summary) = &card.summary {
                println!("  {}", strip_markup(summary).trim());
            }
            if let Some(image) = &card.image {
                println!("  {image}");
            }
            if let Some(link) = &card.link {
                println!("  {link}");
            }
        }
    }

    if let Some(attribution) = view.attribution {
        println!();
        println!("{attribution}");
    }
}
