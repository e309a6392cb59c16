use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "mazeview",
    version,
    about = "Browse TVMaze shows and episodes from the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the show list.
    Shows {
        /// Case-insensitive search over name, summary and genres.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Print the episode list for one show.
    Episodes {
        /// TVMaze show id.
        show_id: u64,
        /// Case-insensitive search over name and summary.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Interactive browser (default).
    Tui,
}
