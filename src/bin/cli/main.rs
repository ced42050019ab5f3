mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "karteikarten", about = "Flashcards backed by CSV files", version)]
struct Cli {
    /// Config file (default: <config dir>/karteikarten/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for deck files, overrides the config
    #[arg(long, global = true)]
    deck_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Append a card to a deck (".csv" is added if missing)
    Add {
        /// Deck name or path
        deck: String,
        /// Front side text
        front: String,
        /// Back side text
        back: String,
    },

    /// List the cards in a deck
    List {
        /// Deck name or path
        deck: String,
    },

    /// Show how many cards are in a deck and its learned / not-learned files
    Stats {
        /// Deck name or path
        deck: String,
    },

    /// Review a deck in the TUI
    #[cfg(feature = "tui")]
    Review {
        /// Deck name or path
        deck: String,
    },

    /// Launch interactive TUI
    #[cfg(feature = "tui")]
    Tui,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.config.as_deref(), cli.deck_dir)?;

    match cli.command {
        None => {
            // No subcommand → launch TUI
            #[cfg(feature = "tui")]
            {
                tui::run(app, None)?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
        Some(Command::Add { deck, front, back }) => {
            commands::add::run(&app, &deck, &front, &back, &cli.format)?;
        }
        Some(Command::List { deck }) => {
            commands::list::run(&app, &deck, &cli.format, use_color)?;
        }
        Some(Command::Stats { deck }) => {
            commands::stats::run(&app, &deck, &cli.format, use_color)?;
        }
        #[cfg(feature = "tui")]
        Some(Command::Review { deck }) => {
            let path = app.resolve_deck(&deck);
            tui::run(app, Some(path))?;
        }
        #[cfg(feature = "tui")]
        Some(Command::Tui) => {
            tui::run(app, None)?;
        }
    }

    Ok(())
}
