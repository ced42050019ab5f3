use anyhow::Result;

use karteikarten_lib::cards::DeckFiles;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, deck: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let path = app.resolve_deck(deck);
    let files = DeckFiles::for_source(&path);
    let stats = app.deck_stats(&path)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": files.source.to_string_lossy(),
                "notLearnedFile": files.not_learned.to_string_lossy(),
                "learnedFile": files.learned.to_string_lossy(),
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::paint(&files.source.display().to_string(), Color::BOLD, use_color));
            println!("  Cards:       {}", stats.total_cards);
            println!(
                "  Not learned: {}",
                terminal::paint(&stats.not_learned_entries.to_string(), Color::RED, use_color)
            );
            println!(
                "  Learned:     {}",
                terminal::paint(&stats.learned_cards.to_string(), Color::GREEN, use_color)
            );
        }
    }

    Ok(())
}
