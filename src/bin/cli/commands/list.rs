use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, deck: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let path = app.resolve_deck(deck);
    let cards = app.list_cards(&path)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No cards in {}.", path.display());
                return Ok(());
            }

            println!("{}", terminal::render_card_table(&cards, use_color));
            println!("\n{} cards total", cards.len());
        }
    }

    Ok(())
}
