use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, deck: &str, front: &str, back: &str, format: &OutputFormat) -> Result<()> {
    let path = app.add_card(deck, front, back)?;
    let total = app.list_cards(&path)?.len();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": path.to_string_lossy(),
                "front": front.trim(),
                "back": back.trim(),
                "totalCards": total,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Added card to \"{}\" ({} cards)", path.display(), total);
        }
    }

    Ok(())
}
