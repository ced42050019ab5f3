use karteikarten_lib::cards::Card;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in an ANSI style when colors are enabled
pub fn paint(text: &str, style: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", style, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render cards as a two-column table, one card per line.
///
/// Embedded newlines are shown as `⏎` so every card stays on one row.
pub fn render_card_table(cards: &[Card], use_color: bool) -> String {
    let fronts: Vec<String> = cards.iter().map(|c| single_line(&c.front)).collect();
    let backs: Vec<String> = cards.iter().map(|c| single_line(&c.back)).collect();

    let width = fronts
        .iter()
        .map(|f| f.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut lines = Vec::with_capacity(cards.len() + 2);
    let header = format!("{:<width$}  Back", "Front", width = width);
    lines.push(paint(&header, Color::BOLD, use_color));
    lines.push(format!("{}  {}", "\u{2500}".repeat(width), "\u{2500}".repeat(4)));

    for (front, back) in fronts.iter().zip(&backs) {
        let pad = width - front.chars().count();
        lines.push(format!("{}{}  {}", front, " ".repeat(pad), paint(back, Color::CYAN, use_color)));
    }

    lines.join("\n")
}

fn single_line(text: &str) -> String {
    text.replace("\r\n", "\u{23ce}").replace('\n', "\u{23ce}")
}
