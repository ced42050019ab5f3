use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let picker = &state.picker;
    let filter = if picker.show_all { "All files" } else { "CSV files" };

    let block = Block::default()
        .title(format!(" Select study file: {} ({}) ", picker.dir.display(), filter))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = picker.entries.iter().map(|entry| {
        if entry.is_dir {
            ListItem::new(format!("\u{25b8} {}/", entry.name))
                .style(Style::default().fg(Color::Blue))
        } else {
            ListItem::new(format!("\u{2022} {}", entry.name))
                .style(Style::default().fg(Color::White))
        }
    }).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(picker.selected));

    f.render_stateful_widget(list, area, &mut list_state);
}
