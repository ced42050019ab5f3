use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app_state::{Field, TuiState};
use super::ui::CARD_BACKGROUND;

pub fn draw(f: &mut Frame, area: Rect, state: &mut TuiState) {
    let block = Block::default()
        .title(" Flashcards ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    let sides = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let deck_area = centered(rows[1], 60);

    state.field_areas = vec![
        (Field::Front, sides[0]),
        (Field::Back, sides[1]),
        (Field::Deck, deck_area),
    ];

    draw_input(f, sides[0], state, Field::Front, " Front ");
    draw_input(f, sides[1], state, Field::Back, " Back ");
    draw_input(f, deck_area, state, Field::Deck, " Deck file (.csv) ");

    let actions = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::Yellow)),
            Span::raw("Add word    "),
            Span::styled("[Ctrl+O] ", Style::default().fg(Color::Yellow)),
            Span::raw("Select study file (CSV)"),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(actions, rows[2]);
}

fn draw_input(f: &mut Frame, area: Rect, state: &TuiState, field: Field, title: &str) {
    let input = state.form.input(field);
    let is_active = state.form.focus == field;

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let text_style = if input.showing_placeholder {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(Color::Black)
    };

    let mut text = input.display().to_string();
    if is_active && !input.showing_placeholder {
        text.push('\u{2588}');
    }

    let paragraph = Paragraph::new(text)
        .style(text_style.bg(CARD_BACKGROUND))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn centered(area: Rect, percent: u16) -> Rect {
    let side = (100 - percent.min(100)) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(side),
            Constraint::Percentage(percent),
            Constraint::Percentage(side),
        ])
        .split(area)[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_on_wide_terminal() {
        let area = Rect::new(0, 0, 2000, 3);
        let middle = centered(area, 50);
        assert_eq!(middle.width, 1000);
        assert_eq!(middle.x, 500);
        assert_eq!(middle.height, 3);
    }
}
