use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use karteikarten_lib::cards::{CardFace, PROMOTION_STREAK};

use super::app_state::TuiState;
use super::ui::CARD_BACKGROUND;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let Some(session) = state.session.as_ref() else {
        return;
    };
    let Some(card) = session.current_card() else {
        return;
    };

    let deck_name = session
        .files()
        .source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let face = session.face();
    let (border_color, text_color) = match face {
        CardFace::Front => (Color::Cyan, Color::Black),
        CardFace::Back => (Color::Magenta, Color::Rgb(40, 40, 120)),
    };

    let block = Block::default()
        .title(format!(" {} ", deck_name))
        .title_bottom(Line::from(format!(" {} ", face.label())).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(CARD_BACKGROUND));

    let inner_height = rows[0].height.saturating_sub(2);
    let mut lines = Vec::new();
    let body: Vec<&str> = card.text(face).lines().collect();
    let padding = inner_height.saturating_sub(body.len() as u16 + 2) / 2;
    for _ in 0..padding {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        face.label(),
        Style::default().fg(text_color).add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::from(""));
    for line in body {
        lines.push(Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(text_color).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, rows[0]);

    let streak = session.streak(card).unwrap_or(0);
    let progress = Paragraph::new(format!(
        " {} cards left  \u{2022}  streak {}/{}",
        session.remaining(),
        streak,
        PROMOTION_STREAK
    ))
    .style(Style::default().fg(Color::Gray));
    f.render_widget(progress, rows[1]);
}
