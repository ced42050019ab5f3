use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::app_state::{Notice, NoticeKind};

pub fn draw(f: &mut Frame, area: Rect, notice: &Notice) {
    let width = area.width.saturating_sub(4).min(60);
    let height = 7.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    // Clear the area behind the popup
    f.render_widget(Clear, popup);

    let color = match notice.kind {
        NoticeKind::Info => Color::Green,
        NoticeKind::Error => Color::Red,
    };

    let block = Block::default()
        .title(format!(" {} ", notice.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

    let text = vec![
        Line::from(""),
        Line::from(notice.message.as_str()),
        Line::from(""),
        Line::from(Span::styled("[ OK ]", Style::default().fg(color))),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup);
}
