use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app_state::{Screen, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Green).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    let hints = if state.notice.is_some() {
        " Enter/Esc: dismiss "
    } else {
        match state.screen {
            Screen::Create => {
                " Tab: next field  Enter: add word  Alt+Enter: new line  Ctrl+O: select study file  Esc: quit "
            }
            Screen::Picker => {
                " j/k: navigate  Enter: open  h: parent  a: toggle all files  Esc: cancel "
            }
            Screen::Review => {
                " Space: flip  r: right  w: wrong  b: back to menu  q: quit "
            }
        }
    };

    let status = Paragraph::new(hints)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
