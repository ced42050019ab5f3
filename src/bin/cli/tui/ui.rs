use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;

use super::app_state::{Screen, TuiState};
use super::{card_widget, create_widget, notice_popup, picker_widget, status_bar};

/// Pale green card background
pub const CARD_BACKGROUND: Color = Color::Rgb(177, 221, 198);

pub fn draw(f: &mut Frame, state: &mut TuiState) {
    let size = f.area();

    // Main layout: screen area + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(size);

    let main_area = outer[0];
    let status_area = outer[1];

    match state.screen {
        Screen::Create => create_widget::draw(f, main_area, state),
        Screen::Picker => picker_widget::draw(f, main_area, state),
        Screen::Review => card_widget::draw(f, main_area, state),
    }

    status_bar::draw(f, status_area, state);

    if let Some(ref notice) = state.notice {
        notice_popup::draw(f, size, notice);
    }
}
