use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::app_state::{Screen, TuiState, UiAction};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    let action = if state.notice.is_some() {
        notice_action(key)
    } else {
        match state.screen {
            Screen::Create => create_action(key),
            Screen::Picker => picker_action(key),
            Screen::Review => review_action(key),
        }
    };

    if let Some(action) = action {
        state.dispatch(action);
    }
}

fn notice_action(key: KeyEvent) -> Option<UiAction> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => {
            Some(UiAction::DismissNotice)
        }
        _ => None,
    }
}

fn create_action(key: KeyEvent) -> Option<UiAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('o') => Some(UiAction::OpenPicker),
            KeyCode::Char('j') => Some(UiAction::Newline),
            KeyCode::Char('c') => Some(UiAction::Quit),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::ALT) && key.code == KeyCode::Enter {
        return Some(UiAction::Newline);
    }

    match key.code {
        KeyCode::Esc => Some(UiAction::Quit),
        KeyCode::F(2) => Some(UiAction::OpenPicker),
        KeyCode::Tab | KeyCode::Down => Some(UiAction::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(UiAction::FocusPrev),
        KeyCode::Enter => Some(UiAction::AddWord),
        KeyCode::Backspace => Some(UiAction::Backspace),
        KeyCode::Char(c) => Some(UiAction::Input(c)),
        _ => None,
    }
}

fn picker_action(key: KeyEvent) -> Option<UiAction> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(UiAction::PickerCancel),
        KeyCode::Char('j') | KeyCode::Down => Some(UiAction::PickerDown),
        KeyCode::Char('k') | KeyCode::Up => Some(UiAction::PickerUp),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => Some(UiAction::PickerOpen),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => Some(UiAction::PickerParent),
        KeyCode::Char('a') => Some(UiAction::PickerToggleFilter),
        _ => None,
    }
}

fn review_action(key: KeyEvent) -> Option<UiAction> {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('f') => Some(UiAction::Flip),
        KeyCode::Char('r') | KeyCode::Char('y') | KeyCode::Right => Some(UiAction::MarkRight),
        KeyCode::Char('w') | KeyCode::Char('n') | KeyCode::Left => Some(UiAction::MarkWrong),
        KeyCode::Esc | KeyCode::Char('b') => Some(UiAction::BackToMenu),
        KeyCode::Char('q') => Some(UiAction::Quit),
        _ => None,
    }
}

pub fn handle_mouse(state: &mut TuiState, mouse: MouseEvent) {
    if state.notice.is_some() {
        return;
    }

    match (state.screen, mouse.kind) {
        (Screen::Create, MouseEventKind::Down(MouseButton::Left)) => {
            // Clicking a field focuses it
            let clicked = state
                .field_areas
                .iter()
                .find(|(_, area)| {
                    mouse.column >= area.x
                        && mouse.column < area.x + area.width
                        && mouse.row >= area.y
                        && mouse.row < area.y + area.height
                })
                .map(|(field, _)| *field);

            if let Some(field) = clicked {
                state.dispatch(UiAction::Focus(field));
            }
        }
        (Screen::Picker, MouseEventKind::ScrollDown) => state.dispatch(UiAction::PickerDown),
        (Screen::Picker, MouseEventKind::ScrollUp) => state.dispatch(UiAction::PickerUp),
        (Screen::Review, MouseEventKind::Down(MouseButton::Left)) => state.dispatch(UiAction::Flip),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_enter_adds_word_and_alt_enter_breaks_line() {
        assert_eq!(
            create_action(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(UiAction::AddWord)
        );
        assert_eq!(
            create_action(key(KeyCode::Enter, KeyModifiers::ALT)),
            Some(UiAction::Newline)
        );
        assert_eq!(
            create_action(key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Some(UiAction::Newline)
        );
    }

    #[test]
    fn test_plain_letters_are_typed() {
        assert_eq!(
            create_action(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(UiAction::Input('j'))
        );
        assert_eq!(
            create_action(key(KeyCode::Char('J'), KeyModifiers::SHIFT)),
            Some(UiAction::Input('J'))
        );
    }
}
