mod app_state;
mod card_widget;
mod create_widget;
mod key_handler;
mod notice_popup;
mod picker_widget;
mod status_bar;
mod ui;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;

use crate::app::App;
use app_state::{Screen, TuiState, UiAction};

type StudyTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Run the TUI, starting on the creation screen or straight in a review of
/// `deck` when given
pub fn run(app: App, deck: Option<PathBuf>) -> Result<()> {
    let mut state = TuiState::new(app);
    if let Some(path) = deck {
        state.start_session(&path);
    }

    let mut terminal = enter_terminal()?;
    let result = run_loop(&mut terminal, &mut state);

    // The terminal goes back to normal even when the loop failed
    let restored = leave_terminal(&mut terminal);
    result.and(restored)
}

fn enter_terminal() -> Result<StudyTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    ) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn leave_terminal(terminal: &mut StudyTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, state: &mut TuiState) -> Result<()> {
    while !state.quit {
        terminal.draw(|f| ui::draw(f, state))?;

        if event::poll(Duration::from_millis(250))? {
            handle_event(terminal, state, event::read()?)?;
        }
    }
    Ok(())
}

fn handle_event<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut TuiState,
    event: Event,
) -> Result<()> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            key_handler::handle_key(state, key);
        }
        Event::Mouse(mouse) => key_handler::handle_mouse(state, mouse),
        Event::Paste(text) if state.screen == Screen::Create && state.notice.is_none() => {
            state.dispatch(UiAction::Paste(text));
        }
        Event::Resize(..) => terminal.autoresize()?,
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use karteikarten_lib::config::StudyConfig;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn create_test_state() -> (TuiState, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = StudyConfig {
            deck_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        (TuiState::new(App::with_config(config)), temp_dir)
    }

    #[test]
    fn test_paste_reaches_creation_form() {
        let (mut state, _temp) = create_test_state();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        handle_event(&mut terminal, &mut state, Event::Paste("Hund".to_string())).unwrap();
        assert_eq!(state.form.front.value, "Hund");
    }

    #[test]
    fn test_paste_ignored_under_notice() {
        let (mut state, _temp) = create_test_state();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        state.dispatch(UiAction::AddWord);
        assert!(state.notice.is_some());

        handle_event(&mut terminal, &mut state, Event::Paste("Hund".to_string())).unwrap();
        assert!(state.form.deck.value.is_empty());
        assert!(state.form.front.value.is_empty());
    }

    #[test]
    fn test_draw_after_resize() {
        let (mut state, _temp) = create_test_state();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui::draw(f, &mut state)).unwrap();

        terminal.backend_mut().resize(120, 40);
        handle_event(&mut terminal, &mut state, Event::Resize(120, 40)).unwrap();
        let frame = terminal.draw(|f| ui::draw(f, &mut state)).unwrap();
        assert_eq!(frame.area.width, 120);
        assert_eq!(frame.area.height, 40);
    }
}
