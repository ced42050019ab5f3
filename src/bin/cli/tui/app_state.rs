use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use karteikarten_lib::cards::{CardStoreError, DrawOutcome, ReviewSession};
use ratatui::prelude::Rect;

use crate::app::App;

const FRONT_PLACEHOLDER: &str = "Front side goes here";
const BACK_PLACEHOLDER: &str = "Back side goes here";
const DECK_PLACEHOLDER: &str = "Deck name";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Create,
    Picker,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    Front,
    Back,
    Deck,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Deck,
            Self::Deck => Self::Front,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Front => Self::Deck,
            Self::Back => Self::Front,
            Self::Deck => Self::Back,
        }
    }
}

/// Named UI events. Keys and mouse clicks are translated into these by the
/// key handler; all state changes go through [`TuiState::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    // Creation screen
    Focus(Field),
    FocusNext,
    FocusPrev,
    Input(char),
    Paste(String),
    Newline,
    Backspace,
    AddWord,
    OpenPicker,

    // File chooser
    PickerUp,
    PickerDown,
    PickerOpen,
    PickerParent,
    PickerToggleFilter,
    PickerCancel,

    // Review screen
    Flip,
    MarkRight,
    MarkWrong,
    BackToMenu,

    DismissNotice,
    Quit,
}

/// A text input that shows a placeholder until it first receives focus
#[derive(Debug, Clone)]
pub struct TextInput {
    pub value: String,
    pub placeholder: &'static str,
    pub showing_placeholder: bool,
}

impl TextInput {
    fn new(placeholder: &'static str) -> Self {
        Self {
            value: String::new(),
            placeholder,
            showing_placeholder: true,
        }
    }

    fn with_value(placeholder: &'static str, value: String) -> Self {
        Self {
            value,
            placeholder,
            showing_placeholder: false,
        }
    }

    /// Clear the placeholder; typed text is kept
    pub fn focus_in(&mut self) {
        self.showing_placeholder = false;
    }

    fn reset(&mut self) {
        self.value.clear();
        self.showing_placeholder = true;
    }

    /// Text to display: the placeholder or the typed value
    pub fn display(&self) -> &str {
        if self.showing_placeholder {
            self.placeholder
        } else {
            &self.value
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateForm {
    pub front: TextInput,
    pub back: TextInput,
    pub deck: TextInput,
    pub focus: Field,
}

impl CreateForm {
    fn new(default_deck: Option<&str>) -> Self {
        let deck = match default_deck {
            Some(name) => TextInput::with_value(DECK_PLACEHOLDER, name.to_string()),
            None => TextInput::new(DECK_PLACEHOLDER),
        };
        Self {
            front: TextInput::new(FRONT_PLACEHOLDER),
            back: TextInput::new(BACK_PLACEHOLDER),
            deck,
            focus: Field::Front,
        }
    }

    pub fn input(&self, field: Field) -> &TextInput {
        match field {
            Field::Front => &self.front,
            Field::Back => &self.back,
            Field::Deck => &self.deck,
        }
    }

    fn input_mut(&mut self, field: Field) -> &mut TextInput {
        match field {
            Field::Front => &mut self.front,
            Field::Back => &mut self.back,
            Field::Deck => &mut self.deck,
        }
    }

    fn focused_mut(&mut self) -> &mut TextInput {
        self.input_mut(self.focus)
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
        self.input_mut(field).focus_in();
    }
}

#[derive(Debug, Clone)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Directory listing restricted to CSV files unless `show_all` is set
#[derive(Debug, Clone)]
pub struct FilePicker {
    pub dir: PathBuf,
    pub entries: Vec<PickerEntry>,
    pub selected: usize,
    pub show_all: bool,
}

impl FilePicker {
    fn new(dir: &Path, show_all: bool) -> Self {
        Self {
            dir: fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf()),
            entries: Vec::new(),
            selected: 0,
            show_all,
        }
    }

    fn refresh(&mut self) -> io::Result<()> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            let is_dir = path.is_dir();
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            if is_dir || self.show_all || is_csv(&path) {
                entries.push(PickerEntry { name, path, is_dir });
            }
        }

        // Directories first, then by name
        entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));

        if let Some(parent) = self.dir.parent() {
            entries.insert(
                0,
                PickerEntry {
                    name: "..".to_string(),
                    path: parent.to_path_buf(),
                    is_dir: true,
                },
            );
        }

        self.entries = entries;
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
        Ok(())
    }

    fn change_dir(&mut self, dir: PathBuf) -> io::Result<()> {
        let previous = std::mem::replace(&mut self.dir, dir);
        self.selected = 0;
        if let Err(e) = self.refresh() {
            self.dir = previous;
            self.refresh()?;
            return Err(e);
        }
        Ok(())
    }

    pub fn selected_entry(&self) -> Option<&PickerEntry> {
        self.entries.get(self.selected)
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Modal message; blocks all other input until dismissed
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

pub struct TuiState {
    pub app: App,
    pub screen: Screen,
    pub form: CreateForm,
    pub picker: FilePicker,
    pub session: Option<ReviewSession>,
    pub notice: Option<Notice>,
    pub flash_message: Option<String>,

    // Input field areas for mouse hit-testing (updated each draw)
    pub field_areas: Vec<(Field, Rect)>,

    pub quit: bool,
}

impl TuiState {
    pub fn new(app: App) -> Self {
        let form = CreateForm::new(app.config.default_deck.as_deref());
        let picker = FilePicker::new(&app.config.deck_dir, app.config.show_all_files);
        Self {
            app,
            screen: Screen::Create,
            form,
            picker,
            session: None,
            notice: None,
            flash_message: None,
            field_areas: Vec::new(),
            quit: false,
        }
    }

    pub fn dispatch(&mut self, action: UiAction) {
        match action {
            UiAction::Focus(field) => self.form.set_focus(field),
            UiAction::FocusNext => self.form.set_focus(self.form.focus.next()),
            UiAction::FocusPrev => self.form.set_focus(self.form.focus.prev()),
            UiAction::Input(c) => {
                let input = self.form.focused_mut();
                input.focus_in();
                input.value.push(c);
            }
            UiAction::Paste(text) => {
                let multiline = self.form.focus != Field::Deck;
                let input = self.form.focused_mut();
                input.focus_in();
                if multiline {
                    input.value.push_str(&text.replace("\r\n", "\n"));
                } else {
                    input.value.extend(text.chars().filter(|c| !c.is_control()));
                }
            }
            UiAction::Newline => {
                // Deck names stay on one line
                if self.form.focus != Field::Deck {
                    let input = self.form.focused_mut();
                    input.focus_in();
                    input.value.push('\n');
                }
            }
            UiAction::Backspace => {
                let input = self.form.focused_mut();
                input.focus_in();
                input.value.pop();
            }
            UiAction::AddWord => self.add_word(),
            UiAction::OpenPicker => self.open_picker(),

            UiAction::PickerUp => {
                self.picker.selected = self.picker.selected.saturating_sub(1);
            }
            UiAction::PickerDown => {
                if self.picker.selected + 1 < self.picker.entries.len() {
                    self.picker.selected += 1;
                }
            }
            UiAction::PickerOpen => self.open_picker_entry(),
            UiAction::PickerParent => {
                if let Some(parent) = self.picker.dir.parent().map(Path::to_path_buf) {
                    self.change_picker_dir(parent);
                }
            }
            UiAction::PickerToggleFilter => {
                self.picker.show_all = !self.picker.show_all;
                if let Err(e) = self.picker.refresh() {
                    self.notice = Some(Notice::error(format!("Failed to read directory: {}", e)));
                }
            }
            UiAction::PickerCancel => self.screen = Screen::Create,

            UiAction::Flip => {
                if let Some(session) = self.session.as_mut() {
                    session.flip();
                }
            }
            UiAction::MarkRight => self.answer(true),
            UiAction::MarkWrong => self.answer(false),
            UiAction::BackToMenu => self.close_session(),

            UiAction::DismissNotice => self.notice = None,
            UiAction::Quit => self.quit = true,
        }
    }

    /// Append the form's card to its deck file and reset the card fields
    fn add_word(&mut self) {
        let deck = if self.form.deck.showing_placeholder {
            ""
        } else {
            self.form.deck.value.trim()
        };
        if deck.is_empty() {
            self.notice = Some(Notice::error("Enter a deck name first."));
            self.form.set_focus(Field::Deck);
            return;
        }

        let front = self.form.front.value.clone();
        let back = self.form.back.value.clone();

        match self.app.add_card(deck, &front, &back) {
            Ok(path) => {
                self.flash_message = Some(format!("Card added and saved to '{}'", path.display()));
                self.form.front.reset();
                self.form.back.reset();
                self.form.focus = Field::Front;
            }
            Err(e) => {
                self.notice = Some(Notice::error(format!("{:#}", e)));
            }
        }
    }

    fn open_picker(&mut self) {
        match self.picker.refresh() {
            Ok(()) => self.screen = Screen::Picker,
            Err(e) => {
                self.notice = Some(Notice::error(format!(
                    "Failed to read {}: {}",
                    self.picker.dir.display(),
                    e
                )));
            }
        }
    }

    fn change_picker_dir(&mut self, dir: PathBuf) {
        if let Err(e) = self.picker.change_dir(dir) {
            self.notice = Some(Notice::error(format!("Failed to read directory: {}", e)));
        }
    }

    fn open_picker_entry(&mut self) {
        let Some(entry) = self.picker.selected_entry().cloned() else {
            return;
        };

        if entry.is_dir {
            self.change_picker_dir(entry.path);
        } else {
            self.start_session(&entry.path);
        }
    }

    /// Start reviewing `path`; on failure stay on the creation screen
    pub fn start_session(&mut self, path: &Path) {
        match self.app.open_session(path) {
            Ok(mut session) => match session.begin() {
                DrawOutcome::Next => {
                    self.session = Some(session);
                    self.screen = Screen::Review;
                }
                DrawOutcome::Completed => {
                    self.finish_session();
                }
            },
            Err(CardStoreError::Schema { .. }) => {
                self.screen = Screen::Create;
                self.notice = Some(Notice::error(
                    "The CSV file must have 'front' and 'back' columns.",
                ));
            }
            Err(e) => {
                self.screen = Screen::Create;
                self.notice = Some(Notice::error(format!("Failed to load file: {}", e)));
            }
        }
    }

    fn answer(&mut self, correct: bool) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let result = if correct {
            session.mark_right()
        } else {
            session.mark_wrong()
        };

        match result {
            Ok(DrawOutcome::Next) => {}
            Ok(DrawOutcome::Completed) => self.finish_session(),
            Err(e) => {
                self.notice = Some(Notice::error(format!("Failed to save progress: {}", e)));
            }
        }
    }

    fn finish_session(&mut self) {
        self.close_session();
        self.notice = Some(Notice::info("Congratulations", "All cards learned!"));
    }

    fn close_session(&mut self) {
        self.session = None;
        self.screen = Screen::Create;
    }
}
