//! Classification of raw key presses into the four actions a typing session
//! understands. Everything the terminal delivers ends up in exactly one bucket,
//! so noise never reaches the session.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const ESCAPE: char = '\u{1b}';

/// A key press as delivered by the input source, before any interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyInput {
    /// Text the key produced; may be empty or longer than one character.
    pub sequence: String,
    /// Lowercase symbolic name, e.g. `"r"` or `"backspace"`.
    pub name: String,
    pub ctrl: bool,
    pub meta: bool,
    pub option: bool,
    /// Raw bytes as read from the terminal, when the source knows them.
    pub raw: String,
}

impl KeyInput {
    /// A plain key press producing `c`.
    pub fn char(c: char) -> Self {
        Self {
            sequence: c.to_string(),
            name: c.to_ascii_lowercase().to_string(),
            raw: c.to_string(),
            ..Self::default()
        }
    }

    /// A key press with a symbolic name and no text.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_option(mut self) -> Self {
        self.option = true;
        self
    }

    pub fn with_raw(mut self, raw: &str) -> Self {
        self.raw = raw.to_string();
        self
    }
}

impl From<&KeyEvent> for KeyInput {
    fn from(key: &KeyEvent) -> Self {
        let (sequence, name) = match key.code {
            KeyCode::Char(c) => (c.to_string(), c.to_ascii_lowercase().to_string()),
            KeyCode::Backspace => ("\u{7f}".to_string(), "backspace".to_string()),
            KeyCode::Enter => ("\r".to_string(), "return".to_string()),
            KeyCode::Tab => ("\t".to_string(), "tab".to_string()),
            KeyCode::Esc => (ESCAPE.to_string(), "escape".to_string()),
            other => (String::new(), format!("{other:?}").to_lowercase()),
        };

        Self {
            raw: sequence.clone(),
            sequence,
            name,
            ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
            meta: key
                .modifiers
                .intersects(KeyModifiers::META | KeyModifiers::SUPER),
            option: key.modifiers.contains(KeyModifiers::ALT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Reset,
    Backspace,
    Printable(char),
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierOptions {
    /// Drop input whose raw bytes start with ESC. Some terminals echo capability
    /// responses into stdin and this keeps them out of the typed text.
    pub reject_escape_prefixed: bool,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            reject_escape_prefixed: true,
        }
    }
}

pub fn classify(input: &KeyInput, options: ClassifierOptions) -> KeyAction {
    if input.ctrl && input.name.eq_ignore_ascii_case("r") {
        return KeyAction::Reset;
    }

    if input.name == "backspace" {
        return KeyAction::Backspace;
    }

    match printable_char(input, options) {
        Some(c) => KeyAction::Printable(c),
        None => KeyAction::Ignore,
    }
}

fn printable_char(input: &KeyInput, options: ClassifierOptions) -> Option<char> {
    let mut chars = input.sequence.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    if input.ctrl || input.meta || input.option {
        return None;
    }

    if options.reject_escape_prefixed && input.raw.starts_with(ESCAPE) {
        return None;
    }

    (' '..='~').contains(&c).then_some(c)
}

/// Ctrl+C, which ends the application rather than feeding the session.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}
