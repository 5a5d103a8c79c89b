use std::{fmt, str::FromStr};

use bitflags::bitflags;
use iced_core::keyboard::key::Code;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        const CTRL = 1 << 0;
        const SHIFT = 1 << 1;
        const ALT = 1 << 2;
        const LOGO = 1 << 3;
    }
}

impl KeyModifiers {
    /// The modifier a physical key stands for, if any.
    pub fn from_code(code: Code) -> Option<Self> {
        match code {
            Code::ControlLeft | Code::ControlRight => Some(Self::CTRL),
            Code::ShiftLeft | Code::ShiftRight => Some(Self::SHIFT),
            Code::AltLeft | Code::AltRight => Some(Self::ALT),
            Code::SuperLeft | Code::SuperRight => Some(Self::LOGO),
            _ => None,
        }
    }
}

const MODIFIER_NAMES: &[(&str, KeyModifiers)] = &[
    ("Ctrl", KeyModifiers::CTRL),
    ("Control", KeyModifiers::CTRL),
    ("Shift", KeyModifiers::SHIFT),
    ("Alt", KeyModifiers::ALT),
    ("Option", KeyModifiers::ALT),
    ("Logo", KeyModifiers::LOGO),
    ("Super", KeyModifiers::LOGO),
    ("Cmd", KeyModifiers::LOGO),
];

/// Accepted key names. The first name listed for a code is used when printing.
const KEY_NAMES: &[(&str, Code)] = &[
    ("A", Code::KeyA),
    ("B", Code::KeyB),
    ("C", Code::KeyC),
    ("D", Code::KeyD),
    ("E", Code::KeyE),
    ("F", Code::KeyF),
    ("G", Code::KeyG),
    ("H", Code::KeyH),
    ("I", Code::KeyI),
    ("J", Code::KeyJ),
    ("K", Code::KeyK),
    ("L", Code::KeyL),
    ("M", Code::KeyM),
    ("N", Code::KeyN),
    ("O", Code::KeyO),
    ("P", Code::KeyP),
    ("Q", Code::KeyQ),
    ("R", Code::KeyR),
    ("S", Code::KeyS),
    ("T", Code::KeyT),
    ("U", Code::KeyU),
    ("V", Code::KeyV),
    ("W", Code::KeyW),
    ("X", Code::KeyX),
    ("Y", Code::KeyY),
    ("Z", Code::KeyZ),
    ("0", Code::Digit0),
    ("1", Code::Digit1),
    ("2", Code::Digit2),
    ("3", Code::Digit3),
    ("4", Code::Digit4),
    ("5", Code::Digit5),
    ("6", Code::Digit6),
    ("7", Code::Digit7),
    ("8", Code::Digit8),
    ("9", Code::Digit9),
    ("Escape", Code::Escape),
    ("Esc", Code::Escape),
    ("Backspace", Code::Backspace),
    ("Delete", Code::Delete),
    ("Enter", Code::Enter),
    ("Space", Code::Space),
    ("Tab", Code::Tab),
    ("Up", Code::ArrowUp),
    ("Down", Code::ArrowDown),
    ("Left", Code::ArrowLeft),
    ("Right", Code::ArrowRight),
];

fn code_from_name(name: &str) -> Option<Code> {
    // `KeyZ` and `Digit1` are accepted as well as `Z` and `1`.
    let short = [name.strip_prefix("Key"), name.strip_prefix("Digit")]
        .into_iter()
        .flatten()
        .find(|s| s.len() == 1)
        .unwrap_or(name);

    KEY_NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(short))
        .map(|(_, code)| *code)
}

fn code_name(code: Code) -> Option<&'static str> {
    KEY_NAMES.iter().find(|(_, c)| *c == code).map(|(n, _)| *n)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeySequenceParseError {
    #[error("Empty key sequence")]
    Empty,
    #[error("Unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("Unknown key `{0}`")]
    UnknownKey(String),
    #[error("Key `{0:?}` can't be used in a shortcut")]
    UnsupportedCode(Code),
}

/// A shortcut: held modifiers plus one non-modifier key, written like
/// `Ctrl+Shift+Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeySequence {
    pub modifiers: KeyModifiers,
    pub key: Code,
}

impl KeySequence {
    pub const fn new(modifiers: KeyModifiers, key: Code) -> Self {
        Self { modifiers, key }
    }
}

impl FromStr for KeySequence {
    type Err = KeySequenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key_name = match parts.pop() {
            Some(k) if !k.is_empty() => k,
            _ => return Err(KeySequenceParseError::Empty),
        };

        let mut modifiers = KeyModifiers::empty();
        for part in parts {
            let modifier = MODIFIER_NAMES
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(part))
                .map(|(_, m)| *m)
                .ok_or_else(|| KeySequenceParseError::UnknownModifier(part.to_string()))?;
            modifiers |= modifier;
        }

        let key = code_from_name(key_name)
            .ok_or_else(|| KeySequenceParseError::UnknownKey(key_name.to_string()))?;
        Ok(Self { modifiers, key })
    }
}

impl TryFrom<String> for KeySequence {
    type Error = KeySequenceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeySequence> for String {
    fn from(value: KeySequence) -> Self {
        value.to_string()
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, modifier) in [
            ("Ctrl", KeyModifiers::CTRL),
            ("Shift", KeyModifiers::SHIFT),
            ("Alt", KeyModifiers::ALT),
            ("Logo", KeyModifiers::LOGO),
        ] {
            if self.modifiers.contains(modifier) {
                write!(f, "{}+", name)?;
            }
        }
        match code_name(self.key) {
            Some(name) => f.write_str(name),
            None => write!(f, "{:?}", self.key),
        }
    }
}

/// Physical keys currently held down.
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    pressed: IndexSet<Code>,
}

impl KeyboardState {
    pub fn press(&mut self, code: Code) {
        self.pressed.insert(code);
    }

    pub fn release(&mut self, code: Code) {
        self.pressed.swap_remove(&code);
    }

    pub fn modifiers(&self) -> KeyModifiers {
        self.pressed
            .iter()
            .filter_map(|c| KeyModifiers::from_code(*c))
            .fold(KeyModifiers::empty(), |acc, m| acc | m)
    }

    /// The shortcut formed by the held modifiers and the most recently pressed
    /// non-modifier key.
    pub fn get_sequence(&self) -> Result<KeySequence, KeySequenceParseError> {
        let key = self
            .pressed
            .iter()
            .rev()
            .find(|c| KeyModifiers::from_code(**c).is_none())
            .copied()
            .ok_or(KeySequenceParseError::Empty)?;
        if code_name(key).is_none() {
            return Err(KeySequenceParseError::UnsupportedCode(key));
        }
        Ok(KeySequence::new(self.modifiers(), key))
    }
}
