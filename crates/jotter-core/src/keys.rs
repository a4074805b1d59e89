/// Physical key identifiers recognized by the keymap.

/// Closed set of physical keys the editor intercepts, with their
/// conventional numeric key codes as discriminants.
///
/// `Parens`, `Brackets` and `Quote` name the physical keys that carry
/// `9`/`(`, `[`/`{` and `'`/`"`; the shift state decides which glyph
/// a binding produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyCode {
    Backspace = 8,
    Tab = 9,
    Enter = 13,
    Escape = 27,
    Parens = 57,
    M = 77,
    Y = 89,
    Z = 90,
    BackQuote = 192,
    Brackets = 219,
    Quote = 222,
}

impl KeyCode {
    /// Parses a numeric key code. Returns `None` for any code outside
    /// the recognized set.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            8 => Some(Self::Backspace),
            9 => Some(Self::Tab),
            13 => Some(Self::Enter),
            27 => Some(Self::Escape),
            57 => Some(Self::Parens),
            77 => Some(Self::M),
            89 => Some(Self::Y),
            90 => Some(Self::Z),
            192 => Some(Self::BackQuote),
            219 => Some(Self::Brackets),
            222 => Some(Self::Quote),
            _ => None,
        }
    }

    /// The numeric key code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Modifier keys held during a key press. `ctrl` covers both Ctrl and
/// the macOS command key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Ctrl (or Cmd) only.
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
        alt: false,
    };

    /// Ctrl (or Cmd) plus Shift.
    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        shift: true,
        alt: false,
    };
}
