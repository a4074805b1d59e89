/// Keybinding dispatch: (modifier-set, key) to editor command.
use crate::keys::{KeyCode, Modifiers};

/// Commands a keybinding can produce. The host applies each one
/// against its `Document` (or, for `ToggleTabCapture`, against the
/// keymap itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Undo,
    Redo,
    /// Insert one indent unit at the caret (Tab).
    InsertIndent,
    InsertNewline,
    /// Backspace.
    DeleteBackward,
    /// Collapse the selection to a caret (Escape).
    CollapseSelection,
    /// Insert (or wrap the selection in) an auto-closing pair.
    InsertPair { open: char, close: char },
    /// Flip whether Tab is captured as an indent command (Ctrl+M),
    /// freeing Tab for focus traversal in a host UI.
    ToggleTabCapture,
}

/// Pure dispatch table for the recognized editing shortcuts.
///
/// Unrecognized combinations resolve to `None`: plain typing reaches
/// the document as text, never through the keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keymap {
    /// Whether Tab is captured as an indent command.
    pub tab_inserts_indent: bool,
    /// Whether typing an opening bracket/quote inserts its pair.
    pub auto_close_pairs: bool,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            tab_inserts_indent: true,
            auto_close_pairs: true,
        }
    }
}

impl Keymap {
    /// Resolves a key press to a command, or `None` if the
    /// combination is not bound.
    pub fn resolve(&self, mods: Modifiers, key: KeyCode) -> Option<EditorCommand> {
        use EditorCommand::*;
        use KeyCode::*;

        if mods.ctrl {
            return match key {
                Z if mods.shift => Some(Redo),
                Z => Some(Undo),
                Y => Some(Redo),
                M => Some(ToggleTabCapture),
                _ => None,
            };
        }
        if mods.alt {
            return None;
        }

        match key {
            Backspace => Some(DeleteBackward),
            Enter => Some(InsertNewline),
            Escape => Some(CollapseSelection),
            Tab if !mods.shift && self.tab_inserts_indent => Some(InsertIndent),
            Brackets if self.auto_close_pairs => Some(if mods.shift {
                InsertPair { open: '{', close: '}' }
            } else {
                InsertPair { open: '[', close: ']' }
            }),
            Parens if self.auto_close_pairs && mods.shift => {
                Some(InsertPair { open: '(', close: ')' })
            }
            Quote if self.auto_close_pairs => Some(if mods.shift {
                InsertPair { open: '"', close: '"' }
            } else {
                InsertPair { open: '\'', close: '\'' }
            }),
            BackQuote if self.auto_close_pairs && !mods.shift => {
                Some(InsertPair { open: '`', close: '`' })
            }
            _ => None,
        }
    }
}
