/// Headless document model: text buffer, selection, and history.
use std::time::Instant;

use jotter_mod_history::{HistoryConfig, HistoryManager, Record};

use crate::indent::IndentStyle;
use crate::selection::Selection;

/// An open document: the sole writer of the text buffer.
///
/// Every mutation method commits exactly one snapshot to the history
/// manager; `undo`/`redo` apply the returned snapshots verbatim,
/// restoring both text and the exact selection bounds. All offsets
/// are char offsets.
#[derive(Debug)]
pub struct Document {
    value: String,
    selection: Selection,
    history: HistoryManager,
    indent_style: IndentStyle,
    /// Epoch for the monotonic timestamps fed to the history manager.
    epoch: Instant,
    modified: bool,
}

impl Document {
    /// Opens a document, seeding history with the loaded content.
    pub fn open(text: impl Into<String>, config: HistoryConfig) -> Self {
        let value = text.into();
        let mut doc = Self {
            value: value.clone(),
            selection: Selection::default(),
            history: HistoryManager::new(config),
            indent_style: IndentStyle::default(),
            epoch: Instant::now(),
            modified: false,
        };
        doc.commit(Record::initial(value));
        doc
    }

    /// The current text content.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Length of the text in chars.
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Whether the document has been mutated since it was opened.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Read access to the history manager.
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Sets the indent style used by `insert_indent`.
    pub fn set_indent_style(&mut self, style: IndentStyle) {
        self.indent_style = style;
    }

    /// Replaces the active selection (if any) with `text`; the caret
    /// lands after the inserted text.
    pub fn insert_text(&mut self, text: &str) {
        let Selection { start, end } = self.selection;
        if text.is_empty() && start == end {
            // Nothing would change; don't spend an undo entry on it.
            return;
        }
        self.replace_chars(start, end, text);
        self.selection = Selection::caret(start + text.chars().count());
        self.modified = true;
        self.commit_current();
    }

    /// Inserts a single char at the caret (replacing any selection).
    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_text(ch.encode_utf8(&mut buf));
    }

    /// Inserts a line break.
    pub fn insert_newline(&mut self) {
        self.insert_text("\n");
    }

    /// Inserts one indent unit (replacing any selection).
    pub fn insert_indent(&mut self) {
        self.insert_text(&self.indent_style.indent_text());
    }

    /// Backspace: deletes the selection, or the char before the
    /// caret. Does nothing (and records nothing) at offset 0 with no
    /// selection.
    pub fn delete_backward(&mut self) {
        let Selection { start, end } = self.selection;
        if start != end {
            self.replace_chars(start, end, "");
            self.selection = Selection::caret(start);
        } else if start > 0 {
            self.replace_chars(start - 1, start, "");
            self.selection = Selection::caret(start - 1);
        } else {
            return;
        }
        self.modified = true;
        self.commit_current();
    }

    /// Auto-closing pair: wraps a non-empty selection in the pair
    /// (the selected text stays selected, shifted inside the pair),
    /// or inserts both chars with the caret between them.
    pub fn insert_pair(&mut self, open: char, close: char) {
        let Selection { start, end } = self.selection;
        let mut buf = [0u8; 4];
        if start == end {
            let mut pair = String::with_capacity(8);
            pair.push(open);
            pair.push(close);
            self.replace_chars(start, start, &pair);
            self.selection = Selection::caret(start + 1);
        } else {
            self.replace_chars(end, end, close.encode_utf8(&mut buf));
            self.replace_chars(start, start, open.encode_utf8(&mut buf));
            self.selection = Selection {
                start: start + 1,
                end: end + 1,
            };
        }
        self.modified = true;
        self.commit_current();
    }

    /// Steps the history back and applies the returned snapshot.
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(record) => {
                self.apply(record);
                true
            }
            None => false,
        }
    }

    /// Steps the history forward and applies the returned snapshot.
    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(record) => {
                self.apply(record);
                true
            }
            None => false,
        }
    }

    /// Sets the selection, ordering and clamping the bounds to the
    /// text length.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        self.selection = Selection {
            start: lo.min(len),
            end: hi.min(len),
        };
    }

    /// Selects the whole document.
    pub fn select_all(&mut self) {
        self.selection = Selection {
            start: 0,
            end: self.char_len(),
        };
    }

    /// Collapses the selection to a caret at its end.
    pub fn collapse_selection(&mut self) {
        self.selection = Selection::caret(self.selection.end);
    }

    /// Forces the next committed mutation to start a new undo step.
    pub fn force_snapshot_break(&mut self) {
        self.history.force_break();
    }

    /// Commits a snapshot of the current state.
    fn commit_current(&mut self) {
        let candidate = Record {
            value: self.value.clone(),
            selection_start: self.selection.start,
            selection_end: self.selection.end,
        };
        self.commit(candidate);
    }

    fn commit(&mut self, candidate: Record) {
        let now_ms = self.epoch.elapsed().as_millis() as u64;
        // The document keeps its selection ordered and clamped, so
        // rejection here indicates a bug in a mutation method.
        if let Err(e) = self.history.record(candidate, now_ms) {
            tracing::warn!("history rejected snapshot: {e}");
        }
    }

    fn apply(&mut self, record: Record) {
        self.value = record.value;
        self.selection = Selection {
            start: record.selection_start,
            end: record.selection_end,
        };
        self.modified = true;
    }

    /// Replaces the char range `start..end` with `text`.
    fn replace_chars(&mut self, start: usize, end: usize, text: &str) {
        let start_byte = self.byte_index(start);
        let end_byte = self.byte_index(end);
        self.value.replace_range(start_byte..end_byte, text);
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(byte, _)| byte)
            .unwrap_or(self.value.len())
    }
}
