/// Snapshot types for the history stack.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the history manager.
///
/// An invalid selection is a contract violation by the caller, not a
/// recoverable runtime condition; the offending call is rejected and
/// the manager's state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// Selection bounds are out of order or exceed the text length.
    #[error("invalid selection {start}..{end} for text of {len} chars")]
    InvalidSelection {
        /// Selection start (char offset).
        start: usize,
        /// Selection end (char offset).
        end: usize,
        /// Char length of the snapshot's text.
        len: usize,
    },
}

/// Immutable snapshot of editable state at one point in time.
///
/// Selection bounds are zero-based **char** offsets into `value`
/// (not byte offsets), with `selection_start <= selection_end`.
/// A collapsed selection (`start == end`) is a plain caret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Full text content.
    pub value: String,
    /// Selection start, char offset into `value`.
    pub selection_start: usize,
    /// Selection end, char offset into `value`.
    pub selection_end: usize,
}

impl Record {
    /// Creates a validated snapshot.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::InvalidSelection` if the bounds are out
    /// of order or exceed the char length of `value`.
    pub fn new(
        value: impl Into<String>,
        selection_start: usize,
        selection_end: usize,
    ) -> Result<Self, HistoryError> {
        let record = Self {
            value: value.into(),
            selection_start,
            selection_end,
        };
        record.validate()?;
        Ok(record)
    }

    /// Creates a snapshot with a collapsed selection at `pos`.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::InvalidSelection` if `pos` exceeds the
    /// char length of `value`.
    pub fn caret(value: impl Into<String>, pos: usize) -> Result<Self, HistoryError> {
        Self::new(value, pos, pos)
    }

    /// Creates the seed snapshot for freshly loaded content: the full
    /// text with the caret at offset 0. Always valid.
    pub fn initial(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            selection_start: 0,
            selection_end: 0,
        }
    }

    /// Length of the text in chars (not bytes).
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Checks the selection invariants.
    ///
    /// Fields are public, so the manager re-validates every candidate
    /// at the `record` boundary rather than trusting construction.
    pub fn validate(&self) -> Result<(), HistoryError> {
        let len = self.char_len();
        if self.selection_start > self.selection_end || self.selection_end > len {
            return Err(HistoryError::InvalidSelection {
                start: self.selection_start,
                end: self.selection_end,
                len,
            });
        }
        Ok(())
    }
}

/// A `Record` plus the time it was recorded, used to decide coalescing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The snapshot.
    pub record: Record,
    /// Monotonic milliseconds since an arbitrary epoch.
    pub timestamp_ms: u64,
}
