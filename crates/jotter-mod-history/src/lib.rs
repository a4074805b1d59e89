/// Undo/redo history for a single editing session.
///
/// Provides a `HistoryManager` that snapshots the full editable state
/// (text plus selection bounds) after every committed mutation and
/// coalesces fast consecutive keystrokes into single undo steps.
/// One manager per open document; the host view owns the text buffer
/// and applies the `Record`s returned by undo/redo verbatim.
pub mod config;
pub mod manager;
pub mod record;

pub use config::HistoryConfig;
pub use manager::HistoryManager;
pub use record::{HistoryEntry, HistoryError, Record};
