/// Core undo/redo manager.
///
/// The stack holds full-state snapshots, oldest first, and `offset`
/// indexes the currently-active entry. Entries above the offset form
/// the redo-future; a genuinely new edit recorded while the offset is
/// not at the top drops them before appending.
use crate::config::HistoryConfig;
use crate::record::{HistoryEntry, HistoryError, Record};

/// Manages undo/redo history for a single document.
///
/// Each document gets its own `HistoryManager` with an independent
/// stack; the host view never touches the stack directly, only the
/// `record`/`undo`/`redo`/`current` operations.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    /// Snapshot stack, ordered oldest first.
    stack: Vec<HistoryEntry>,
    /// Index of the currently-active entry. Meaningless while the
    /// stack is empty; always `< stack.len()` otherwise.
    offset: usize,
    /// Configuration parameters.
    config: HistoryConfig,
    /// Set by `force_break` so the next record starts a new entry.
    break_pending: bool,
}

impl HistoryManager {
    /// Creates an empty manager. The first `record` call seeds the
    /// stack.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            stack: Vec::new(),
            offset: 0,
            config,
            break_pending: false,
        }
    }

    /// Creates a manager pre-seeded with the initial loaded content.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::InvalidSelection` if the seed snapshot
    /// carries invalid selection bounds.
    pub fn seeded(
        seed: Record,
        now_ms: u64,
        config: HistoryConfig,
    ) -> Result<Self, HistoryError> {
        let mut manager = Self::new(config);
        manager.record(seed, now_ms)?;
        Ok(manager)
    }

    /// Records a candidate snapshot taken immediately after a
    /// committed mutation.
    ///
    /// The candidate coalesces into the active entry (in-place
    /// replacement, no new undo step) when all of these hold:
    /// the offset is at the top of the stack, no break is pending,
    /// the candidate arrives within the coalescing window of the
    /// active entry, and the edit looks like part of a continuous
    /// typing run (see `is_continuous_edit`). Coalescing resets the
    /// entry's timestamp, so the window slides with the run rather
    /// than being measured from its start.
    ///
    /// Otherwise the stack is truncated at the offset (dropping any
    /// redo-future) and the candidate is appended as a new entry.
    /// When the stack then exceeds `max_depth`, the oldest entries
    /// are evicted and the offset adjusted to keep pointing at the
    /// appended entry.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::InvalidSelection` for a malformed
    /// candidate; the stack and offset are left unchanged.
    pub fn record(&mut self, candidate: Record, now_ms: u64) -> Result<(), HistoryError> {
        candidate.validate()?;

        if self.stack.is_empty() {
            self.stack.push(HistoryEntry {
                record: candidate,
                timestamp_ms: now_ms,
            });
            self.offset = 0;
            self.break_pending = false;
            return Ok(());
        }

        let last = &self.stack[self.offset];
        let at_top = self.offset == self.stack.len() - 1;
        let in_window =
            now_ms.saturating_sub(last.timestamp_ms) <= self.config.coalesce_window_ms;
        let coalesce = at_top
            && !self.break_pending
            && in_window
            && is_continuous_edit(&last.record, &candidate, self.config.max_run_delta);

        if coalesce {
            tracing::trace!(offset = self.offset, "coalescing into active entry");
            let entry = &mut self.stack[self.offset];
            entry.record = candidate;
            entry.timestamp_ms = now_ms;
        } else {
            let dropped = self.stack.len() - 1 - self.offset;
            if dropped > 0 {
                tracing::debug!(dropped, "new edit invalidates redo-future");
            }
            self.stack.truncate(self.offset + 1);
            self.stack.push(HistoryEntry {
                record: candidate,
                timestamp_ms: now_ms,
            });
            self.offset = self.stack.len() - 1;

            // Eviction must leave the just-appended entry in place,
            // so the cap floors at 1 even if the config says 0.
            let cap = self.config.max_depth.max(1);
            if self.stack.len() > cap {
                let excess = self.stack.len() - cap;
                self.stack.drain(..excess);
                self.offset -= excess;
                tracing::debug!(evicted = excess, "evicted oldest history entries");
            }
        }

        self.break_pending = false;
        Ok(())
    }

    /// Moves one step back and returns the snapshot to apply.
    ///
    /// Returns `None` when there is nothing left to undo; the state
    /// is unchanged in that case.
    pub fn undo(&mut self) -> Option<Record> {
        if self.offset == 0 {
            return None;
        }
        self.offset -= 1;
        Some(self.stack[self.offset].record.clone())
    }

    /// Moves one step forward and returns the snapshot to apply.
    ///
    /// Returns `None` when there is nothing left to redo.
    pub fn redo(&mut self) -> Option<Record> {
        if self.offset + 1 >= self.stack.len() {
            return None;
        }
        self.offset += 1;
        Some(self.stack[self.offset].record.clone())
    }

    /// The currently-active snapshot, or `None` before the first
    /// record. Used by the view to re-sync after out-of-band changes.
    pub fn current(&self) -> Option<&Record> {
        self.stack.get(self.offset).map(|entry| &entry.record)
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        self.offset > 0
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        self.offset + 1 < self.stack.len()
    }

    /// Number of entries on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Index of the currently-active entry.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Forces a run break so the next record starts a new undo step
    /// even if it would otherwise coalesce.
    pub fn force_break(&mut self) {
        self.break_pending = true;
    }

    /// Drops all history. The next `record` call re-seeds the stack.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.offset = 0;
        self.break_pending = false;
    }
}

/// Whether `cand` continues the typing run that produced `last`.
///
/// Deterministic rule, fixed because it controls undo granularity:
/// the candidate must be a collapsed caret, the length change must be
/// between 1 and `max_delta` chars, and the caret must drift in the
/// edit's direction by no more than that change. Same-length
/// replacements and selection-carrying candidates never coalesce.
fn is_continuous_edit(last: &Record, cand: &Record, max_delta: usize) -> bool {
    if cand.selection_start != cand.selection_end {
        return false;
    }
    let last_len = last.char_len();
    let cand_len = cand.char_len();
    let delta = last_len.abs_diff(cand_len);
    if delta == 0 || delta > max_delta {
        return false;
    }
    let caret = cand.selection_end;
    let anchor = last.selection_end;
    if cand_len > last_len {
        anchor <= caret && caret <= anchor + delta
    } else {
        anchor.saturating_sub(delta) <= caret && caret <= anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caret(value: &str, pos: usize) -> Record {
        Record::caret(value, pos).expect("valid record")
    }

    fn manager() -> HistoryManager {
        HistoryManager::new(HistoryConfig::default())
    }

    // ── Recording ──────────────────────────────────────────────────────

    #[test]
    fn test_first_record_seeds_stack() {
        let mut mgr = manager();
        mgr.record(caret("", 0), 0).expect("record");
        assert_eq!(mgr.depth(), 1);
        assert_eq!(mgr.offset(), 0);
        assert_eq!(mgr.current().map(|r| r.value.as_str()), Some(""));
    }

    #[test]
    fn test_offset_tracks_top_without_traversal() {
        let mut mgr = manager();
        mgr.record(caret("a", 1), 0).expect("record");
        for i in 0..10u64 {
            mgr.record(caret(&"a".repeat(20 + i as usize), 0), i * 10_000)
                .expect("record");
            assert_eq!(mgr.offset(), mgr.depth() - 1);
        }
    }

    #[test]
    fn test_invalid_selection_rejected_without_side_effects() {
        let mut mgr = manager();
        mgr.record(caret("abc", 3), 0).expect("record");

        let bad = Record {
            value: "abcde".to_string(),
            selection_start: 5,
            selection_end: 3,
        };
        let err = mgr.record(bad, 10).unwrap_err();
        assert!(matches!(err, HistoryError::InvalidSelection { start: 5, end: 3, .. }));
        assert_eq!(mgr.depth(), 1);
        assert_eq!(mgr.offset(), 0);
        assert_eq!(mgr.current().map(|r| r.value.as_str()), Some("abc"));
    }

    // ── Coalescing ─────────────────────────────────────────────────────

    #[test]
    fn test_fast_keystrokes_coalesce_in_place() {
        let mut mgr = manager();
        mgr.record(caret("", 0), 0).expect("record");
        mgr.record(caret("a", 1), 100).expect("record");
        mgr.record(caret("ab", 2), 200).expect("record");
        assert_eq!(mgr.depth(), 1);
        assert_eq!(mgr.current().map(|r| r.value.as_str()), Some("ab"));
        assert_eq!(mgr.current().map(|r| r.selection_end), Some(2));
    }

    #[test]
    fn test_window_expiry_appends() {
        let mut mgr = manager();
        mgr.record(caret("ab", 2), 0).expect("record");
        mgr.record(caret("abc", 3), 501).expect("record");
        assert_eq!(mgr.depth(), 2);
    }

    #[test]
    fn test_sliding_window_follows_the_run() {
        // Third keystroke is out of window of the first entry's
        // original timestamp but in window of the second; coalescing
        // resets the timestamp so the run keeps merging.
        let mut mgr = manager();
        mgr.record(caret("a", 1), 0).expect("record");
        mgr.record(caret("ab", 2), 400).expect("record");
        mgr.record(caret("abc", 3), 800).expect("record");
        assert_eq!(mgr.depth(), 1);
        assert_eq!(mgr.current().map(|r| r.value.as_str()), Some("abc"));
    }

    #[test]
    fn test_backspace_run_coalesces() {
        let mut mgr = manager();
        mgr.record(caret("abc", 3), 0).expect("record");
        mgr.record(caret("ab", 2), 100).expect("record");
        mgr.record(caret("a", 1), 200).expect("record");
        assert_eq!(mgr.depth(), 1);
        assert_eq!(mgr.current().map(|r| r.value.as_str()), Some("a"));
    }

    #[test]
    fn test_large_delta_does_not_coalesce() {
        let mut mgr = manager();
        mgr.record(caret("", 0), 0).expect("record");
        // Five chars at once looks like a paste, not typing.
        mgr.record(caret("hello", 5), 100).expect("record");
        assert_eq!(mgr.depth(), 2);
    }

    #[test]
    fn test_same_length_replacement_does_not_coalesce() {
        let mut mgr = manager();
        mgr.record(caret("abc", 3), 0).expect("record");
        mgr.record(caret("abd", 3), 100).expect("record");
        assert_eq!(mgr.depth(), 2);
    }

    #[test]
    fn test_caret_jump_does_not_coalesce() {
        let mut mgr = manager();
        mgr.record(caret("abcdef", 6), 0).expect("record");
        // One char longer but the caret jumped to the front.
        mgr.record(caret("xabcdef", 1), 100).expect("record");
        assert_eq!(mgr.depth(), 2);
    }

    #[test]
    fn test_selection_carrying_candidate_does_not_coalesce() {
        let mut mgr = manager();
        mgr.record(caret("ab", 2), 0).expect("record");
        let selected = Record::new("abc", 0, 3).expect("valid");
        mgr.record(selected, 100).expect("record");
        assert_eq!(mgr.depth(), 2);
    }

    #[test]
    fn test_force_break_splits_run() {
        let mut mgr = manager();
        mgr.record(caret("a", 1), 0).expect("record");
        mgr.force_break();
        mgr.record(caret("ab", 2), 100).expect("record");
        assert_eq!(mgr.depth(), 2);
        // The break is one-shot: the next keystroke coalesces again.
        mgr.record(caret("abc", 3), 200).expect("record");
        assert_eq!(mgr.depth(), 2);
    }

    #[test]
    fn test_never_coalesces_below_the_top() {
        let mut mgr = manager();
        mgr.record(caret("a", 1), 0).expect("record");
        mgr.force_break();
        mgr.record(caret("ab", 2), 100).expect("record");
        mgr.undo().expect("undo");
        // In-window continuous edit, but offset is not at the top:
        // must truncate and append, never merge into "a".
        mgr.record(caret("ax", 2), 200).expect("record");
        assert_eq!(mgr.depth(), 2);
        assert_eq!(mgr.current().map(|r| r.value.as_str()), Some("ax"));
    }

    // ── Undo / redo ────────────────────────────────────────────────────

    #[test]
    fn test_undo_redo_round_trip() {
        let mut mgr = manager();
        mgr.record(caret("a", 1), 0).expect("record");
        let rec = caret("a big paste", 11);
        mgr.record(rec.clone(), 100).expect("record");

        let undone = mgr.undo().expect("undo");
        assert_eq!(undone.value, "a");
        let redone = mgr.redo().expect("redo");
        assert_eq!(redone, rec);
        assert_eq!(mgr.current(), Some(&rec));
    }

    #[test]
    fn test_undo_at_bottom_is_none() {
        let mut mgr = manager();
        assert!(mgr.undo().is_none());
        mgr.record(caret("a", 1), 0).expect("record");
        assert!(mgr.undo().is_none());
        assert_eq!(mgr.offset(), 0);
    }

    #[test]
    fn test_redo_at_top_is_none() {
        let mut mgr = manager();
        assert!(mgr.redo().is_none());
        mgr.record(caret("a", 1), 0).expect("record");
        assert!(mgr.redo().is_none());
        assert_eq!(mgr.offset(), 0);
    }

    #[test]
    fn test_undo_monotonic_never_below_zero() {
        let mut mgr = manager();
        for i in 0..5u64 {
            mgr.record(caret(&"x".repeat(10 * (i as usize + 1)), 0), i * 10_000)
                .expect("record");
        }
        let mut last_offset = mgr.offset();
        for _ in 0..10 {
            mgr.undo();
            assert!(mgr.offset() <= last_offset);
            last_offset = mgr.offset();
        }
        assert_eq!(mgr.offset(), 0);
        assert!(!mgr.can_undo());
    }

    #[test]
    fn test_can_undo_can_redo() {
        let mut mgr = manager();
        assert!(!mgr.can_undo());
        assert!(!mgr.can_redo());

        mgr.record(caret("a", 1), 0).expect("record");
        mgr.record(caret("a pasted block", 14), 100).expect("record");
        assert!(mgr.can_undo());
        assert!(!mgr.can_redo());

        mgr.undo().expect("undo");
        assert!(!mgr.can_undo());
        assert!(mgr.can_redo());
    }

    // ── Truncation ─────────────────────────────────────────────────────

    #[test]
    fn test_new_edit_after_undo_drops_redo_future() {
        let mut mgr = manager();
        mgr.record(caret("e0", 2), 0).expect("record");
        mgr.record(caret("e0 then e1", 10), 10_000).expect("record");
        mgr.record(caret("e0 then e1 then e2", 18), 20_000).expect("record");
        assert_eq!(mgr.depth(), 3);
        assert_eq!(mgr.offset(), 2);

        mgr.undo().expect("undo");
        mgr.undo().expect("undo");
        assert_eq!(mgr.offset(), 0);

        mgr.record(caret("e3 replaces the future", 22), 30_000)
            .expect("record");
        assert_eq!(mgr.depth(), 2);
        assert_eq!(mgr.offset(), 1);
        assert!(!mgr.can_redo());
        assert_eq!(
            mgr.current().map(|r| r.value.as_str()),
            Some("e3 replaces the future")
        );
    }

    // ── Depth cap ──────────────────────────────────────────────────────

    #[test]
    fn test_max_depth_evicts_oldest() {
        let config = HistoryConfig {
            max_depth: 4,
            ..HistoryConfig::default()
        };
        let mut mgr = HistoryManager::new(config);
        for i in 0..10u64 {
            mgr.record(caret(&format!("entry number {i}"), 0), i * 10_000)
                .expect("record");
            assert!(mgr.depth() <= 4);
            assert_eq!(mgr.offset(), mgr.depth() - 1);
        }
        assert_eq!(mgr.current().map(|r| r.value.as_str()), Some("entry number 9"));
        // Oldest entries are gone: undoing all the way lands on entry 6.
        while mgr.can_undo() {
            mgr.undo();
        }
        assert_eq!(mgr.current().map(|r| r.value.as_str()), Some("entry number 6"));
    }

    #[test]
    fn test_zero_max_depth_keeps_latest_entry() {
        // The config fields are public; a zero cap must not empty
        // the stack or underflow the offset.
        let config = HistoryConfig {
            max_depth: 0,
            ..HistoryConfig::default()
        };
        let mut mgr = HistoryManager::new(config);
        for i in 0..5u64 {
            mgr.record(caret(&format!("entry number {i}"), 0), i * 10_000)
                .expect("record");
            assert_eq!(mgr.depth(), 1);
            assert_eq!(mgr.offset(), 0);
        }
        assert_eq!(mgr.current().map(|r| r.value.as_str()), Some("entry number 4"));
    }

    // ── Misc ───────────────────────────────────────────────────────────

    #[test]
    fn test_clear_then_reseed() {
        let mut mgr = manager();
        mgr.record(caret("a", 1), 0).expect("record");
        mgr.record(caret("a pasted block", 14), 100).expect("record");
        mgr.clear();
        assert_eq!(mgr.depth(), 0);
        assert!(mgr.current().is_none());

        mgr.record(caret("fresh", 5), 200).expect("record");
        assert_eq!(mgr.depth(), 1);
        assert_eq!(mgr.offset(), 0);
    }

    #[test]
    fn test_seeded_constructor() {
        let mgr = HistoryManager::seeded(
            Record::initial("loaded content"),
            0,
            HistoryConfig::default(),
        )
        .expect("seed");
        assert_eq!(mgr.depth(), 1);
        assert_eq!(mgr.current().map(|r| r.value.as_str()), Some("loaded content"));
    }

    #[test]
    fn test_unicode_lengths_in_chars() {
        let mut mgr = manager();
        mgr.record(caret("héllo", 5), 0).expect("record");
        // One more char (two more bytes): still a one-char delta.
        mgr.record(caret("héllo!", 6), 100).expect("record");
        assert_eq!(mgr.depth(), 1);
    }
}
