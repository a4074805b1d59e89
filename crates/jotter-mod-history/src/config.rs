/// Configuration parameters for the history system.

/// Time window in milliseconds for coalescing consecutive edits
/// into a single undo step.
const DEFAULT_COALESCE_WINDOW_MS: u64 = 500;

/// Largest per-edit length change (in chars) still treated as part
/// of a continuous typing run. A single keystroke changes length by
/// 1; an auto-closed pair by 2. Larger jumps look like pastes.
const DEFAULT_MAX_RUN_DELTA: usize = 4;

/// Maximum number of entries on the undo stack. Oldest entries are
/// evicted when this limit is exceeded.
const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Configuration for the history system.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Coalescing window in milliseconds.
    pub coalesce_window_ms: u64,
    /// Max length delta (chars) for an edit to join a typing run.
    pub max_run_delta: usize,
    /// Max entries on the stack before oldest-first eviction.
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            coalesce_window_ms: DEFAULT_COALESCE_WINDOW_MS,
            max_run_delta: DEFAULT_MAX_RUN_DELTA,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
