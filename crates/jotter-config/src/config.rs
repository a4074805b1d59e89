/// Editor configuration: load, save, and sanitize.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use jotter_core::{IndentStyle, Keymap};
use jotter_mod_history::HistoryConfig;

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Coalescing window for undo grouping, in milliseconds.
    pub coalesce_window_ms: u64,
    /// Max per-edit length change (chars) still coalesced as typing.
    pub max_run_delta: usize,
    /// Max undo entries before oldest-first eviction.
    pub max_history_depth: usize,
    pub indent_style: IndentStyle,
    pub auto_close_pairs: bool,
    pub tab_inserts_indent: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            coalesce_window_ms: 500,
            max_run_delta: 4,
            max_history_depth: 10_000,
            indent_style: IndentStyle::default(),
            auto_close_pairs: true,
            tab_inserts_indent: true,
        }
    }
}

impl EditorConfig {
    /// Returns the config file path: exe directory + `jotter.json`.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("jotter.json")))
            .unwrap_or_else(|| PathBuf::from("jotter.json"))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (a broken file is never overwritten).
    pub fn load_or_create(path: &std::path::Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<EditorConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Clamps values to valid ranges.
    pub fn sanitize(&mut self) {
        self.coalesce_window_ms = self.coalesce_window_ms.min(10_000);
        self.max_run_delta = self.max_run_delta.max(1);
        self.max_history_depth = self.max_history_depth.max(2);
        if let IndentStyle::Spaces(n) = self.indent_style {
            self.indent_style = IndentStyle::Spaces(n.clamp(1, 16));
        }
    }

    /// Converts the history-related fields into a `HistoryConfig`.
    pub fn history_config(&self) -> HistoryConfig {
        HistoryConfig {
            coalesce_window_ms: self.coalesce_window_ms,
            max_run_delta: self.max_run_delta,
            max_depth: self.max_history_depth,
        }
    }

    /// Builds the keymap described by this config.
    pub fn keymap(&self) -> Keymap {
        Keymap {
            tab_inserts_indent: self.tab_inserts_indent,
            auto_close_pairs: self.auto_close_pairs,
        }
    }
}
