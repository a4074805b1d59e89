/// Application configuration for the editing core.
pub mod config;

pub use config::EditorConfig;
