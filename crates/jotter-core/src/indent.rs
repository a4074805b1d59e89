/// Indent style configuration.
use serde::{Deserialize, Serialize};

/// Indentation style for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndentStyle {
    /// Use N spaces for indentation.
    Spaces(usize),
    /// Use a tab character for indentation.
    Tabs,
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self::Spaces(4)
    }
}

impl IndentStyle {
    /// Returns the string to insert for one level of indentation.
    pub fn indent_text(&self) -> String {
        match self {
            Self::Spaces(n) => " ".repeat(*n),
            Self::Tabs => "\t".to_string(),
        }
    }
}
