/// Selection bounds within a document.

/// A selection range in char offsets, `start <= end`.
///
/// A collapsed selection (`start == end`) is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Start of the selection (char offset).
    pub start: usize,
    /// End of the selection (char offset).
    pub end: usize,
}

impl Selection {
    /// A collapsed selection at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    /// Whether the selection is collapsed to a caret.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of chars covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_is_empty() {
        let sel = Selection::caret(4);
        assert!(sel.is_empty());
        assert_eq!(sel.len(), 0);
    }

    #[test]
    fn test_range_len() {
        let sel = Selection { start: 2, end: 7 };
        assert!(!sel.is_empty());
        assert_eq!(sel.len(), 5);
    }
}
