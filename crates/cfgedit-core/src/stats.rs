/// Character, word and line counts for the status line.
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    pub chars: usize,
    pub words: usize,
    pub lines: usize,
}

impl TextStats {
    /// Counts `text`. Trailing empty lines are not counted, so a final
    /// newline does not add a line and empty text has zero lines.
    pub fn of(text: &str) -> Self {
        let segments: Vec<&str> = text.split('\n').collect();
        let lines = segments
            .iter()
            .rposition(|s| !s.is_empty())
            .map_or(0, |last| last + 1);
        Self {
            chars: text.chars().count(),
            words: text.split_whitespace().count(),
            lines,
        }
    }
}

impl fmt::Display for TextStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "letter: {} | words: {} | Lines: {}",
            self.chars, self.words, self.lines
        )
    }
}
