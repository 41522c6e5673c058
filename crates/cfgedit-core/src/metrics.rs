/// Maps char indices within a line to pixel offsets and back, using a
/// caller-supplied text measurement.
///
/// Widths are summed token by token, so a renderer that draws each token
/// separately lands its glyphs exactly where these functions say.
use crate::file_type::FileType;
use crate::highlight::{tokenize, Token};

/// Measures the rendered width of a string, in pixels.
pub trait TextMeasure {
    fn width(&self, s: &str) -> i32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> i32,
{
    fn width(&self, s: &str) -> i32 {
        self(s)
    }
}

/// Fixed-width measurement: every char is `char_width` pixels wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monospace {
    pub char_width: i32,
}

impl Monospace {
    pub fn new(char_width: i32) -> Self {
        Self { char_width }
    }
}

impl TextMeasure for Monospace {
    fn width(&self, s: &str) -> i32 {
        let chars = i32::try_from(s.chars().count()).unwrap_or(i32::MAX);
        chars.saturating_mul(self.char_width)
    }
}

/// One line tokenized once, ready for repeated width queries.
#[derive(Debug, Clone)]
pub struct LineLayout {
    tokens: Vec<Token>,
    len_chars: usize,
}

impl LineLayout {
    pub fn new(file_type: FileType, line: &str) -> Self {
        Self {
            tokens: tokenize(file_type, line),
            len_chars: line.chars().count(),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn len_chars(&self) -> usize {
        self.len_chars
    }

    pub fn text_width(&self, measure: &(impl TextMeasure + ?Sized)) -> i32 {
        self.tokens.iter().map(|t| measure.width(&t.text)).sum()
    }

    /// Width of the first `char_index` chars. Indices past the end give the
    /// full line width.
    pub fn width_up_to_char(
        &self,
        measure: &(impl TextMeasure + ?Sized),
        char_index: usize,
    ) -> i32 {
        if char_index == 0 {
            return 0;
        }
        let mut width = 0;
        let mut consumed = 0;
        for token in &self.tokens {
            let len = token.len_chars();
            if consumed + len >= char_index {
                let head: String = token.text.chars().take(char_index - consumed).collect();
                return width + measure.width(&head);
            }
            width += measure.width(&token.text);
            consumed += len;
        }
        width
    }

    /// First char index whose prefix width reaches `x`, or the line length
    /// when `x` lies beyond the end of the line.
    pub fn char_index_from_x(&self, measure: &(impl TextMeasure + ?Sized), x: i32) -> usize {
        (0..=self.len_chars)
            .find(|&i| self.width_up_to_char(measure, i) >= x)
            .unwrap_or(self.len_chars)
    }
}

pub fn text_width(
    file_type: FileType,
    line: &str,
    measure: &(impl TextMeasure + ?Sized),
) -> i32 {
    LineLayout::new(file_type, line).text_width(measure)
}

pub fn width_up_to_char(
    file_type: FileType,
    line: &str,
    char_index: usize,
    measure: &(impl TextMeasure + ?Sized),
) -> i32 {
    LineLayout::new(file_type, line).width_up_to_char(measure, char_index)
}

pub fn char_index_from_x(
    file_type: FileType,
    line: &str,
    x: i32,
    measure: &(impl TextMeasure + ?Sized),
) -> usize {
    LineLayout::new(file_type, line).char_index_from_x(measure, x)
}
