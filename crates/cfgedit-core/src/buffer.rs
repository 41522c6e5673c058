/// Text buffer wrapping `ropey::Rope`.
///
/// All offsets are char indices. Lines are separated by `\n` only, so line
/// `i` of the buffer is exactly the `i`-th segment of `text.split('\n')`.
use std::fmt;

use anyhow::{bail, Result};
use ropey::{Rope, RopeSlice};

/// A text buffer backed by a rope.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Number of lines. An empty buffer has one (empty) line, and a trailing
    /// `\n` opens a new empty line.
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Replaces the whole content.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    fn check_line(&self, line_idx: usize) -> Result<()> {
        if line_idx >= self.rope.len_lines() {
            bail!(
                "line index {} out of bounds (buffer has {} lines)",
                line_idx,
                self.rope.len_lines()
            );
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end {
            bail!("invalid range: start ({}) > end ({})", start, end);
        }
        if end > self.rope.len_chars() {
            bail!(
                "range end {} out of bounds (buffer has {} chars)",
                end,
                self.rope.len_chars()
            );
        }
        Ok(())
    }

    /// Returns a line including its trailing `\n`, if any.
    pub fn line(&self, line_idx: usize) -> Result<RopeSlice<'_>> {
        self.check_line(line_idx)?;
        Ok(self.rope.line(line_idx))
    }

    /// Returns a line's text without its trailing `\n`.
    pub fn line_text(&self, line_idx: usize) -> Result<String> {
        let start = self.line_to_char(line_idx)?;
        let len = self.line_len_chars(line_idx)?;
        Ok(self.rope.slice(start..start + len).to_string())
    }

    /// Iterates over every line's text without line terminators.
    pub fn line_texts(&self) -> impl Iterator<Item = String> + '_ {
        self.rope.lines().map(|line| {
            let mut s = line.to_string();
            if s.ends_with('\n') {
                s.pop();
            }
            s
        })
    }

    pub fn line_to_char(&self, line_idx: usize) -> Result<usize> {
        self.check_line(line_idx)?;
        Ok(self.rope.line_to_char(line_idx))
    }

    /// Line containing `char_idx`. The past-the-end index is allowed.
    pub fn char_to_line(&self, char_idx: usize) -> Result<usize> {
        if char_idx > self.rope.len_chars() {
            bail!(
                "char index {} out of bounds (buffer has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        Ok(self.rope.char_to_line(char_idx))
    }

    pub fn char_at(&self, char_idx: usize) -> Result<char> {
        if char_idx >= self.rope.len_chars() {
            bail!(
                "char index {} out of bounds (buffer has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        Ok(self.rope.char(char_idx))
    }

    /// Length of a line in chars, excluding the trailing `\n`.
    pub fn line_len_chars(&self, line_idx: usize) -> Result<usize> {
        let line = self.line(line_idx)?;
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            return Ok(len - 1);
        }
        Ok(len)
    }

    pub fn byte_to_char(&self, byte_idx: usize) -> Result<usize> {
        if byte_idx > self.rope.len_bytes() {
            bail!(
                "byte index {} out of bounds (buffer has {} bytes)",
                byte_idx,
                self.rope.len_bytes()
            );
        }
        Ok(self.rope.byte_to_char(byte_idx))
    }

    pub fn insert(&mut self, char_idx: usize, text: &str) -> Result<()> {
        if char_idx > self.rope.len_chars() {
            bail!(
                "insert position {} out of bounds (buffer has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        self.rope.insert(char_idx, text);
        Ok(())
    }

    /// Removes `[start..end)`.
    pub fn remove(&mut self, start: usize, end: usize) -> Result<()> {
        self.check_range(start, end)?;
        self.rope.remove(start..end);
        Ok(())
    }

    pub fn slice(&self, start: usize, end: usize) -> Result<RopeSlice<'_>> {
        self.check_range(start, end)?;
        Ok(self.rope.slice(start..end))
    }

    pub fn replace(&mut self, start: usize, end: usize, text: &str) -> Result<()> {
        self.remove(start, end)?;
        self.insert(start, text)
    }
}
