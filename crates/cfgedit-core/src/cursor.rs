/// Cursor model: a char offset into the buffer with derived line/column.
use anyhow::{Context, Result};

use crate::buffer::TextBuffer;

/// A line/column pair, both 0-indexed. `col` is a char offset within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line.cmp(&other.line).then(self.col.cmp(&other.col))
    }
}

/// Cursor state. `offset` is always kept within `[0, len_chars]` by the
/// movement methods; call [`Cursor::clamp`] after editing the buffer directly.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    pub offset: usize,
    /// Pixel x of the cursor within its line, refreshed by the editor after
    /// every move or edit.
    pub last_visual_x: i32,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived line and column.
    pub fn position(&self, buffer: &TextBuffer) -> Position {
        char_to_pos(buffer, self.offset)
    }

    pub fn clamp(&mut self, buffer: &TextBuffer) {
        self.offset = self.offset.min(buffer.len_chars());
    }

    pub fn move_to(&mut self, offset: usize, buffer: &TextBuffer) {
        self.offset = offset.min(buffer.len_chars());
    }

    pub fn move_left(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn move_right(&mut self, buffer: &TextBuffer) {
        self.offset = (self.offset + 1).min(buffer.len_chars());
    }

    /// Moves to the previous line, clamping the column to that line's length.
    /// No-op on the first line.
    pub fn move_up(&mut self, buffer: &TextBuffer) {
        let pos = self.position(buffer);
        if pos.line == 0 {
            return;
        }
        self.jump_to_line(pos.line - 1, pos.col, buffer);
    }

    /// Moves to the next line, clamping the column to that line's length.
    /// No-op on the last line.
    pub fn move_down(&mut self, buffer: &TextBuffer) {
        let pos = self.position(buffer);
        if pos.line + 1 >= buffer.len_lines() {
            return;
        }
        self.jump_to_line(pos.line + 1, pos.col, buffer);
    }

    fn jump_to_line(&mut self, line: usize, col: usize, buffer: &TextBuffer) {
        self.offset = pos_to_char(buffer, Position::new(line, col)).unwrap_or(self.offset);
    }

    pub fn move_to_line_start(&mut self, buffer: &TextBuffer) {
        let line = self.position(buffer).line;
        self.offset = buffer.line_to_char(line).unwrap_or(0);
    }

    pub fn move_to_line_end(&mut self, buffer: &TextBuffer) {
        let line = self.position(buffer).line;
        let start = buffer.line_to_char(line).unwrap_or(0);
        self.offset = start + buffer.line_len_chars(line).unwrap_or(0);
    }

    pub fn move_to_start(&mut self) {
        self.offset = 0;
    }

    pub fn move_to_end(&mut self, buffer: &TextBuffer) {
        self.offset = buffer.len_chars();
    }
}

/// Converts a `Position` to a char index, clamping it to the buffer first.
pub fn pos_to_char(buffer: &TextBuffer, pos: Position) -> Result<usize> {
    let clamped = clamp_position(pos, buffer);
    let line_start = buffer
        .line_to_char(clamped.line)
        .context("converting position to char index")?;
    Ok(line_start + clamped.col)
}

/// Converts a char index to a `Position`. Out-of-range indices clamp to the end.
pub fn char_to_pos(buffer: &TextBuffer, char_idx: usize) -> Position {
    let clamped = char_idx.min(buffer.len_chars());
    let line = buffer.char_to_line(clamped).unwrap_or(0);
    let line_start = buffer.line_to_char(line).unwrap_or(0);
    Position::new(line, clamped - line_start)
}

fn clamp_position(pos: Position, buffer: &TextBuffer) -> Position {
    let line = pos.line.min(buffer.len_lines().saturating_sub(1));
    let col = pos.col.min(buffer.line_len_chars(line).unwrap_or(0));
    Position::new(line, col)
}
