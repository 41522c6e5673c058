/// Core types for edit operations and groups.

/// A single atomic edit operation that can be undone/redone.
///
/// Positions are char offsets into the buffer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Char index where the edit occurred.
    pub position: usize,
    /// Text that was inserted (empty for pure deletions).
    pub inserted: String,
    /// Text that was deleted (empty for pure insertions).
    pub deleted: String,
    /// Cursor offset before the edit.
    pub cursor_before: usize,
    /// Cursor offset after the edit.
    pub cursor_after: usize,
}

impl EditOperation {
    /// An operation that inserted `text` at `position`.
    pub fn insertion(position: usize, text: &str, cursor_before: usize, cursor_after: usize) -> Self {
        Self {
            position,
            inserted: text.to_string(),
            deleted: String::new(),
            cursor_before,
            cursor_after,
        }
    }

    /// An operation that removed `text` starting at `position`.
    pub fn deletion(position: usize, text: &str, cursor_before: usize, cursor_after: usize) -> Self {
        Self {
            position,
            inserted: String::new(),
            deleted: text.to_string(),
            cursor_before,
            cursor_after,
        }
    }

    /// Returns true if the operation changes nothing.
    pub fn is_noop(&self) -> bool {
        self.inserted == self.deleted
    }
}

/// A group of operations that form a single undo step.
///
/// Consecutive edits within the grouping timeout are merged into
/// one group so they undo/redo as a single action.
#[derive(Debug, Clone)]
pub struct EditGroup {
    /// Operations in this group, in chronological order.
    pub operations: Vec<EditOperation>,
}
