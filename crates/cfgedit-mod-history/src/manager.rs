/// Core undo/redo manager.
///
/// Edits are recorded as operations and grouped by time window. The undo
/// stack is bounded by `HistoryConfig::max_history_depth`; the oldest groups
/// are dropped once the bound is exceeded.
use std::time::{Duration, Instant};

use crate::config::HistoryConfig;
use crate::operation::{EditGroup, EditOperation};

/// Manages undo/redo history for a single buffer.
pub struct UndoManager {
    /// Undo stack, oldest group first.
    undo_stack: Vec<EditGroup>,
    /// Redo stack, ordered with most-recently-undone on top.
    redo_stack: Vec<EditGroup>,
    /// Whether recording is active (set to false during undo/redo replay).
    recording: bool,
    /// Timestamp of the last recorded edit, used for grouping.
    last_edit_time: Option<Instant>,
    /// Configuration parameters.
    config: HistoryConfig,
}

impl std::fmt::Debug for UndoManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoManager")
            .field("undo_len", &self.undo_stack.len())
            .field("redo_len", &self.redo_stack.len())
            .field("recording", &self.recording)
            .finish()
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl UndoManager {
    /// Creates a new empty UndoManager.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            recording: true,
            last_edit_time: None,
            config,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Records an edit operation.
    ///
    /// Groups with the previous operation if within the grouping timeout.
    /// Clears the redo stack when a new edit is recorded.
    pub fn record(&mut self, op: EditOperation) {
        if !self.recording || op.is_noop() {
            return;
        }

        let now = Instant::now();
        let timeout = Duration::from_millis(self.config.group_timeout_ms);

        if let (Some(last_group), Some(last_time)) = (self.undo_stack.last_mut(), self.last_edit_time) {
            if now.duration_since(last_time) < timeout {
                last_group.operations.push(op);
                self.last_edit_time = Some(now);
                self.redo_stack.clear();
                return;
            }
        }

        self.undo_stack.push(EditGroup {
            operations: vec![op],
        });
        self.last_edit_time = Some(now);
        self.redo_stack.clear();

        if self.undo_stack.len() > self.config.max_history_depth {
            let excess = self.undo_stack.len() - self.config.max_history_depth;
            self.undo_stack.drain(..excess);
            tracing::trace!(excess, "evicted oldest undo groups");
        }
    }

    /// Forces a group break so the next edit starts a new undo group.
    pub fn force_group_break(&mut self) {
        self.last_edit_time = None;
    }

    /// Undoes the most recent group.
    ///
    /// Returns the operations that should be applied in reverse order
    /// to undo the edit. Returns `None` if there's nothing to undo.
    pub fn undo(&mut self) -> Option<Vec<EditOperation>> {
        let group = self.undo_stack.pop()?;
        let ops = group.operations.clone();
        self.redo_stack.push(group);
        self.last_edit_time = None;
        Some(ops)
    }

    /// Redoes the most recently undone group.
    ///
    /// Returns the operations that should be applied in forward order.
    /// Returns `None` if there's nothing to redo.
    pub fn redo(&mut self) -> Option<Vec<EditOperation>> {
        let group = self.redo_stack.pop()?;
        let ops = group.operations.clone();
        self.undo_stack.push(group);
        self.last_edit_time = None;
        Some(ops)
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo steps currently stored.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Temporarily disables recording (used during undo/redo replay).
    pub fn pause_recording(&mut self) {
        self.recording = false;
    }

    /// Re-enables recording after a pause.
    pub fn resume_recording(&mut self) {
        self.recording = true;
    }

    /// Clears all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.last_edit_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_op(pos: usize, inserted: &str, deleted: &str) -> EditOperation {
        EditOperation {
            position: pos,
            inserted: inserted.to_string(),
            deleted: deleted.to_string(),
            cursor_before: pos,
            cursor_after: pos + inserted.chars().count(),
        }
    }

    #[test]
    fn test_undo_redo_basic() {
        let mut mgr = UndoManager::default();
        mgr.record(make_op(0, "a", ""));
        mgr.force_group_break();
        mgr.record(make_op(1, "b", ""));

        assert!(mgr.can_undo());
        let ops = mgr.undo().expect("undo");
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].inserted, "b");

        assert!(mgr.can_redo());
        let ops = mgr.redo().expect("redo");
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].inserted, "b");
    }

    #[test]
    fn test_redo_cleared_on_new_edit() {
        let mut mgr = UndoManager::default();
        mgr.record(make_op(0, "a", ""));
        mgr.force_group_break();
        mgr.record(make_op(1, "b", ""));

        mgr.undo();
        assert!(mgr.can_redo());

        mgr.record(make_op(1, "c", ""));
        assert!(!mgr.can_redo());
    }

    #[test]
    fn test_empty_history() {
        let mut mgr = UndoManager::default();
        assert!(!mgr.can_undo());
        assert!(!mgr.can_redo());
        assert!(mgr.undo().is_none());
        assert!(mgr.redo().is_none());
    }

    #[test]
    fn test_pause_recording() {
        let mut mgr = UndoManager::default();
        mgr.pause_recording();
        mgr.record(make_op(0, "a", ""));
        assert!(!mgr.can_undo());

        mgr.resume_recording();
        mgr.record(make_op(0, "b", ""));
        assert!(mgr.can_undo());
    }

    #[test]
    fn test_noop_not_recorded() {
        let mut mgr = UndoManager::default();
        mgr.record(make_op(0, "", ""));
        assert!(!mgr.can_undo());
    }

    #[test]
    fn test_edits_within_timeout_are_grouped() {
        let mut mgr = UndoManager::default();
        mgr.record(make_op(0, "a", ""));
        mgr.record(make_op(1, "b", ""));

        let ops = mgr.undo().expect("undo");
        assert_eq!(ops.len(), 2);
        assert!(!mgr.can_undo());
    }

    #[test]
    fn test_zero_timeout_never_groups() {
        let mut mgr = UndoManager::new(HistoryConfig::new(10, 0));
        mgr.record(make_op(0, "a", ""));
        mgr.record(make_op(1, "b", ""));
        assert_eq!(mgr.undo_depth(), 2);
    }

    #[test]
    fn test_force_group_break_separates_groups() {
        let mut mgr = UndoManager::default();

        mgr.record(make_op(0, "a", ""));
        mgr.force_group_break();
        mgr.record(make_op(1, "b", ""));

        let ops = mgr.undo().expect("undo");
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].inserted, "b");

        assert!(mgr.can_undo());
        let ops = mgr.undo().expect("undo");
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].inserted, "a");
    }

    #[test]
    fn test_clear() {
        let mut mgr = UndoManager::default();
        mgr.record(make_op(0, "a", ""));
        mgr.undo();
        mgr.clear();
        assert!(!mgr.can_undo());
        assert!(!mgr.can_redo());
    }

    #[test]
    fn test_history_after_clear_starts_fresh() {
        let mut mgr = UndoManager::new(HistoryConfig::new(10, 0));
        mgr.record(make_op(0, "old", ""));
        mgr.clear();
        mgr.record(make_op(0, "new", ""));
        assert_eq!(mgr.undo_depth(), 1);
        assert_eq!(mgr.undo().expect("undo")[0].inserted, "new");
        assert!(!mgr.can_undo());
        assert_eq!(format!("{mgr:?}"), "UndoManager { undo_len: 0, redo_len: 1, recording: true }");
    }

    #[test]
    fn test_max_depth_enforced() {
        let mut mgr = UndoManager::new(HistoryConfig::new(10, 500));

        for i in 0..20 {
            mgr.force_group_break();
            mgr.record(make_op(i, &format!("op{i}"), ""));
        }

        assert_eq!(mgr.undo_depth(), 10);
        // Oldest surviving group is op10
        let mut last = None;
        while let Some(ops) = mgr.undo() {
            last = Some(ops);
        }
        assert_eq!(last.expect("at least one group")[0].inserted, "op10");
    }
}
