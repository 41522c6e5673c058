// Integration tests for the history system.
//
// These tests replay recorded operations against a plain string the way the
// editor does, checking that undo and redo restore the exact text.

use cfgedit_mod_history::{EditOperation, HistoryConfig, UndoManager};

/// Applies an operation forward to `text` (char offsets).
fn apply(text: &mut String, op: &EditOperation) {
    let mut chars: Vec<char> = text.chars().collect();
    let del = op.deleted.chars().count();
    chars.splice(op.position..op.position + del, op.inserted.chars());
    *text = chars.into_iter().collect();
}

/// Reverts an operation on `text`.
fn revert(text: &mut String, op: &EditOperation) {
    let mut chars: Vec<char> = text.chars().collect();
    let ins = op.inserted.chars().count();
    chars.splice(op.position..op.position + ins, op.deleted.chars());
    *text = chars.into_iter().collect();
}

fn no_grouping() -> HistoryConfig {
    HistoryConfig::new(100, 0)
}

// ── Full Workflow ──────────────────────────────────────────────────────

#[test]
fn test_typing_then_undo_everything_restores_original() {
    let mut mgr = UndoManager::new(no_grouping());
    let mut text = String::from("{}");

    for (i, ch) in ["\"", "a", "\"", ":", " ", "1"].iter().enumerate() {
        let op = EditOperation::insertion(1 + i, ch, 1 + i, 2 + i);
        apply(&mut text, &op);
        mgr.record(op);
    }
    assert_eq!(text, "{\"a\": 1}");

    while let Some(ops) = mgr.undo() {
        for op in ops.iter().rev() {
            revert(&mut text, op);
        }
    }
    assert_eq!(text, "{}");
}

#[test]
fn test_undo_then_redo_round_trip() {
    let mut mgr = UndoManager::new(no_grouping());
    let mut text = String::from("hello world");

    let del = EditOperation::deletion(5, " world", 11, 5);
    apply(&mut text, &del);
    mgr.record(del);
    let ins = EditOperation::insertion(5, "!", 5, 6);
    apply(&mut text, &ins);
    mgr.record(ins);
    assert_eq!(text, "hello!");

    for op in mgr.undo().expect("undo").iter().rev() {
        revert(&mut text, op);
    }
    assert_eq!(text, "hello");

    for op in mgr.undo().expect("undo").iter().rev() {
        revert(&mut text, op);
    }
    assert_eq!(text, "hello world");

    for op in &mgr.redo().expect("redo") {
        apply(&mut text, op);
    }
    assert_eq!(text, "hello");
    assert!(mgr.can_redo());
}

// ── Grouping ───────────────────────────────────────────────────────────

#[test]
fn test_grouped_burst_undoes_as_one_step() {
    let mut mgr = UndoManager::new(HistoryConfig::new(100, 60_000));
    let mut text = String::new();

    for (i, ch) in "abc".chars().enumerate() {
        let op = EditOperation::insertion(i, &ch.to_string(), i, i + 1);
        apply(&mut text, &op);
        mgr.record(op);
    }

    let ops = mgr.undo().expect("undo");
    assert_eq!(ops.len(), 3);
    for op in ops.iter().rev() {
        revert(&mut text, op);
    }
    assert!(text.is_empty());
    assert!(!mgr.can_undo());
}

// ── Edge Cases ─────────────────────────────────────────────────────────

#[test]
fn test_multibyte_operations_use_char_offsets() {
    let mut mgr = UndoManager::new(no_grouping());
    let mut text = String::from("héllo");

    let op = EditOperation::deletion(1, "é", 2, 1);
    apply(&mut text, &op);
    mgr.record(op);
    assert_eq!(text, "hllo");

    for op in mgr.undo().expect("undo").iter().rev() {
        revert(&mut text, op);
    }
    assert_eq!(text, "héllo");
}

#[test]
fn test_depth_bound_keeps_most_recent_steps() {
    let mut mgr = UndoManager::new(HistoryConfig::new(3, 0));
    for i in 0..5 {
        mgr.record(EditOperation::insertion(i, "x", i, i + 1));
    }
    assert_eq!(mgr.undo_depth(), 3);

    let mut positions = Vec::new();
    while let Some(ops) = mgr.undo() {
        positions.push(ops[0].position);
    }
    assert_eq!(positions, vec![4, 3, 2]);
}

#[test]
fn test_redo_cleared_on_new_edit_after_undo() {
    let mut mgr = UndoManager::new(no_grouping());
    mgr.record(EditOperation::insertion(0, "a", 0, 1));
    mgr.record(EditOperation::insertion(1, "b", 1, 2));
    mgr.undo();
    assert!(mgr.can_redo());

    mgr.record(EditOperation::insertion(1, "c", 1, 2));
    assert!(!mgr.can_redo());
    assert_eq!(mgr.undo().expect("undo")[0].inserted, "c");
}
