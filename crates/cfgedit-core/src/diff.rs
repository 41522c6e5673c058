/// Line-based diff between two snapshots of a document.
///
/// The walk is greedy: at each mismatch a line that never reappears on the
/// other side is reported as added or deleted, otherwise the pair is
/// reported as a deletion followed by an addition. The result is not a
/// minimal edit script.
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Unchanged,
    Added,
    Deleted,
    /// Reserved for line-level modification detection; `diff` never emits it.
    Modified,
}

/// One line of diff output. Line numbers are 1-based and absent on the side
/// the line does not exist on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
    pub old_content: String,
    pub new_content: String,
    pub kind: ChangeKind,
}

impl DiffLine {
    fn unchanged(old: usize, new: usize, content: &str) -> Self {
        Self {
            old_line: Some(old + 1),
            new_line: Some(new + 1),
            old_content: content.to_string(),
            new_content: content.to_string(),
            kind: ChangeKind::Unchanged,
        }
    }

    fn added(new: usize, content: &str) -> Self {
        Self {
            old_line: None,
            new_line: Some(new + 1),
            old_content: String::new(),
            new_content: content.to_string(),
            kind: ChangeKind::Added,
        }
    }

    fn deleted(old: usize, content: &str) -> Self {
        Self {
            old_line: Some(old + 1),
            new_line: None,
            old_content: content.to_string(),
            new_content: String::new(),
            kind: ChangeKind::Deleted,
        }
    }

    /// The text to show for this line: old content for deletions, new
    /// content otherwise.
    pub fn display_content(&self) -> &str {
        match self.kind {
            ChangeKind::Deleted => &self.old_content,
            _ => &self.new_content,
        }
    }
}

/// Lines of `text` still ahead of a cursor, counted by content.
struct Remaining<'a> {
    counts: HashMap<&'a str, usize>,
}

impl<'a> Remaining<'a> {
    fn new(lines: &[&'a str]) -> Self {
        let mut counts = HashMap::new();
        for line in lines {
            *counts.entry(*line).or_insert(0) += 1;
        }
        Self { counts }
    }

    fn contains(&self, line: &str) -> bool {
        self.counts.get(line).is_some_and(|&n| n > 0)
    }

    fn consume(&mut self, line: &str) {
        if let Some(n) = self.counts.get_mut(line) {
            *n = n.saturating_sub(1);
        }
    }
}

/// Diffs `old` against `new` line by line (lines split on `\n`).
pub fn diff(old: &str, new: &str) -> Vec<DiffLine> {
    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();
    let mut old_ahead = Remaining::new(&old_lines);
    let mut new_ahead = Remaining::new(&new_lines);

    let mut out = Vec::with_capacity(old_lines.len().max(new_lines.len()));
    let (mut oi, mut ni) = (0, 0);

    while oi < old_lines.len() || ni < new_lines.len() {
        let o = old_lines.get(oi).copied();
        let n = new_lines.get(ni).copied();

        match (o, n) {
            (Some(o), Some(n)) if o == n => {
                out.push(DiffLine::unchanged(oi, ni, o));
                old_ahead.consume(o);
                new_ahead.consume(n);
                oi += 1;
                ni += 1;
            }
            (_, Some(n)) if !old_ahead.contains(n) => {
                out.push(DiffLine::added(ni, n));
                new_ahead.consume(n);
                ni += 1;
            }
            (Some(o), _) if !new_ahead.contains(o) => {
                out.push(DiffLine::deleted(oi, o));
                old_ahead.consume(o);
                oi += 1;
            }
            _ => {
                if let Some(o) = o {
                    out.push(DiffLine::deleted(oi, o));
                    old_ahead.consume(o);
                    oi += 1;
                }
                if let Some(n) = n {
                    out.push(DiffLine::added(ni, n));
                    new_ahead.consume(n);
                    ni += 1;
                }
            }
        }
    }

    out
}

/// Per-kind line counts of a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub added: usize,
    pub deleted: usize,
    pub modified: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    pub fn of(lines: &[DiffLine]) -> Self {
        lines.iter().fold(Self::default(), |mut s, line| {
            match line.kind {
                ChangeKind::Added => s.added += 1,
                ChangeKind::Deleted => s.deleted += 1,
                ChangeKind::Modified => s.modified += 1,
                ChangeKind::Unchanged => s.unchanged += 1,
            }
            s
        })
    }

    pub fn has_changes(&self) -> bool {
        self.added + self.deleted + self.modified > 0
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "changed: +{} -{} ~{} ={}",
            self.added, self.deleted, self.modified, self.unchanged
        )
    }
}

/// Rebuilds text from a diff. With `accept_all` every line is kept;
/// otherwise deleted lines are dropped. Each kept line uses its new content,
/// or its old content when the new one is empty.
pub fn apply_diff(lines: &[DiffLine], accept_all: bool) -> String {
    lines
        .iter()
        .filter(|line| accept_all || line.kind != ChangeKind::Deleted)
        .map(|line| {
            if line.new_content.is_empty() {
                line.old_content.as_str()
            } else {
                line.new_content.as_str()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(lines: &[DiffLine]) -> Vec<ChangeKind> {
        lines.iter().map(|l| l.kind).collect()
    }

    #[test]
    fn test_identical_text_is_all_unchanged() {
        for text in ["", "a", "a\nb\nc", "{\n  \"x\": 1\n}\n", "dup\ndup\ndup"] {
            let d = diff(text, text);
            assert_eq!(d.len(), text.split('\n').count());
            assert!(d.iter().all(|l| l.kind == ChangeKind::Unchanged));
            assert_eq!(d[0].old_line, Some(1));
            assert_eq!(d[0].new_line, Some(1));
        }
    }

    #[test]
    fn test_pure_insertion() {
        let d = diff("a\nc", "a\nb\nc");
        assert_eq!(
            kinds(&d),
            vec![ChangeKind::Unchanged, ChangeKind::Added, ChangeKind::Unchanged]
        );
        assert_eq!(d[1].new_line, Some(2));
        assert_eq!(d[1].old_line, None);
        assert_eq!(d[2].old_line, Some(2));
        assert_eq!(d[2].new_line, Some(3));
    }

    #[test]
    fn test_pure_deletion() {
        let d = diff("a\nb\nc", "a\nc");
        assert_eq!(
            kinds(&d),
            vec![ChangeKind::Unchanged, ChangeKind::Deleted, ChangeKind::Unchanged]
        );
        assert_eq!(d[1].display_content(), "b");
    }

    #[test]
    fn test_changed_line_is_add_then_delete() {
        // `y` never appears in old, so it is reported first.
        let d = diff("a\nx\nc", "a\ny\nc");
        assert_eq!(
            kinds(&d),
            vec![
                ChangeKind::Unchanged,
                ChangeKind::Added,
                ChangeKind::Deleted,
                ChangeKind::Unchanged
            ]
        );
    }

    #[test]
    fn test_swapped_lines_delete_then_add() {
        // Both lines reappear on the other side, so the first pair is
        // reported as delete+add and the rest fall out as leftovers.
        let d = diff("a\nb", "b\na");
        assert_eq!(
            kinds(&d),
            vec![
                ChangeKind::Deleted,
                ChangeKind::Added,
                ChangeKind::Added,
                ChangeKind::Deleted
            ]
        );
        assert_eq!(d[0].old_content, "a");
        assert_eq!(d[1].new_content, "b");
        assert_eq!(d[2].new_content, "a");
        assert_eq!(d[3].old_content, "b");
    }

    #[test]
    fn test_modified_is_never_produced() {
        let d = diff("k=1\nz=2\nq", "k=2\nz=3\nw");
        assert!(d.iter().all(|l| l.kind != ChangeKind::Modified));
    }

    #[test]
    fn test_summary() {
        let d = diff("a\nb\nc", "a\nc\nd");
        let summary = DiffSummary::of(&d);
        assert_eq!(summary.to_string(), "changed: +1 -1 ~0 =2");
        assert!(summary.has_changes());
        assert!(!DiffSummary::of(&diff("x", "x")).has_changes());
    }

    #[test]
    fn test_apply_diff() {
        let d = diff("a\nb\nc", "a\nc\nd");
        assert_eq!(apply_diff(&d, false), "a\nc\nd");
        assert_eq!(apply_diff(&d, true), "a\nb\nc\nd");
    }
}
