/// Editor state: buffer, cursor, viewport and everything derived from them.
///
/// Input events map onto methods here and the renderer reads the results
/// back through the accessors. Every text mutation notifies the change
/// listener, re-validates JSON documents and refreshes an active search.
use std::fmt;

use cfgedit_config::EditorConfig;
use cfgedit_mod_history::{EditOperation, HistoryConfig, UndoManager};

use crate::brackets::auto_pair;
use crate::buffer::TextBuffer;
use crate::cursor::{Cursor, Position};
use crate::file_type::FileType;
use crate::highlight::Token;
use crate::metrics::{LineLayout, Monospace, TextMeasure};
use crate::search::{SearchEngine, SearchOptions};
use crate::stats::TextStats;
use crate::suggest::suggest;
use crate::validator::{validate, ValidationError};

/// Widget geometry in pixels, relative to the widget's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub line_height: i32,
    /// x where line text starts (padding plus line-number column).
    pub text_x: i32,
    /// y of the first visible line.
    pub text_y: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 320,
            height: 220,
            line_height: 11,
            text_x: 16,
            text_y: 4,
        }
    }
}

impl Viewport {
    /// Number of whole lines that fit.
    pub fn visible_line_count(&self) -> usize {
        if self.line_height <= 0 {
            return 0;
        }
        usize::try_from(self.height / self.line_height).unwrap_or(0)
    }
}

type ChangeListener = Box<dyn FnMut(&str)>;

pub struct Editor {
    buffer: TextBuffer,
    cursor: Cursor,
    file_type: FileType,
    viewport: Viewport,
    measure: Box<dyn TextMeasure>,
    scroll_line: usize,
    h_scroll: i32,
    errors: Vec<ValidationError>,
    search: SearchEngine,
    searching: bool,
    suggestions: Vec<String>,
    selected_suggestion: Option<usize>,
    history: UndoManager,
    readonly: bool,
    auto_close_brackets: bool,
    suggestions_enabled: bool,
    scroll_margin: i32,
    gutter_width: i32,
    on_change: Option<ChangeListener>,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("file_type", &self.file_type)
            .field("len_chars", &self.buffer.len_chars())
            .field("cursor", &self.cursor.offset)
            .field("scroll_line", &self.scroll_line)
            .field("errors", &self.errors.len())
            .field("readonly", &self.readonly)
            .finish()
    }
}

impl Editor {
    pub fn new(file_type: FileType) -> Self {
        Self::with_config(file_type, &EditorConfig::default())
    }

    pub fn with_config(file_type: FileType, config: &EditorConfig) -> Self {
        let options = SearchOptions {
            use_regex: config.search_use_regex,
            case_sensitive: config.search_case_sensitive,
        };
        Self {
            buffer: TextBuffer::new(),
            cursor: Cursor::new(),
            file_type,
            viewport: Viewport::default(),
            measure: Box::new(Monospace::new(6)),
            scroll_line: 0,
            h_scroll: 0,
            errors: Vec::new(),
            search: SearchEngine::with_options(options),
            searching: false,
            suggestions: Vec::new(),
            selected_suggestion: None,
            history: UndoManager::new(HistoryConfig::new(
                config.max_history,
                config.history_group_timeout_ms,
            )),
            readonly: config.readonly_mode,
            auto_close_brackets: config.auto_close_brackets,
            suggestions_enabled: config.suggestions_enabled,
            scroll_margin: config.scroll_margin,
            gutter_width: config.gutter_width,
            on_change: None,
        }
    }

    /// Replaces the text measurement used for layout and hit testing.
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self.update_cursor_x();
        self
    }

    pub fn set_change_listener(&mut self, listener: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_offset(&self) -> usize {
        self.cursor.offset
    }

    pub fn cursor_position(&self) -> Position {
        self.cursor.position(&self.buffer)
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Changes the file type and re-validates under the new type.
    pub fn set_file_type(&mut self, file_type: FileType) {
        self.file_type = file_type;
        self.revalidate(&self.buffer.to_string());
        self.update_cursor_x();
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scroll_line = self.scroll_line.min(self.max_scroll_line());
        self.update_cursor_x();
    }

    pub fn scroll_line(&self) -> usize {
        self.scroll_line
    }

    pub fn h_scroll(&self) -> i32 {
        self.h_scroll
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }

    pub fn set_auto_close_brackets(&mut self, enabled: bool) {
        self.auto_close_brackets = enabled;
    }

    pub fn set_suggestions_enabled(&mut self, enabled: bool) {
        self.suggestions_enabled = enabled;
        if !enabled {
            self.hide_suggestions();
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── Text mutation ───────────────────────────────────────────────

    /// Loads `text`, replacing the whole buffer. Works in read-only mode and
    /// starts a fresh undo history.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.history.clear();
        self.text_changed();
        self.hide_suggestions();
    }

    /// Types one char at the cursor. Opening brackets and quotes insert
    /// their closing partner too when auto-closing is on.
    pub fn insert_char(&mut self, c: char) -> bool {
        if self.readonly {
            return false;
        }
        let at = self.cursor.offset;
        let text = match auto_pair(c).filter(|_| self.auto_close_brackets) {
            Some(pair) => pair,
            None => c.to_string(),
        };
        if !self.apply_insert(at, &text, at + 1) {
            return false;
        }
        if matches!(c, ',' | '\n' | '\r') {
            self.hide_suggestions();
        } else {
            self.update_suggestions();
        }
        true
    }

    /// Inserts `text` verbatim at the cursor and moves past it.
    pub fn insert_text(&mut self, text: &str) -> bool {
        if self.readonly || text.is_empty() {
            return false;
        }
        let at = self.cursor.offset;
        let applied = self.apply_insert(at, text, at + text.chars().count());
        self.hide_suggestions();
        applied
    }

    pub fn insert_newline(&mut self) -> bool {
        self.insert_char('\n')
    }

    /// Deletes the char before the cursor.
    pub fn backspace(&mut self) -> bool {
        let at = self.cursor.offset;
        if self.readonly || at == 0 {
            return false;
        }
        if !self.apply_remove(at - 1, at, at - 1) {
            return false;
        }
        self.update_suggestions();
        true
    }

    /// Deletes the char after the cursor.
    pub fn delete_forward(&mut self) -> bool {
        let at = self.cursor.offset;
        if self.readonly || at >= self.buffer.len_chars() {
            return false;
        }
        if !self.apply_remove(at, at + 1, at) {
            return false;
        }
        self.update_suggestions();
        true
    }

    pub fn undo(&mut self) -> bool {
        if self.readonly {
            return false;
        }
        let Some(ops) = self.history.undo() else {
            return false;
        };
        self.history.pause_recording();
        for op in ops.iter().rev() {
            if !op.inserted.is_empty() {
                let end = op.position + op.inserted.chars().count();
                if let Err(e) = self.buffer.remove(op.position, end) {
                    tracing::warn!("Failed to undo insertion: {e}");
                }
            }
            if !op.deleted.is_empty() {
                if let Err(e) = self.buffer.insert(op.position, &op.deleted) {
                    tracing::warn!("Failed to undo deletion: {e}");
                }
            }
        }
        if let Some(first) = ops.first() {
            self.cursor.move_to(first.cursor_before, &self.buffer);
        }
        self.history.resume_recording();
        self.text_changed();
        self.hide_suggestions();
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.readonly {
            return false;
        }
        let Some(ops) = self.history.redo() else {
            return false;
        };
        self.history.pause_recording();
        for op in &ops {
            if !op.deleted.is_empty() {
                let end = op.position + op.deleted.chars().count();
                if let Err(e) = self.buffer.remove(op.position, end) {
                    tracing::warn!("Failed to redo deletion: {e}");
                }
            }
            if !op.inserted.is_empty() {
                if let Err(e) = self.buffer.insert(op.position, &op.inserted) {
                    tracing::warn!("Failed to redo insertion: {e}");
                }
            }
        }
        if let Some(last) = ops.last() {
            self.cursor.move_to(last.cursor_after, &self.buffer);
        }
        self.history.resume_recording();
        self.text_changed();
        self.hide_suggestions();
        true
    }

    fn apply_insert(&mut self, at: usize, text: &str, cursor_after: usize) -> bool {
        let before = self.cursor.offset;
        if let Err(e) = self.buffer.insert(at, text) {
            tracing::warn!("Failed to insert at {at}: {e}");
            return false;
        }
        self.cursor.move_to(cursor_after, &self.buffer);
        self.history.record(EditOperation::insertion(
            at,
            text,
            before,
            self.cursor.offset,
        ));
        self.text_changed();
        true
    }

    fn apply_remove(&mut self, start: usize, end: usize, cursor_after: usize) -> bool {
        let before = self.cursor.offset;
        let deleted = match self.buffer.slice(start, end) {
            Ok(slice) => slice.to_string(),
            Err(e) => {
                tracing::warn!("Failed to delete {start}..{end}: {e}");
                return false;
            }
        };
        if let Err(e) = self.buffer.remove(start, end) {
            tracing::warn!("Failed to delete {start}..{end}: {e}");
            return false;
        }
        self.cursor.move_to(cursor_after, &self.buffer);
        self.history.record(EditOperation::deletion(
            start,
            &deleted,
            before,
            self.cursor.offset,
        ));
        self.text_changed();
        true
    }

    fn text_changed(&mut self) {
        self.cursor.clamp(&self.buffer);
        let text = self.buffer.to_string();
        if let Some(listener) = self.on_change.as_mut() {
            listener(&text);
        }
        self.revalidate(&text);
        if self.searching {
            self.refresh_search(&text);
        }
        self.scroll_line = self.scroll_line.min(self.max_scroll_line());
        self.update_cursor_x();
    }

    fn revalidate(&mut self, text: &str) {
        self.errors = if self.file_type.is_json() {
            validate(text)
        } else {
            Vec::new()
        };
    }

    // ── Cursor movement ─────────────────────────────────────────────

    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor.move_to(offset, &self.buffer);
        self.cursor_moved();
    }

    pub fn move_left(&mut self) {
        self.cursor.move_left();
        self.cursor_moved();
    }

    pub fn move_right(&mut self) {
        self.cursor.move_right(&self.buffer);
        self.cursor_moved();
    }

    pub fn move_up(&mut self) {
        self.cursor.move_up(&self.buffer);
        self.cursor_moved();
    }

    pub fn move_down(&mut self) {
        self.cursor.move_down(&self.buffer);
        self.cursor_moved();
    }

    pub fn move_to_line_start(&mut self) {
        self.cursor.move_to_line_start(&self.buffer);
        self.cursor_moved();
    }

    pub fn move_to_line_end(&mut self) {
        self.cursor.move_to_line_end(&self.buffer);
        self.cursor_moved();
    }

    pub fn move_to_start(&mut self) {
        self.cursor.move_to_start();
        self.cursor_moved();
    }

    pub fn move_to_end(&mut self) {
        self.cursor.move_to_end(&self.buffer);
        self.cursor_moved();
    }

    fn cursor_moved(&mut self) {
        self.update_cursor_x();
        self.hide_suggestions();
    }

    /// Places the cursor under a click at widget-relative (`x`, `y`).
    /// Clicks above or below the text land on the first or last line.
    pub fn click(&mut self, x: i32, y: i32) -> bool {
        if self.readonly {
            return false;
        }
        let row = if self.viewport.line_height > 0 {
            (y - self.viewport.text_y) / self.viewport.line_height
        } else {
            0
        };
        let last_line = self.buffer.len_lines().saturating_sub(1);
        let line = if row < 0 {
            self.scroll_line.saturating_sub(row.unsigned_abs() as usize)
        } else {
            self.scroll_line.saturating_add(row as usize)
        }
        .min(last_line);

        let text = self.buffer.line_text(line).unwrap_or_default();
        let col = LineLayout::new(self.file_type, &text).char_index_from_x(
            &*self.measure,
            x - self.viewport.text_x + self.h_scroll,
        );
        let start = self.buffer.line_to_char(line).unwrap_or(0);
        self.cursor.move_to(start + col, &self.buffer);
        self.update_cursor_x();
        self.update_suggestions();
        true
    }

    /// Scrolls one line per wheel event: positive deltas scroll up.
    pub fn scroll(&mut self, delta: f64) {
        if delta > 0.0 {
            self.scroll_line = self.scroll_line.saturating_sub(1);
        } else if delta < 0.0 {
            self.scroll_line = (self.scroll_line + 1).min(self.max_scroll_line());
        }
    }

    pub fn set_scroll_line(&mut self, line: usize) {
        self.scroll_line = line.min(self.max_scroll_line());
    }

    fn max_scroll_line(&self) -> usize {
        self.buffer
            .len_lines()
            .saturating_sub(self.viewport.visible_line_count())
    }

    /// Refreshes the cursor's pixel x and keeps it inside the horizontal
    /// scroll window.
    fn update_cursor_x(&mut self) {
        let pos = self.cursor.position(&self.buffer);
        let line = self.buffer.line_text(pos.line).unwrap_or_default();
        let x = LineLayout::new(self.file_type, &line).width_up_to_char(&*self.measure, pos.col);
        self.cursor.last_visual_x = x;

        let visible = self.viewport.width - self.gutter_width;
        if x > self.h_scroll + visible {
            self.h_scroll = x - visible + self.scroll_margin;
        } else if x < self.h_scroll {
            self.h_scroll = (x - self.scroll_margin).max(0);
        }
    }

    // ── Search ──────────────────────────────────────────────────────

    pub fn search(&self) -> &SearchEngine {
        &self.search
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Runs `query` over the document and scrolls to the first match.
    /// Returns the match count.
    pub fn start_search(&mut self, query: &str) -> usize {
        let count = self.search.search(query, &self.buffer.to_string());
        self.searching = true;
        self.hide_suggestions();
        self.scroll_to_current_match();
        count
    }

    /// Changes search options, re-running the active query if any.
    pub fn set_search_options(&mut self, options: SearchOptions) {
        self.search.set_options(options);
        if self.searching {
            let query = self.search.query().to_string();
            self.start_search(&query);
        }
    }

    pub fn find_next(&mut self) -> bool {
        let moved = self.search.next_match();
        if moved {
            self.scroll_to_current_match();
        }
        moved
    }

    pub fn find_previous(&mut self) -> bool {
        let moved = self.search.previous_match();
        if moved {
            self.scroll_to_current_match();
        }
        moved
    }

    pub fn end_search(&mut self) {
        self.search.clear();
        self.searching = false;
    }

    fn refresh_search(&mut self, text: &str) {
        let current = self.search.current_match_index();
        let query = self.search.query().to_string();
        let count = self.search.search(&query, text);
        if let Some(index) = current.filter(|_| count > 0) {
            self.search.current_match = Some(index.min(count - 1));
        }
    }

    fn scroll_to_current_match(&mut self) {
        let Some(line) = self.search.current().map(|m| m.line) else {
            return;
        };
        let visible = self.viewport.visible_line_count();
        if line < self.scroll_line || line >= self.scroll_line + visible {
            self.scroll_line = line.saturating_sub(2);
        }
    }

    // ── Suggestions ─────────────────────────────────────────────────

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn selected_suggestion(&self) -> Option<usize> {
        self.selected_suggestion
    }

    pub fn suggestions_visible(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// Recomputes suggestions for the cursor position and selects the first.
    /// JSON documents only.
    pub fn update_suggestions(&mut self) {
        if !self.suggestions_enabled || !self.file_type.is_json() {
            self.hide_suggestions();
            return;
        }
        self.suggestions = suggest(&self.buffer.to_string(), self.cursor.offset);
        self.selected_suggestion = (!self.suggestions.is_empty()).then_some(0);
    }

    /// Moves the selection down, stopping at the last entry. Returns false
    /// when no list is shown.
    pub fn select_next_suggestion(&mut self) -> bool {
        let len = self.suggestions.len();
        let Some(i) = self.selected_suggestion.filter(|_| len > 0) else {
            return false;
        };
        self.selected_suggestion = Some((i + 1).min(len - 1));
        true
    }

    /// Moves the selection up, stopping at the first entry.
    pub fn select_previous_suggestion(&mut self) -> bool {
        let Some(i) = self.selected_suggestion.filter(|_| !self.suggestions.is_empty()) else {
            return false;
        };
        self.selected_suggestion = Some(i.saturating_sub(1));
        true
    }

    /// Inserts the selected suggestion and closes the list.
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(choice) = self
            .selected_suggestion
            .and_then(|i| self.suggestions.get(i))
            .cloned()
        else {
            return false;
        };
        let applied = self.insert_text(&choice);
        self.hide_suggestions();
        applied
    }

    pub fn hide_suggestions(&mut self) {
        self.suggestions.clear();
        self.selected_suggestion = None;
    }

    // ── Rendering queries ───────────────────────────────────────────

    /// Tokens for each line in the viewport, with their line indices.
    pub fn visible_lines(&self) -> Vec<(usize, Vec<Token>)> {
        self.buffer
            .line_texts()
            .enumerate()
            .skip(self.scroll_line)
            .take(self.viewport.visible_line_count())
            .map(|(i, line)| (i, LineLayout::new(self.file_type, &line).into_tokens()))
            .collect()
    }

    /// Widest line in pixels, for the horizontal scroll range.
    pub fn max_line_width(&self) -> i32 {
        self.buffer
            .line_texts()
            .map(|line| LineLayout::new(self.file_type, &line).text_width(&*self.measure))
            .max()
            .unwrap_or(0)
    }

    pub fn error_at(&self, offset: usize) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.contains(offset))
    }

    pub fn tooltip_for(&self, error: &ValidationError) -> String {
        error.to_string()
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.buffer.to_string())
    }
}
