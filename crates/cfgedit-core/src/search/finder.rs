/// Search engine supporting literal and regex queries with a cycling
/// current-match cursor.
use anyhow::{Context, Result};
use regex::Regex;

/// A single search match in the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Start char index.
    pub start: usize,
    /// End char index (exclusive).
    pub end: usize,
    /// 0-indexed line number where the match starts.
    pub line: usize,
}

/// Search configuration options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Whether to treat the query as a regex.
    pub use_regex: bool,
    /// Whether search is case-sensitive.
    pub case_sensitive: bool,
}

/// Finds every occurrence of a query and tracks which one is current.
#[derive(Debug, Default)]
pub struct SearchEngine {
    options: SearchOptions,
    query: String,
    /// Compiled regex pattern (cached).
    compiled: Option<Regex>,
    /// Cache key the regex was compiled for.
    compiled_for: Option<String>,
    /// All matches found, ascending by start.
    pub matches: Vec<SearchMatch>,
    /// Index of the current match; `None` when there are no matches.
    pub current_match: Option<usize>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SearchOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Changes the options. Takes effect on the next [`search`](Self::search).
    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    fn build_pattern(query: &str, options: SearchOptions) -> Result<Regex> {
        let regex = if options.case_sensitive {
            Regex::new(query)
        } else {
            Regex::new(&format!("(?i){query}"))
        };
        regex.context("invalid search pattern")
    }

    /// Finds all matches of `query` in `content` and makes the first one
    /// current. Returns the number of matches.
    ///
    /// An empty query or an invalid regex yields no matches.
    pub fn search(&mut self, query: &str, content: &str) -> usize {
        self.query = query.to_string();
        self.matches.clear();
        self.current_match = None;

        if query.is_empty() {
            return 0;
        }

        let spans = if self.options.use_regex {
            match self.regex_spans(content) {
                Ok(spans) => spans,
                Err(e) => {
                    tracing::debug!("Search for {query:?} failed: {e:#}");
                    return 0;
                }
            }
        } else {
            literal_spans(query, content, self.options.case_sensitive)
        };

        let mut line = 0;
        let mut scanned = 0;
        let mut chars = content.chars();
        for (start, end) in spans {
            line += chars
                .by_ref()
                .take(start - scanned)
                .filter(|&c| c == '\n')
                .count();
            scanned = start;
            self.matches.push(SearchMatch { start, end, line });
        }

        if !self.matches.is_empty() {
            self.current_match = Some(0);
        }
        self.matches.len()
    }

    /// Non-overlapping regex matches as char spans.
    fn regex_spans(&mut self, content: &str) -> Result<Vec<(usize, usize)>> {
        let cache_key = format!("{}:{}", self.query, self.options.case_sensitive);
        if self.compiled_for.as_deref() != Some(&cache_key) {
            self.compiled_for = None;
            self.compiled = Some(Self::build_pattern(&self.query, self.options)?);
            self.compiled_for = Some(cache_key);
        }
        let Some(regex) = &self.compiled else {
            return Ok(Vec::new());
        };

        let mut spans = Vec::new();
        let mut byte_pos = 0;
        let mut char_pos = 0;
        for mat in regex.find_iter(content) {
            char_pos += content[byte_pos..mat.start()].chars().count();
            let len = mat.as_str().chars().count();
            spans.push((char_pos, char_pos + len));
            byte_pos = mat.start();
        }
        Ok(spans)
    }

    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Returns the total number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn current_match_index(&self) -> Option<usize> {
        self.current_match
    }

    pub fn current(&self) -> Option<&SearchMatch> {
        self.current_match.and_then(|i| self.matches.get(i))
    }

    /// Start offset of the current match.
    pub fn current_match_offset(&self) -> Option<usize> {
        self.current().map(|m| m.start)
    }

    /// Advances to the next match, wrapping to the first. Returns false
    /// when there are no matches.
    pub fn next_match(&mut self) -> bool {
        if self.matches.is_empty() {
            return false;
        }
        let next = self.current_match.map_or(0, |i| (i + 1) % self.matches.len());
        self.current_match = Some(next);
        true
    }

    /// Steps back to the previous match, wrapping to the last. Returns
    /// false when there are no matches.
    pub fn previous_match(&mut self) -> bool {
        if self.matches.is_empty() {
            return false;
        }
        let len = self.matches.len();
        let prev = self.current_match.map_or(len - 1, |i| (i + len - 1) % len);
        self.current_match = Some(prev);
        true
    }

    /// Clears the query, the matches and the compiled pattern.
    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.current_match = None;
        self.compiled = None;
        self.compiled_for = None;
    }
}

/// Every start position where `query` occurs, overlapping ones included.
fn literal_spans(query: &str, content: &str, case_sensitive: bool) -> Vec<(usize, usize)> {
    let needle: Vec<char> = query.chars().collect();
    let hay: Vec<char> = content.chars().collect();
    if needle.len() > hay.len() {
        return Vec::new();
    }

    let same = |a: char, b: char| {
        a == b || (!case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
    };
    (0..=hay.len() - needle.len())
        .filter(|&i| needle.iter().zip(&hay[i..]).all(|(&n, &h)| same(n, h)))
        .map(|i| (i, i + needle.len()))
        .collect()
}
