/// JSON validation producing positioned errors for the editor overlay.
///
/// The parser pass reports at most one error. The comma and bracket passes
/// run on every call and report everything they find, so one broken
/// document can yield several overlapping errors.
use std::fmt;

use serde::de::{Deserialize, IgnoredAny};

/// Broad class of a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Reported by the parser or the comma checks.
    Syntax,
    /// Unbalanced brackets found by the bracket-stack pass.
    Structural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ExpectedOpenBrace,
    ExpectedCloseBrace,
    ExpectedCloseBracket,
    ExpectedColon,
    ExpectedComma,
    ExpectedValue,
    UnterminatedString,
    MalformedJson,
    SyntaxError,
    TrailingComma,
    LeadingComma,
    UnexpectedClosingBracket,
    BracketMismatch,
    UnclosedBrace,
    UnclosedBracket,
}

impl ErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            Self::ExpectedOpenBrace => "Expected '{'",
            Self::ExpectedCloseBrace => "Expected '}'",
            Self::ExpectedCloseBracket => "Expected ']'",
            Self::ExpectedColon => "Expected ':'",
            Self::ExpectedComma => "Expected ','",
            Self::ExpectedValue => "Expected value",
            Self::UnterminatedString => "Unterminated string",
            Self::MalformedJson => "Malformed JSON",
            Self::SyntaxError => "Syntax error",
            Self::TrailingComma => "Trailing comma",
            Self::LeadingComma => "Unexpected comma",
            Self::UnexpectedClosingBracket => "Unexpected closing bracket",
            Self::BracketMismatch => "Bracket mismatch",
            Self::UnclosedBrace => "Unclosed curly brace",
            Self::UnclosedBracket => "Unclosed square bracket",
        }
    }

    pub fn category(self) -> ErrorCategory {
        match self {
            Self::UnexpectedClosingBracket
            | Self::BracketMismatch
            | Self::UnclosedBrace
            | Self::UnclosedBracket => ErrorCategory::Structural,
            _ => ErrorCategory::Syntax,
        }
    }
}

/// One problem found in the document.
///
/// `start..end` is a half-open char range into the validated text, and
/// `line`/`column` (both 1-based) locate `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub start: usize,
    pub end: usize,
}

impl ValidationError {
    fn new(kind: ErrorKind, chars: &[char], start: usize, end: usize) -> Self {
        let end = end.min(chars.len());
        let start = start.min(end);
        let (line, column) = line_col(chars, start);
        Self {
            kind,
            line,
            column,
            message: kind.message().to_string(),
            start,
            end,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Whether `offset` falls inside the span. An empty span covers its
    /// start offset only.
    pub fn contains(&self, offset: usize) -> bool {
        if self.start == self.end {
            offset == self.start
        } else {
            (self.start..self.end).contains(&offset)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}, Col {}: {}", self.line, self.column, self.message)
    }
}

/// Validates `text` as JSON. Empty or whitespace-only text is accepted.
pub fn validate(text: &str) -> Vec<ValidationError> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut errors = Vec::new();

    if let Err(e) = parse(text) {
        tracing::debug!("JSON parse failed: {e}");
        errors.push(parser_error(text, &chars, &e));
    }

    check_commas(&chars, &mut errors);
    check_brackets(&chars, &mut errors);
    errors
}

/// Parses `text` as one JSON document without building a value. Nesting
/// depth is unbounded; deep documents grow the stack on the heap.
pub(crate) fn parse(text: &str) -> Result<(), serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    IgnoredAny::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()
}

fn parser_error(text: &str, chars: &[char], e: &serde_json::Error) -> ValidationError {
    let byte = byte_offset(text, e.line(), e.column());
    let offset = text[..byte].chars().count();
    let kind = classify(&e.to_string(), chars, offset);
    let (start, end) = error_span(kind, chars, offset);
    ValidationError::new(kind, chars, start, end)
}

/// Byte position a parser `(line, column)` refers to, snapped to a char
/// boundary and clamped inside the text. `text` must not be empty.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        text.match_indices('\n')
            .nth(line - 2)
            .map_or(text.len(), |(i, _)| i + 1)
    };
    let mut byte = (line_start + column.saturating_sub(1)).min(text.len() - 1);
    while !text.is_char_boundary(byte) {
        byte -= 1;
    }
    byte
}

fn classify(message: &str, chars: &[char], offset: usize) -> ErrorKind {
    const TABLE: &[(&str, ErrorKind)] = &[
        ("EOF while parsing a string", ErrorKind::UnterminatedString),
        ("EOF while parsing an object", ErrorKind::ExpectedCloseBrace),
        ("EOF while parsing a list", ErrorKind::ExpectedCloseBracket),
        ("EOF while parsing a value", ErrorKind::ExpectedValue),
        ("expected `:`", ErrorKind::ExpectedColon),
        ("expected `,` or", ErrorKind::ExpectedComma),
        ("trailing comma", ErrorKind::TrailingComma),
        ("expected value", ErrorKind::ExpectedValue),
        ("expected ident", ErrorKind::ExpectedValue),
        ("key must be a string", ErrorKind::MalformedJson),
        ("expected `\"`", ErrorKind::MalformedJson),
        ("invalid", ErrorKind::MalformedJson),
        ("control character", ErrorKind::MalformedJson),
        ("number out of range", ErrorKind::MalformedJson),
    ];

    if message.starts_with("trailing characters") {
        // A value followed by `:` means the document is missing its `{`.
        return if chars.get(offset) == Some(&':') {
            ErrorKind::ExpectedOpenBrace
        } else {
            ErrorKind::SyntaxError
        };
    }
    TABLE
        .iter()
        .find(|(prefix, _)| message.starts_with(prefix))
        .map_or(ErrorKind::SyntaxError, |&(_, kind)| kind)
}

fn error_span(kind: ErrorKind, chars: &[char], offset: usize) -> (usize, usize) {
    const BRACE_STOPS: &[char] = &['{', '}', '[', ']', ',', '\n'];
    const SEPARATOR_STOPS: &[char] = &[':', '"', ',', '\n'];

    match kind {
        ErrorKind::ExpectedOpenBrace
        | ErrorKind::ExpectedCloseBrace
        | ErrorKind::ExpectedCloseBracket => boundary_span(chars, offset, BRACE_STOPS),
        ErrorKind::ExpectedColon | ErrorKind::ExpectedComma => {
            boundary_span(chars, offset, SEPARATOR_STOPS)
        }
        ErrorKind::UnterminatedString => string_span(chars, offset),
        ErrorKind::TrailingComma => {
            let before = chars[..offset].iter().rposition(|c| !c.is_whitespace());
            match before {
                Some(p) if chars[p] == ',' => (p, p + 1),
                _ => (offset, offset + 1),
            }
        }
        _ => token_span(chars, offset),
    }
}

/// Widens `offset` to the nearest stop char on each side, both included.
fn boundary_span(chars: &[char], offset: usize, stops: &[char]) -> (usize, usize) {
    let start = chars[..=offset]
        .iter()
        .rposition(|c| stops.contains(c))
        .unwrap_or(0);
    let end = chars[offset..]
        .iter()
        .position(|c| stops.contains(c))
        .map_or(chars.len(), |p| offset + p + 1);
    (start, end)
}

/// The run of chars around `offset` that contains no structural char.
fn token_span(chars: &[char], offset: usize) -> (usize, usize) {
    const STOPS: &[char] = &['\n', '{', '[', ',', ':', '}', ']'];
    let start = chars[..offset]
        .iter()
        .rposition(|c| STOPS.contains(c))
        .map_or(0, |p| p + 1);
    let end = chars[offset + 1..]
        .iter()
        .position(|c| STOPS.contains(c))
        .map_or(chars.len(), |p| offset + 1 + p);
    (start, end)
}

/// From the opening quote of the unclosed string to its closing quote, or
/// to the end of the text.
fn string_span(chars: &[char], offset: usize) -> (usize, usize) {
    let start = open_quote(chars)
        .or_else(|| chars[..=offset].iter().rposition(|&c| c == '"'))
        .unwrap_or(offset);
    let end = closing_quote(chars, start + 1).map_or(chars.len(), |q| q + 1);
    (start, end)
}

/// Position of the quote that opens a string never closed before the end.
fn open_quote(chars: &[char]) -> Option<usize> {
    let mut open = None;
    let mut escaped = false;
    for (i, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            open = if open.is_some() { None } else { Some(i) };
        }
    }
    open
}

fn closing_quote(chars: &[char], from: usize) -> Option<usize> {
    let mut escaped = false;
    for (i, &c) in chars.iter().enumerate().skip(from) {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(i),
            _ => {}
        }
    }
    None
}

fn check_commas(chars: &[char], errors: &mut Vec<ValidationError>) {
    let first = chars.iter().position(|c| !c.is_whitespace());
    let last = chars.iter().rposition(|c| !c.is_whitespace());

    if let Some(p) = first.filter(|&p| chars[p] == ',') {
        errors.push(ValidationError::new(ErrorKind::LeadingComma, chars, p, p + 1));
    }
    if let Some(p) = last.filter(|&p| chars[p] == ',') {
        errors.push(ValidationError::new(ErrorKind::TrailingComma, chars, p, p + 1));
    }
}

/// Bracket matching over `{}` and `[]`, skipping string contents.
fn check_brackets(chars: &[char], errors: &mut Vec<ValidationError>) {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if !in_string {
            match c {
                '{' | '[' => stack.push((c, i)),
                '}' | ']' => {
                    let opener = if c == '}' { '{' } else { '[' };
                    match stack.last() {
                        None => errors.push(ValidationError::new(
                            ErrorKind::UnexpectedClosingBracket,
                            chars,
                            i,
                            i + 1,
                        )),
                        Some(&(open, _)) if open != opener => errors.push(ValidationError::new(
                            ErrorKind::BracketMismatch,
                            chars,
                            i,
                            i + 1,
                        )),
                        Some(_) => {
                            stack.pop();
                        }
                    }
                }
                _ => {}
            }
        }
        if c == '"' && !escaped {
            in_string = !in_string;
        }
        escaped = c == '\\' && !escaped;
    }

    // Innermost first.
    while let Some((open, pos)) = stack.pop() {
        let kind = if open == '{' {
            ErrorKind::UnclosedBrace
        } else {
            ErrorKind::UnclosedBracket
        };
        errors.push(ValidationError::new(kind, chars, pos, pos + 1));
    }
}

/// 1-based line and column of char `offset`.
fn line_col(chars: &[char], offset: usize) -> (usize, usize) {
    let before = &chars[..offset.min(chars.len())];
    let line = before.iter().filter(|&&c| c == '\n').count() + 1;
    let line_start = before.iter().rposition(|&c| c == '\n').map_or(0, |p| p + 1);
    (line, offset - line_start + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<ErrorKind> {
        validate(text).into_iter().map(|e| e.kind).collect()
    }

    // ── Accepted input ──────────────────────────────────────────────

    #[test]
    fn test_valid_documents() {
        assert!(validate("{\"a\": 1, \"b\": true}").is_empty());
        assert!(validate("[1, 2, {\"x\": null}]").is_empty());
        assert!(validate("{\n  \"s\": \"brackets { [ inside\"\n}").is_empty());
        assert!(validate("42").is_empty());
    }

    #[test]
    fn test_blank_text_is_valid() {
        assert!(validate("").is_empty());
        assert!(validate("   \n\t ").is_empty());
    }

    // ── Parser errors ───────────────────────────────────────────────

    #[test]
    fn test_trailing_comma_points_at_comma() {
        let text = "{\"a\": 1,}";
        let errors = validate(text);
        let err = errors
            .iter()
            .find(|e| e.kind == ErrorKind::TrailingComma)
            .unwrap();
        assert_eq!((err.start, err.end), (7, 8));
        assert_eq!((err.line, err.column), (1, 8));
    }

    #[test]
    fn test_unterminated_string_span() {
        let text = "{\"a\": \"oops";
        let errors = validate(text);
        let err = errors
            .iter()
            .find(|e| e.kind == ErrorKind::UnterminatedString)
            .unwrap();
        assert_eq!(err.start, 6);
        assert_eq!(err.end, text.chars().count());
        assert!(errors.iter().any(|e| e.kind == ErrorKind::UnclosedBrace && e.start == 0));
    }

    #[test]
    fn test_missing_colon() {
        assert!(kinds("{\"a\" 1}").contains(&ErrorKind::ExpectedColon));
    }

    #[test]
    fn test_missing_comma() {
        let errors = validate("{\"a\": 1\n \"b\": 2}");
        let err = &errors[0];
        assert_eq!(err.kind, ErrorKind::ExpectedComma);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_missing_open_brace() {
        let errors = validate("\"a\": 1");
        assert_eq!(errors[0].kind, ErrorKind::ExpectedOpenBrace);
        assert_eq!(errors[0].message, "Expected '{'");
    }

    #[test]
    fn test_unquoted_key_is_malformed() {
        assert_eq!(kinds("{a: 1}")[0], ErrorKind::MalformedJson);
    }

    #[test]
    fn test_eof_inside_containers() {
        assert_eq!(kinds("{\"a\": 1")[0], ErrorKind::ExpectedCloseBrace);
        assert_eq!(kinds("[1, 2")[0], ErrorKind::ExpectedCloseBracket);
        assert_eq!(kinds("{\"a\":")[0], ErrorKind::ExpectedValue);
    }

    // ── Comma checks ────────────────────────────────────────────────

    #[test]
    fn test_leading_comma() {
        let errors = validate("  ,{}");
        let err = errors
            .iter()
            .find(|e| e.kind == ErrorKind::LeadingComma)
            .unwrap();
        assert_eq!((err.start, err.end), (2, 3));
        assert_eq!(err.message, "Unexpected comma");
    }

    #[test]
    fn test_trailing_comma_at_document_end() {
        let text = "{}, \n";
        let errors = validate(text);
        let err = errors.iter().rfind(|e| e.kind == ErrorKind::TrailingComma).unwrap();
        assert_eq!((err.start, err.end), (2, 3));
    }

    // ── Bracket checks ──────────────────────────────────────────────

    #[test]
    fn test_each_unclosed_opener_is_reported() {
        let text = "{\"a\": [{\"b\": [1";
        let structural: Vec<usize> = validate(text)
            .into_iter()
            .filter(|e| e.category() == ErrorCategory::Structural)
            .map(|e| e.start)
            .collect();
        assert_eq!(structural, vec![13, 7, 6, 0]);
    }

    #[test]
    fn test_unexpected_and_mismatched_closers() {
        let errors = validate("]");
        assert!(errors
            .iter()
            .any(|e| e.kind == ErrorKind::UnexpectedClosingBracket && e.start == 0));

        let errors = validate("[1}");
        let err = errors
            .iter()
            .find(|e| e.kind == ErrorKind::BracketMismatch)
            .unwrap();
        assert_eq!((err.start, err.end), (2, 3));
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let errors = validate("{\"a\": \"x\\\"}\"}");
        assert!(errors.is_empty(), "{errors:?}");
    }

    // ── Totality ────────────────────────────────────────────────────

    #[test]
    fn test_never_panics_and_spans_are_in_bounds() {
        let deep_open = "[".repeat(500);
        let deep_closed = format!("{}{}", "[".repeat(300), "]".repeat(300));
        let inputs = [
            "\u{0}\u{1}\u{7f}garbage\u{fffd}",
            "\"",
            "\\",
            "{\"é\": \"😀",
            "}}}]]]",
            ":",
            ",",
            "{\"a\":1}\n,",
            "\n\n\n{",
            deep_open.as_str(),
            deep_closed.as_str(),
            "{\"a\": \"\u{1}\"}",
            "{\"a\": 1e999}",
            "[01]",
        ];
        for text in inputs {
            let len = text.chars().count();
            for err in validate(text) {
                assert!(err.start <= err.end, "{text:?}: {err:?}");
                assert!(err.end <= len, "{text:?}: {err:?}");
                assert!(err.line >= 1 && err.column >= 1);
            }
        }
    }

    #[test]
    fn test_deep_nesting_is_valid() {
        let text = format!("{}{}", "[".repeat(200), "]".repeat(200));
        assert!(validate(&text).is_empty());

        let objects = format!("{}1{}", "{\"k\": ".repeat(1000), "}".repeat(1000));
        assert!(validate(&objects).is_empty());
    }

    #[test]
    fn test_deep_nesting_still_reports_errors() {
        let text = format!("{}{}", "[".repeat(200), "]".repeat(199));
        assert!(kinds(&text).contains(&ErrorKind::UnclosedBracket));
        assert!(parse(&text).is_err());
    }

    #[test]
    fn test_unclosed_count_matches_openers() {
        let text = "[[[{";
        let unclosed = validate(text)
            .into_iter()
            .filter(|e| matches!(e.kind, ErrorKind::UnclosedBrace | ErrorKind::UnclosedBracket))
            .count();
        assert_eq!(unclosed, 4);
    }

    // ── Positions ───────────────────────────────────────────────────

    #[test]
    fn test_line_col() {
        let chars: Vec<char> = "ab\ncd".chars().collect();
        assert_eq!(line_col(&chars, 0), (1, 1));
        assert_eq!(line_col(&chars, 2), (1, 3));
        assert_eq!(line_col(&chars, 3), (2, 1));
        assert_eq!(line_col(&chars, 5), (2, 3));
    }

    #[test]
    fn test_byte_offset_handles_multibyte() {
        let text = "{\"é\": x}";
        let b = byte_offset(text, 1, 8);
        assert!(text.is_char_boundary(b));
        assert_eq!(&text[b..b + 1], "x");
    }

    #[test]
    fn test_display_is_tooltip_format() {
        let err = &validate("{\"a\": 1,}")[0];
        assert_eq!(err.to_string(), "Line 1, Col 8: Trailing comma");
    }

    #[test]
    fn test_contains() {
        let err = &validate("[1}")[0];
        assert!(err.contains(err.start));
        assert!(!err.contains(err.end.max(err.start + 1) + 5));
    }
}
