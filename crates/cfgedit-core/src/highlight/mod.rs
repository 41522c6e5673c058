//! Per-format line tokenizers.
//!
//! Every scanner is a pure function of one line: no state carries over from
//! the previous line, so strings or structures spanning lines are not
//! tracked. Tokenization is lossless: concatenating the `text` of all tokens
//! for a line gives back the line.

mod ini;
mod json;
mod properties;
mod text;
mod toml;
mod yaml;

use cfgedit_config::ColorClass;

use crate::file_type::FileType;

/// Classification of a token, shared by every format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    BraceOpen,
    BraceClose,
    BracketOpen,
    BracketClose,
    Colon,
    Comma,
    /// `=` in key/value formats, or `:` when it separates a properties entry.
    Equals,
    Key,
    String,
    Number,
    Boolean,
    Null,
    Symbol,
    Comment,
    Section,
    Header,
    Url,
    Email,
    QuotedText,
    /// Any of `()[]{}` in prose.
    Bracket,
    /// Punctuation in prose.
    TextSymbol,
    ListItem,
    Indentation,
    DocumentMarker,
    Value,
    Text,
}

impl TokenKind {
    pub fn color_class(self) -> ColorClass {
        match self {
            Self::BraceOpen | Self::BraceClose | Self::BracketOpen | Self::BracketClose => {
                ColorClass::Bracket
            }
            Self::Bracket => ColorClass::Bracket,
            Self::Colon | Self::Comma | Self::Equals => ColorClass::Punctuation,
            Self::Key => ColorClass::Key,
            Self::String | Self::QuotedText => ColorClass::String,
            Self::Number => ColorClass::Number,
            Self::Boolean => ColorClass::Boolean,
            Self::Null => ColorClass::Null,
            Self::Symbol => ColorClass::Symbol,
            Self::TextSymbol => ColorClass::Accent,
            Self::Comment => ColorClass::Comment,
            Self::Section => ColorClass::Section,
            Self::Header => ColorClass::Header,
            Self::Url => ColorClass::Url,
            Self::Email => ColorClass::Email,
            Self::ListItem => ColorClass::ListItem,
            Self::Indentation => ColorClass::Indentation,
            Self::DocumentMarker => ColorClass::DocumentMarker,
            Self::Value => ColorClass::Value,
            Self::Text => ColorClass::Text,
        }
    }

    /// Lowercase name used by the command-line dump.
    pub fn name(self) -> &'static str {
        match self {
            Self::BraceOpen => "brace_open",
            Self::BraceClose => "brace_close",
            Self::BracketOpen => "bracket_open",
            Self::BracketClose => "bracket_close",
            Self::Colon => "colon",
            Self::Comma => "comma",
            Self::Equals => "equals",
            Self::Key => "key",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Symbol => "symbol",
            Self::Comment => "comment",
            Self::Section => "section",
            Self::Header => "header",
            Self::Url => "url",
            Self::Email => "email",
            Self::QuotedText => "quoted_text",
            Self::Bracket => "bracket",
            Self::TextSymbol => "text_symbol",
            Self::ListItem => "list_item",
            Self::Indentation => "indentation",
            Self::DocumentMarker => "document_marker",
            Self::Value => "value",
            Self::Text => "text",
        }
    }
}

/// A classified piece of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }
}

/// Tokenizes one line (without its `\n`) using the scanner for `file_type`.
/// An empty line yields no tokens.
pub fn tokenize(file_type: FileType, line: &str) -> Vec<Token> {
    if line.is_empty() {
        return Vec::new();
    }
    match file_type {
        FileType::Json | FileType::Json5 => json::tokenize(line),
        FileType::Yaml => yaml::tokenize(line),
        FileType::Toml => toml::tokenize(line),
        FileType::Properties => properties::tokenize(line),
        FileType::Cfg | FileType::Ini => ini::tokenize(line),
        FileType::Text => text::tokenize(line),
        FileType::Plain => vec![Token::new(TokenKind::Text, line)],
    }
}

/// Pushes the part of a `key <sep> value` line that precedes the separator:
/// leading whitespace, the key, and whitespace before the separator.
fn push_key_part(tokens: &mut Vec<Token>, before: &str, lead_kind: TokenKind) {
    let key = before.trim();
    if key.is_empty() {
        if !before.is_empty() {
            tokens.push(Token::new(lead_kind, before));
        }
        return;
    }
    let lead = before.len() - before.trim_start().len();
    if lead > 0 {
        tokens.push(Token::new(lead_kind, &before[..lead]));
    }
    tokens.push(Token::new(TokenKind::Key, key));
    let trail = &before[lead + key.len()..];
    if !trail.is_empty() {
        tokens.push(Token::new(TokenKind::Text, trail));
    }
}

/// Matches the whole of `s` against a numeric literal: optional sign,
/// digits, optional fraction, and an exponent when `exponent` is set.
fn is_plain_number(s: &str, exponent: bool) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (mantissa, exp) = match digits.find(['e', 'E']) {
        Some(i) if exponent => (&digits[..i], Some(&digits[i + 1..])),
        _ => (digits, None),
    };
    let (int, frac) = match mantissa.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (mantissa, None),
    };
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int) || frac.is_some_and(|f| !all_digits(f)) {
        return false;
    }
    match exp {
        Some(e) => all_digits(e.strip_prefix(['+', '-']).unwrap_or(e)),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn joined(tokens: &[Token]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    const ALL_TYPES: [FileType; 9] = [
        FileType::Json,
        FileType::Json5,
        FileType::Yaml,
        FileType::Toml,
        FileType::Properties,
        FileType::Cfg,
        FileType::Ini,
        FileType::Text,
        FileType::Plain,
    ];

    #[test]
    fn test_empty_line_has_no_tokens() {
        for ft in ALL_TYPES {
            assert!(tokenize(ft, "").is_empty(), "{ft:?}");
        }
    }

    #[test]
    fn test_plain_is_single_text_token() {
        let tokens = tokenize(FileType::Plain, "anything: {goes} = here");
        assert_eq!(tokens, vec![Token::new(TokenKind::Text, "anything: {goes} = here")]);
    }

    #[test]
    fn test_every_scanner_is_lossless() {
        let lines = [
            "{\"a\": [1, 2.5e-3, true, null], \"b\": \"x\\\"y\"}",
            "  key : value # trailing",
            "[section]",
            "  name = \"quoted\" ; note",
            "- item",
            "---",
            "unterminated \"string",
            "Email me at someone@example.com or visit https://example.com/path!",
            "\t\tmixed\tTABS  and   spaces ",
            "名前 = 値 : 😀",
            "==::,,{{]]",
            "\"",
            " ",
        ];
        for ft in ALL_TYPES {
            for line in lines {
                assert_eq!(joined(&tokenize(ft, line)), line, "{ft:?}: {line}");
            }
        }
    }

    #[test]
    fn test_color_class_mapping() {
        assert_eq!(TokenKind::Key.color_class(), ColorClass::Key);
        assert_eq!(TokenKind::BraceOpen.color_class(), ColorClass::Bracket);
        assert_eq!(TokenKind::Equals.color_class(), ColorClass::Punctuation);
        assert_eq!(TokenKind::QuotedText.color_class(), ColorClass::String);
        assert_eq!(TokenKind::TextSymbol.color_class(), ColorClass::Accent);
    }

    #[test]
    fn test_plain_number() {
        assert!(is_plain_number("42", false));
        assert!(is_plain_number("-3.14", false));
        assert!(is_plain_number("1e10", true));
        assert!(is_plain_number("2.5E-3", true));
        assert!(!is_plain_number("1e10", false));
        assert!(!is_plain_number("1.", false));
        assert!(!is_plain_number(".5", false));
        assert!(!is_plain_number("-", false));
        assert!(!is_plain_number("1e", true));
        assert!(!is_plain_number("abc", true));
    }

    #[test]
    fn test_push_key_part_keeps_whitespace() {
        let mut tokens = Vec::new();
        push_key_part(&mut tokens, "  name  ", TokenKind::Text);
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Text, "  "),
                Token::new(TokenKind::Key, "name"),
                Token::new(TokenKind::Text, "  "),
            ]
        );
    }
}
