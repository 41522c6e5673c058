/// TOML line scanner. Headers and comments are whole-line tokens; an
/// assignment splits at the first `=` and the value side is scanned for
/// strings, numbers, booleans, arrays, inline tables and trailing comments.
use super::{push_key_part, Token, TokenKind};

pub(super) fn tokenize(line: &str) -> Vec<Token> {
    let trimmed = line.trim();
    if trimmed.starts_with('#') {
        return vec![Token::new(TokenKind::Comment, line)];
    }
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return vec![Token::new(TokenKind::Section, line)];
    }

    let Some(eq) = line.find('=') else {
        return vec![Token::new(TokenKind::Text, line)];
    };

    let mut tokens = Vec::new();
    push_key_part(&mut tokens, &line[..eq], TokenKind::Text);
    tokens.push(Token::new(TokenKind::Equals, "="));
    scan_value(&line[eq + 1..], &mut tokens);
    tokens
}

fn scan_value(value: &str, tokens: &mut Vec<Token>) {
    let chars: Vec<char> = value.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;
        let kind = match c {
            c if c.is_whitespace() => {
                i = run_end(&chars, i, char::is_whitespace);
                TokenKind::Text
            }
            '#' => {
                i = chars.len();
                TokenKind::Comment
            }
            '"' | '\'' => {
                i = quoted_end(&chars, i);
                TokenKind::String
            }
            '{' | '}' | '[' | ']' | ',' | '=' => {
                i += 1;
                match c {
                    '{' => TokenKind::BraceOpen,
                    '}' => TokenKind::BraceClose,
                    '[' => TokenKind::BracketOpen,
                    ']' => TokenKind::BracketClose,
                    ',' => TokenKind::Comma,
                    _ => TokenKind::Equals,
                }
            }
            c if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => {
                // Covers dates, hex/octal/binary prefixes and `_` separators.
                i = run_end(&chars, i + 1, |ch| {
                    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '+' | '-' | ':')
                });
                TokenKind::Number
            }
            c if c.is_alphabetic() || c == '_' => {
                i = run_end(&chars, i, |ch| ch.is_alphanumeric() || matches!(ch, '_' | '-'));
                let word: String = chars[start..i].iter().collect();
                match word.as_str() {
                    "true" | "false" => TokenKind::Boolean,
                    "inf" | "nan" => TokenKind::Number,
                    _ if next_non_space(&chars, i) == Some('=') => TokenKind::Key,
                    _ => TokenKind::Text,
                }
            }
            _ => {
                i += 1;
                TokenKind::Text
            }
        };
        tokens.push(Token::new(kind, chars[start..i].iter().collect::<String>()));
    }
}

fn run_end(chars: &[char], from: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut end = from;
    while end < chars.len() && pred(chars[end]) {
        end += 1;
    }
    end
}

/// One past the closing quote; basic (`"`) strings honour backslash escapes,
/// literal (`'`) strings do not.
fn quoted_end(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' if quote == '"' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}

fn next_non_space(chars: &[char], from: usize) -> Option<char> {
    chars[from..].iter().copied().find(|c| !c.is_whitespace())
}
