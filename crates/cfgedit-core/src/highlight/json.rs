/// JSON / JSON5 line scanner.
///
/// Tracks two flags: `is_key` (set after `{` or `,`) decides whether the next
/// string is a key, and `expect_value` (set after `:` or a key) decides
/// whether it is a value. Strings keep their quotes.
use super::{Token, TokenKind};

const SYMBOLS: &[char] = &[
    '=', ';', '+', '*', '/', '%', '&', '|', '!', '?', '<', '>', '~', '^', '@', '#', '$', '(', ')',
];

pub(super) fn tokenize(line: &str) -> Vec<Token> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut is_key = false;
    let mut expect_value = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => {
                let (end, closed) = string_end(&chars, i);
                let text: String = chars[i..end].iter().collect();
                let kind = if !closed {
                    TokenKind::String
                } else if is_key {
                    expect_value = true;
                    TokenKind::Key
                } else if expect_value {
                    TokenKind::String
                } else {
                    TokenKind::Text
                };
                tokens.push(Token::new(kind, text));
                i = end;
                continue;
            }
            '{' => {
                tokens.push(Token::new(TokenKind::BraceOpen, "{"));
                is_key = true;
                expect_value = false;
            }
            '}' => {
                tokens.push(Token::new(TokenKind::BraceClose, "}"));
                is_key = false;
                expect_value = false;
            }
            '[' => {
                tokens.push(Token::new(TokenKind::BracketOpen, "["));
                is_key = false;
                expect_value = false;
            }
            ']' => {
                tokens.push(Token::new(TokenKind::BracketClose, "]"));
                is_key = false;
                expect_value = false;
            }
            ':' => {
                tokens.push(Token::new(TokenKind::Colon, ":"));
                is_key = false;
                expect_value = true;
            }
            ',' => {
                tokens.push(Token::new(TokenKind::Comma, ","));
                is_key = true;
                expect_value = false;
            }
            ' ' | '\t' => tokens.push(Token::new(TokenKind::Text, c.to_string())),
            '-' if !starts_number(&chars, i + 1) => {
                tokens.push(Token::new(TokenKind::Symbol, "-"));
            }
            c if SYMBOLS.contains(&c) => tokens.push(Token::new(TokenKind::Symbol, c.to_string())),
            c if c.is_ascii_digit() || c == '-' || c == '.' => {
                let end = scan_while(&chars, i + 1, is_numeral_char);
                let number: String = chars[i..end].iter().collect();
                tokens.push(Token::new(TokenKind::Number, number));
                i = end;
                continue;
            }
            c if c.is_alphabetic() || c == '_' => {
                let end = scan_while(&chars, i + 1, |ch| ch.is_alphanumeric() || ch == '_');
                let word: String = chars[i..end].iter().collect();
                let kind = match word.as_str() {
                    "true" | "false" => TokenKind::Boolean,
                    "null" => TokenKind::Null,
                    _ => TokenKind::Text,
                };
                tokens.push(Token::new(kind, word));
                i = end;
                continue;
            }
            c => tokens.push(Token::new(TokenKind::Text, c.to_string())),
        }
        i += 1;
    }

    tokens
}

/// Index one past the closing quote of the string opened at `start`, and
/// whether it was closed. Unterminated strings run to the end of the line.
fn string_end(chars: &[char], start: usize) -> (usize, bool) {
    let mut escaped = false;
    for (offset, &c) in chars[start + 1..].iter().enumerate() {
        match c {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => return (start + offset + 2, true),
            _ => escaped = false,
        }
    }
    (chars.len(), false)
}

fn starts_number(chars: &[char], i: usize) -> bool {
    chars.get(i).is_some_and(|c| c.is_ascii_digit() || *c == '.')
}

fn is_numeral_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')
}

fn scan_while(chars: &[char], from: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut end = from;
    while end < chars.len() && pred(chars[end]) {
        end += 1;
    }
    end
}
