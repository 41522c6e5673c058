/// Prose scanner for `.txt` files.
///
/// Labels are best effort: a whitespace-delimited run that looks like a
/// URL, e-mail address or number is kept whole; anything else is split at
/// punctuation and each word is checked for a header-like shape.
use std::sync::LazyLock;

use regex::Regex;

use super::{Token, TokenKind};

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?([eE][+-]?\d+)?%?$").expect("valid regex"));
static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:https?|ftp)://\S+|www\.\S+\.\S+|\S+\.[a-z]{2,}(?:/\S*)?)$")
        .expect("valid regex")
});
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid regex")
});

const BRACKETS: &[char] = &['(', ')', '[', ']', '{', '}'];
const SYMBOLS: &[char] = &[
    '+', '-', '*', '/', '=', '<', '>', '!', '?', ':', ';', '.', ',', '&', '|', '^', '~', '@', '#',
    '$', '%',
];

pub(super) fn tokenize(line: &str) -> Vec<Token> {
    let trimmed = line.trim();
    if trimmed.starts_with('#') || trimmed.starts_with("//") {
        return vec![Token::new(TokenKind::Comment, line)];
    }

    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            tokens.push(Token::new(TokenKind::Text, c.to_string()));
            i += 1;
        } else if BRACKETS.contains(&c) {
            tokens.push(Token::new(TokenKind::Bracket, c.to_string()));
            i += 1;
        } else if c == '"' || c == '\'' {
            let end = chars[i + 1..]
                .iter()
                .position(|&q| q == c)
                .map_or(chars.len(), |p| i + 1 + p + 1);
            let quoted: String = chars[i..end].iter().collect();
            tokens.push(Token::new(TokenKind::QuotedText, quoted));
            i = end;
        } else {
            let end = i + chars[i..]
                .iter()
                .position(|&ch| ends_run(ch))
                .unwrap_or(chars.len() - i);
            let run: String = chars[i..end].iter().collect();
            push_run(&run, &mut tokens);
            i = end;
        }
    }

    tokens
}

fn ends_run(c: char) -> bool {
    c.is_whitespace() || BRACKETS.contains(&c) || c == '"' || c == '\''
}

/// Sentence punctuation that may follow a whole-run label.
const TRAILING: &[char] = &['.', ',', ';', ':', '!', '?'];

fn push_run(run: &str, tokens: &mut Vec<Token>) {
    let core = run.trim_end_matches(TRAILING);
    let whole = if NUMBER.is_match(core) {
        Some(TokenKind::Number)
    } else if EMAIL.is_match(core) {
        Some(TokenKind::Email)
    } else if URL.is_match(core) {
        Some(TokenKind::Url)
    } else {
        None
    };
    if let Some(kind) = whole {
        tokens.push(Token::new(kind, core));
        for c in run[core.len()..].chars() {
            tokens.push(Token::new(TokenKind::TextSymbol, c.to_string()));
        }
        return;
    }

    let mut word = String::new();
    for c in run.chars() {
        if SYMBOLS.contains(&c) {
            flush_word(&mut word, tokens);
            tokens.push(Token::new(TokenKind::TextSymbol, c.to_string()));
        } else {
            word.push(c);
        }
    }
    flush_word(&mut word, tokens);
}

fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
    if word.is_empty() {
        return;
    }
    let kind = if is_header(word) {
        TokenKind::Header
    } else if NUMBER.is_match(word) {
        TokenKind::Number
    } else {
        TokenKind::Text
    };
    tokens.push(Token::new(kind, std::mem::take(word)));
}

/// Starts uppercase, shorter than 50 chars, and more than 30% uppercase.
fn is_header(word: &str) -> bool {
    let len = word.chars().count();
    let upper = word.chars().filter(|c| c.is_uppercase()).count();
    word.chars().next().is_some_and(char::is_uppercase) && len < 50 && upper * 10 > len * 3
}
