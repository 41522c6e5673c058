/// CFG / INI line scanner: `#` and `;` comments, `[section]` headers and
/// `key = value` entries split at the first `=`.
use super::{is_plain_number, push_key_part, Token, TokenKind};

pub(super) fn tokenize(line: &str) -> Vec<Token> {
    let trimmed = line.trim();

    if trimmed.starts_with('#') || trimmed.starts_with(';') {
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

    let rest = &line[eq + 1..];
    if !rest.is_empty() {
        tokens.push(Token::new(value_kind(rest.trim()), rest));
    }
    tokens
}

fn value_kind(value: &str) -> TokenKind {
    if value.starts_with('"') || value.starts_with('\'') {
        return TokenKind::String;
    }
    match value {
        "true" | "false" | "yes" | "no" | "on" | "off" | "enable" | "disable" => TokenKind::Boolean,
        v if is_plain_number(v, false) => TokenKind::Number,
        _ => TokenKind::Value,
    }
}
