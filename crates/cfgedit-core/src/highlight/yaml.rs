/// YAML line scanner. Comments, document markers and list items are
/// whole-line tokens; otherwise the line splits at its first `:`.
use super::{is_plain_number, push_key_part, Token, TokenKind};

pub(super) fn tokenize(line: &str) -> Vec<Token> {
    let trimmed = line.trim();

    if trimmed.starts_with('#') {
        return vec![Token::new(TokenKind::Comment, line)];
    }
    if trimmed == "---" || trimmed == "..." {
        return vec![Token::new(TokenKind::DocumentMarker, line)];
    }
    if trimmed.starts_with("- ") {
        return vec![Token::new(TokenKind::ListItem, line)];
    }

    let Some(colon) = line.find(':') else {
        return vec![Token::new(TokenKind::Text, line)];
    };

    let mut tokens = Vec::new();
    push_key_part(&mut tokens, &line[..colon], TokenKind::Indentation);
    tokens.push(Token::new(TokenKind::Colon, ":"));

    let rest = &line[colon + 1..];
    if !rest.is_empty() {
        tokens.push(Token::new(value_kind(rest.trim()), rest));
    }
    tokens
}

fn value_kind(value: &str) -> TokenKind {
    if value.starts_with('"') || value.starts_with('\'') {
        return TokenKind::String;
    }
    if value.starts_with("- ") {
        return TokenKind::ListItem;
    }
    match value {
        "true" | "false" | "yes" | "no" => TokenKind::Boolean,
        "null" | "~" => TokenKind::Null,
        v if is_plain_number(v, true) => TokenKind::Number,
        _ => TokenKind::Value,
    }
}
