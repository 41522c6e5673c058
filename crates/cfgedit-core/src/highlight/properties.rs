/// Java-style `.properties` scanner: `#`/`!` comments and entries split at
/// the first `=` or `:`.
use super::{is_plain_number, push_key_part, Token, TokenKind};

pub(super) fn tokenize(line: &str) -> Vec<Token> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') || trimmed.starts_with('!') {
        return vec![Token::new(TokenKind::Comment, line)];
    }

    let Some(sep) = line.find(['=', ':']) else {
        return vec![Token::new(TokenKind::Text, line)];
    };

    let mut tokens = Vec::new();
    push_key_part(&mut tokens, &line[..sep], TokenKind::Text);
    tokens.push(Token::new(TokenKind::Equals, &line[sep..sep + 1]));

    let rest = &line[sep + 1..];
    if !rest.is_empty() {
        let kind = match rest.trim() {
            "true" | "false" => TokenKind::Boolean,
            v if is_plain_number(v, false) => TokenKind::Number,
            _ => TokenKind::Value,
        };
        tokens.push(Token::new(kind, rest));
    }
    tokens
}
