/// Bracket and quote auto-pairing.

/// Opening char and the char that closes it.
pub const PAIRS: &[(char, char)] = &[
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('"', '"'),
    ('\'', '\''),
    ('`', '`'),
];

/// The closing partner of `open`, if it is an auto-paired char.
pub fn closing_for(open: char) -> Option<char> {
    PAIRS
        .iter()
        .find(|(o, _)| *o == open)
        .map(|&(_, close)| close)
}

/// The two-char string to insert when `c` is typed with auto-pairing on.
/// The cursor belongs between the two chars.
pub fn auto_pair(c: char) -> Option<String> {
    closing_for(c).map(|close| [c, close].iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_for() {
        assert_eq!(closing_for('{'), Some('}'));
        assert_eq!(closing_for('['), Some(']'));
        assert_eq!(closing_for('('), Some(')'));
        assert_eq!(closing_for('`'), Some('`'));
        assert_eq!(closing_for('}'), None);
        assert_eq!(closing_for('a'), None);
    }

    #[test]
    fn test_auto_pair() {
        assert_eq!(auto_pair('"').as_deref(), Some("\"\""));
        assert_eq!(auto_pair('{').as_deref(), Some("{}"));
        assert_eq!(auto_pair('x'), None);
    }
}
