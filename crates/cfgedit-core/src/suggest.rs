/// Context-sensitive completion candidates for JSON documents.
use std::sync::LazyLock;

use regex::Regex;

use crate::validator;

static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"\s*:"#).expect("valid regex"));

const COMMON_KEYS: &[&str] = &[
    "type", "name", "id", "count", "amount", "value", "data", "config", "enabled", "disabled",
    "width", "height", "x", "y", "z", "position", "color", "size", "speed", "duration", "delay",
    "interval", "random", "min", "max", "average", "total", "sum", "length", "weight", "price",
    "quality", "level", "tier", "rarity", "category", "group", "class", "version", "author",
    "description", "title", "label", "text", "message", "content", "items", "list", "array",
    "object", "properties", "settings", "options", "parameters", "args", "arguments", "input",
    "output", "result", "effect", "action", "event", "trigger", "condition", "requirement",
    "target", "source", "destination", "from", "to", "start", "end",
];

const KEY_VALUES: &[(&str, &[&str])] = &[
    ("type", &["object", "array", "string", "number", "boolean", "integer"]),
    ("format", &["json", "yaml", "xml", "csv", "text"]),
    ("mode", &["read", "write", "append", "create", "delete", "update"]),
    ("status", &["success", "error", "warning", "info", "pending", "completed"]),
    ("color", &["red", "green", "blue", "yellow", "black", "white", "gray"]),
    ("direction", &["up", "down", "left", "right", "forward", "backward"]),
];

const LITERALS: &[&str] = &["\"\"", "0", "1", "true", "false", "null", "[]", "{}"];
const COUNT_KEYS: &[&str] = &["count", "amount", "quantity"];
const STRING_WORDS: &[&str] = &["text", "value", "data", "content"];

/// The built-in key dictionary, in suggestion order.
pub fn common_keys() -> &'static [&'static str] {
    COMMON_KEYS
}

/// Enumerated values known for `key`, unquoted. Empty for unknown keys.
pub fn values_for_key(key: &str) -> &'static [&'static str] {
    KEY_VALUES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, values)| values)
        .unwrap_or(&[])
}

/// Suggestions for a cursor at char offset `cursor` in `text`. Offsets past
/// the end are clamped. The first entry is the default pick.
pub fn suggest(text: &str, cursor: usize) -> Vec<String> {
    if text.is_empty() {
        return vec!["{".to_string(), "[".to_string()];
    }

    let split = text.char_indices().nth(cursor).map_or(text.len(), |(b, _)| b);
    let (before, after) = text.split_at(split);

    let mut suggestions = if is_key_context(before) {
        suggest_keys(text)
    } else if is_value_context(before, after) {
        suggest_values(&current_key(before))
    } else if is_string_context(before) {
        STRING_WORDS.iter().map(|s| s.to_string()).collect()
    } else {
        Vec::new()
    };

    if suggestions.is_empty() {
        suggestions = suggest_structural(text, before);
    }
    dedup(suggestions)
}

fn is_key_context(before: &str) -> bool {
    let brace = before.rfind('{');
    let bracket = before.rfind('[');
    let comma = before.rfind(',');
    let colon = before.rfind(':');

    // `None` orders before any position, like a missing character would.
    (brace > colon && brace > comma)
        || (bracket > colon && comma > colon)
        || (comma > colon && before.trim_end().ends_with(','))
}

fn is_value_context(before: &str, after: &str) -> bool {
    let colon = before.rfind(':');
    let after = after.trim_start();
    colon > before.rfind('{')
        && colon > before.rfind('[')
        && !after.starts_with('}')
        && !after.starts_with(']')
}

/// Inside a string when an odd number of unescaped quotes precede the cursor.
fn is_string_context(before: &str) -> bool {
    let mut quotes = 0;
    let mut escaped = false;
    for c in before.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => quotes += 1,
            _ => {}
        }
    }
    quotes % 2 == 1
}

fn suggest_keys(text: &str) -> Vec<String> {
    let existing = KEY_PATTERN
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str());
    COMMON_KEYS
        .iter()
        .copied()
        .chain(existing)
        .map(|key| format!("\"{key}\": "))
        .collect()
}

fn suggest_values(key: &str) -> Vec<String> {
    let mut values: Vec<String> = values_for_key(key)
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect();
    values.extend(LITERALS.iter().map(|s| s.to_string()));
    if COUNT_KEYS.contains(&key) {
        values.extend((0..7).map(|p| (1u32 << p).to_string()));
    }
    values
}

fn suggest_structural(text: &str, before: &str) -> Vec<String> {
    let stubs: &[&str] = if validator::parse(text).is_ok() {
        &[",", "}", "]"]
    } else {
        match before.trim_end().chars().last() {
            Some('{' | '[' | ',') => &["\"\": "],
            Some(':') => &["\"\"", "0", "true", "false"],
            _ => &[],
        }
    };
    stubs.iter().map(|s| s.to_string()).collect()
}

/// Nearest `"key":` at the start of a line, scanning backward from the
/// cursor. Empty when none is found.
fn current_key(before: &str) -> String {
    before
        .split('\n')
        .rev()
        .map(str::trim)
        .filter_map(|line| line.split_once(':'))
        .map(|(key, _)| key.trim())
        .find(|key| key.len() >= 2 && key.starts_with('"') && key.ends_with('"'))
        .map(|key| key[1..key.len() - 1].to_string())
        .unwrap_or_default()
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
