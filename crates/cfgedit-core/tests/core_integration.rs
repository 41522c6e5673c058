// Integration tests for the editing core.
//
// These exercise the public API across modules: tokenizers against the
// metrics layer, the validator on hostile input, and the editor driving
// search, validation and history together.

use cfgedit_config::EditorConfig;
use cfgedit_core::metrics::{text_width, width_up_to_char};
use cfgedit_core::{
    diff, suggest, tokenize, validate, ChangeKind, Editor, ErrorCategory, ErrorKind, FileType,
    Monospace, SearchEngine,
};

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

const SAMPLE_LINES: &[&str] = &[
    "",
    "   ",
    "{\"name\": \"Steve\", \"hp\": 20.5, \"tags\": [1, -2e3, true, null]}",
    "  \"unterminated: \"abc",
    "key = value # trailing",
    "[section.sub]",
    "- item: \"quoted \\\" escape\"",
    "---",
    "server.port: 25565",
    "; comment line",
    "// slash comment",
    "Visit https://example.com or mail a@b.io (soon!)",
    "\t\tmixed\tTABS and 名前 = 値 😀",
    "}}]]{{[[,,::",
    "\"",
    "\\",
];

fn editor(file_type: FileType, text: &str) -> Editor {
    let config = EditorConfig {
        history_group_timeout_ms: 0,
        ..EditorConfig::default()
    };
    let mut ed = Editor::with_config(file_type, &config);
    ed.set_text(text);
    ed
}

// ── Tokenizers ─────────────────────────────────────────────────────────

#[test]
fn tokenization_is_lossless_for_every_format() {
    for ft in ALL_TYPES {
        for line in SAMPLE_LINES {
            let joined: String = tokenize(ft, line).iter().map(|t| t.text.as_str()).collect();
            assert_eq!(&joined, line, "{ft:?}");
        }
    }
}

#[test]
fn tokens_are_never_empty() {
    for ft in ALL_TYPES {
        for line in SAMPLE_LINES {
            assert!(tokenize(ft, line).iter().all(|t| !t.text.is_empty()), "{ft:?}: {line}");
        }
    }
}

#[test]
fn metrics_identities_hold_for_every_format() {
    let mono = Monospace::new(7);
    for ft in ALL_TYPES {
        for line in SAMPLE_LINES {
            let len = line.chars().count();
            assert_eq!(width_up_to_char(ft, line, 0, &mono), 0);
            assert_eq!(
                width_up_to_char(ft, line, len, &mono),
                text_width(ft, line, &mono),
                "{ft:?}: {line}"
            );
        }
    }
}

// ── Validator ──────────────────────────────────────────────────────────

#[test]
fn validator_is_total() {
    let nested = "[".repeat(500) + &"]".repeat(499);
    let inputs = [
        "",
        " \n\t ",
        "\u{0}\u{1}\u{7f}\u{fffd}",
        "{{{{",
        "]]]]",
        "\"",
        "\\",
        "{\"a\":}",
        ",",
        "😀😀😀",
        nested.as_str(),
    ];
    for input in inputs {
        let errors = validate(input);
        let len = input.chars().count();
        for e in &errors {
            assert!(e.start <= e.end && e.end <= len, "{input:?}: {e:?}");
            assert!(e.line >= 1 && e.column >= 1);
        }
    }
}

#[test]
fn unmatched_openers_are_each_reported() {
    let text = "[\n  {\"a\": [1, 2";
    let errors = validate(text);
    let structural: Vec<usize> = errors
        .iter()
        .filter(|e| e.category() == ErrorCategory::Structural)
        .map(|e| e.start)
        .collect();
    for opener in [0, 4, 10] {
        assert!(structural.contains(&opener), "{opener} in {structural:?}");
    }
}

#[test]
fn valid_json_has_no_errors() {
    assert!(validate("{\"a\": 1, \"b\": true}").is_empty());
    let nested = format!("{}{}", "[".repeat(200), "]".repeat(200));
    assert!(validate(&nested).is_empty());
}

#[test]
fn trailing_comma_points_at_the_comma() {
    let errors = validate("{\"a\": 1,}");
    assert!(errors
        .iter()
        .any(|e| e.kind == ErrorKind::TrailingComma && e.start == 7 && e.end == 8));
}

#[test]
fn unterminated_string_runs_to_end_of_text() {
    let text = "{\"a\": \"oops";
    let errors = validate(text);
    let err = errors
        .iter()
        .find(|e| e.kind == ErrorKind::UnterminatedString)
        .unwrap();
    assert_eq!((err.start, err.end), (6, text.chars().count()));
}

// ── Search ─────────────────────────────────────────────────────────────

#[test]
fn search_cycles_through_overlapping_matches() {
    let mut engine = SearchEngine::new();
    assert_eq!(engine.search("ab", "ababab"), 3);
    let starts: Vec<usize> = engine.matches.iter().map(|m| m.start).collect();
    assert_eq!(starts, vec![0, 2, 4]);

    assert_eq!(engine.current_match_offset(), Some(0));
    engine.next_match();
    assert_eq!(engine.current_match_offset(), Some(2));
    engine.next_match();
    assert_eq!(engine.current_match_offset(), Some(4));
    engine.next_match();
    assert_eq!(engine.current_match_offset(), Some(0));

    engine.previous_match();
    assert_eq!(engine.current_match_offset(), Some(4));
    engine.previous_match();
    assert_eq!(engine.current_match_offset(), Some(2));
    engine.previous_match();
    assert_eq!(engine.current_match_offset(), Some(0));
}

// ── Suggestions and diff ───────────────────────────────────────────────

#[test]
fn empty_buffer_suggests_openers() {
    assert_eq!(suggest("", 0), vec!["{", "["]);
}

#[test]
fn diff_of_identical_text_is_unchanged() {
    for text in SAMPLE_LINES {
        let doc = format!("{text}\nsecond\n{text}");
        let lines = diff(&doc, &doc);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.kind == ChangeKind::Unchanged));
    }
}

// ── Editor ─────────────────────────────────────────────────────────────

#[test]
fn cursor_stays_in_bounds_under_random_edits() {
    let mut ed = editor(FileType::Json, "{\"seed\": [1, 2, 3]}");
    // Small LCG so the sequence is reproducible.
    let mut state: u32 = 0x2545_f491;
    for _ in 0..2000 {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        match (state >> 24) % 10 {
            0 => {
                ed.insert_char('{');
            }
            1 => {
                ed.insert_char('é');
            }
            2 => {
                ed.insert_newline();
            }
            3 => {
                ed.backspace();
            }
            4 => {
                ed.delete_forward();
            }
            5 => ed.move_left(),
            6 => ed.move_down(),
            7 => {
                ed.undo();
            }
            8 => ed.set_cursor((state >> 8) as usize % 64),
            _ => {
                ed.click((state >> 4) as i32 % 400, (state >> 12) as i32 % 300);
            }
        }
        assert!(ed.cursor_offset() <= ed.buffer().len_chars());
    }
}

#[test]
fn editing_session_end_to_end() {
    let mut ed = editor(FileType::Json, "");
    ed.set_auto_close_brackets(false);
    for c in "{\"speed\": 1".chars() {
        ed.insert_char(c);
    }
    assert_eq!(ed.text(), "{\"speed\": 1");
    assert!(ed.errors().iter().any(|e| e.kind == ErrorKind::UnclosedBrace));

    ed.insert_char('}');
    assert!(ed.errors().is_empty());

    assert_eq!(ed.start_search("speed"), 1);
    ed.move_to_start();
    ed.insert_text("   ");
    assert_eq!(ed.search().current_match_offset(), Some(5));

    ed.undo();
    assert_eq!(ed.text(), "{\"speed\": 1}");
    assert_eq!(ed.search().current_match_offset(), Some(2));
    assert_eq!(ed.stats().words, 2);
}
