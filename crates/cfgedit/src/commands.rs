/// Subcommand implementations. Each writes its report to `out` and returns
/// whether the run was clean (false makes the process exit non-zero).
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use cfgedit_config::{HexColor, SyntaxPalette};
use cfgedit_core::cursor::char_to_pos;
use cfgedit_core::{
    tokenize, validate, ChangeKind, DiffSummary, FileType, SearchEngine, SearchOptions,
    TextBuffer, TextStats,
};

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

pub fn check(files: &[impl AsRef<Path>], out: &mut impl Write) -> Result<bool> {
    let mut clean = true;
    for path in files {
        let path = path.as_ref();
        if !FileType::from_path(path).is_json() {
            tracing::info!("Skipping {}: not a JSON file", path.display());
            continue;
        }
        let errors = validate(&read(path)?);
        for e in &errors {
            writeln!(out, "{}:{}:{}: {}", path.display(), e.line, e.column, e.message)?;
        }
        clean &= errors.is_empty();
    }
    Ok(clean)
}

/// Dumps tokens, or colors them when `palette` is given. `background` fills
/// behind each colored token.
pub fn highlight(
    path: &Path,
    palette: Option<&SyntaxPalette>,
    background: Option<HexColor>,
    out: &mut impl Write,
) -> Result<bool> {
    let file_type = FileType::from_path(path);
    let text = read(path)?;
    let bg = background
        .map(|c| format!("\x1b[48;2;{};{};{}m", c.r, c.g, c.b))
        .unwrap_or_default();
    for (i, line) in text.split('\n').enumerate() {
        let tokens: Vec<String> = tokenize(file_type, line)
            .iter()
            .map(|t| match palette {
                Some(p) => {
                    let c = p.color(t.kind.color_class(), true);
                    format!("{bg}\x1b[38;2;{};{};{}m{}\x1b[0m", c.r, c.g, c.b, t.text)
                }
                None => format!("{}:{:?}", t.kind.name(), t.text),
            })
            .collect();
        let sep = if palette.is_some() { "" } else { " " };
        writeln!(out, "{:>4} {}", i + 1, tokens.join(sep))?;
    }
    Ok(true)
}

pub fn search(
    query: &str,
    path: &Path,
    options: SearchOptions,
    out: &mut impl Write,
) -> Result<bool> {
    let text = read(path)?;
    let buffer = TextBuffer::from(text.as_str());
    let mut engine = SearchEngine::with_options(options);
    let count = engine.search(query, &text);
    for m in &engine.matches {
        let pos = char_to_pos(&buffer, m.start);
        writeln!(out, "{}:{}", pos.line + 1, pos.col + 1)?;
    }
    writeln!(out, "{count} matches")?;
    Ok(true)
}

pub fn diff(old: &Path, new: &Path, out: &mut impl Write) -> Result<bool> {
    let lines = cfgedit_core::diff(&read(old)?, &read(new)?);
    for line in &lines {
        let prefix = match line.kind {
            ChangeKind::Added => '+',
            ChangeKind::Deleted => '-',
            ChangeKind::Modified => '~',
            ChangeKind::Unchanged => ' ',
        };
        writeln!(out, "{prefix}{}", line.display_content())?;
    }
    writeln!(out, "{}", DiffSummary::of(&lines))?;
    Ok(true)
}

pub fn stats(path: &Path, out: &mut impl Write) -> Result<bool> {
    writeln!(out, "{}", TextStats::of(&read(path)?))?;
    Ok(true)
}
