//! Shared driver for the six generation commands.
//!
//! The commands differ only in their [`CommandKind`]; everything else -
//! selection handling, the engine run, and result injection - is identical.

use std::path::Path;

use wingman_core::{CommandKind, Engine, OllamaClient, SettingsStore};

/// Rule printed around injected replies, same width as the editor original.
const DIVIDER: &str = "----------------------------------------------------------------------------------------------------------------";

pub(crate) async fn run(
    kind: CommandKind,
    file: &Path,
    lines: Option<&str>,
    write: bool,
    project: &Path,
) -> miette::Result<()> {
    let document = std::fs::read_to_string(file)
        .map_err(|e| miette::miette!("Failed to read {}: {}", file.display(), e))?;

    // An omitted range means no selection; the engine substitutes the whole
    // document behind a continuation marker.
    let (selection, end_line) = match lines {
        Some(range) => {
            let (start, end) = parse_line_range(range, &document)?;
            (slice_lines(&document, start, end), end)
        }
        None => (String::new(), document.lines().count()),
    };

    let store = SettingsStore::new(SettingsStore::default_path());
    let persisted = store.load();

    let engine = Engine::new(OllamaClient::new(), project);
    let file_path = file.display().to_string();

    println!("Wingman is thinking...");
    let reply = engine
        .run(kind, &file_path, &selection, &document, persisted.as_ref())
        .await;

    if write {
        let updated = inject_after_line(&document, end_line, &reply);
        std::fs::write(file, updated)
            .map_err(|e| miette::miette!("Failed to write {}: {}", file.display(), e))?;
        println!("Wingman has finished thinking. Reply written to {}.", file.display());
    } else {
        println!("{DIVIDER}");
        println!("{reply}");
        println!("{DIVIDER}");
    }

    Ok(())
}

/// Parse a 1-based inclusive `START:END` range against the document.
fn parse_line_range(range: &str, document: &str) -> miette::Result<(usize, usize)> {
    let (start, end) = range
        .split_once(':')
        .ok_or_else(|| miette::miette!("Invalid line range '{}', expected START:END", range))?;

    let start: usize = start
        .trim()
        .parse()
        .map_err(|_| miette::miette!("Invalid start line '{}'", start))?;
    let end: usize = end
        .trim()
        .parse()
        .map_err(|_| miette::miette!("Invalid end line '{}'", end))?;

    let total = document.lines().count();
    if start == 0 || end < start || end > total {
        return Err(miette::miette!(
            "Line range {}:{} is outside the file (1:{})",
            start,
            end,
            total
        ));
    }

    Ok((start, end))
}

/// Extract lines `start..=end` (1-based) from the document.
fn slice_lines(document: &str, start: usize, end: usize) -> String {
    document
        .lines()
        .skip(start - 1)
        .take(end - start + 1)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rebuild the document with the reply inserted after `line`, wrapped in
/// divider rules the way the editor original inserted it after the selection.
fn inject_after_line(document: &str, line: usize, reply: &str) -> String {
    let lines: Vec<&str> = document.lines().collect();
    let split = line.min(lines.len());

    let mut out = Vec::with_capacity(lines.len() + 8);
    out.extend_from_slice(&lines[..split]);
    out.push("");
    out.push(DIVIDER);
    out.push(reply);
    out.push("");
    out.push(DIVIDER);
    out.extend_from_slice(&lines[split..]);

    let mut rebuilt = out.join("\n");
    if document.ends_with('\n') {
        rebuilt.push('\n');
    }
    rebuilt
}
