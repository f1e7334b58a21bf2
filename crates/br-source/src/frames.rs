use std::path::Path;

use anyhow::{Context, Result};
use br_core::config::ExtractMode;

/// Drop blank (whitespace-only) lines at both ends.
///
/// Interior blank lines are kept: they are rows of the frame.
fn trim_blank_edges(mut lines: Vec<String>) -> Vec<String> {
    let lead = lines.iter().take_while(|l| l.trim().is_empty()).count();
    let mut lines = lines.split_off(lead);
    let trail = lines.iter().rev().take_while(|l| l.trim().is_empty()).count();
    lines.truncate(lines.len() - trail);
    lines
}

/// Split text into lines on every line boundary a text editor may write.
///
/// Besides `\n` and `\r\n`, a lone `\r`, vertical tab, form feed, the
/// `\x1c`..`\x1e` separators, NEL, and U+2028/U+2029 also end a line. A
/// trailing terminator does not produce an extra empty line.
fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                chars.next_if_eq(&'\n');
                lines.push(std::mem::take(&mut current));
            }
            '\n' | '\u{0B}' | '\u{0C}' | '\u{1C}' | '\u{1D}' | '\u{1E}' | '\u{85}'
            | '\u{2028}' | '\u{2029}' => lines.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Extract the first backtick-delimited literal.
///
/// Returns `None` when the text holds no complete `` `...` `` pair.
///
/// # Example
/// ```
/// use br_source::frames::extract_template;
/// let src = "export const frames = [`\n\n⣿⣿\n⠉⠉\n\n`, `⠀`];";
/// assert_eq!(extract_template(src).unwrap(), vec!["⣿⣿", "⠉⠉"]);
/// assert!(extract_template("no literal here").is_none());
/// ```
#[must_use]
pub fn extract_template(content: &str) -> Option<Vec<String>> {
    let start = content.find('`')? + 1;
    let len = content[start..].find('`')?;
    let body = &content[start..start + len];
    Some(trim_blank_edges(split_lines(body)))
}

/// Extract a block of raw lines, minus the lone brackets of a JS array.
///
/// Lines whose trimmed text is exactly `[` or `]` are dropped, the first
/// `max_lines` remaining lines are kept, then blank edges are trimmed.
///
/// # Example
/// ```
/// use br_source::frames::extract_line_block;
/// let src = "[\n\n⣀⣀\n⠛⠛\n]\n";
/// assert_eq!(extract_line_block(src, 40), vec!["⣀⣀", "⠛⠛"]);
/// ```
#[must_use]
pub fn extract_line_block(content: &str, max_lines: usize) -> Vec<String> {
    let lines = split_lines(content)
        .into_iter()
        .filter(|l| !matches!(l.trim(), "[" | "]"))
        .take(max_lines)
        .collect();
    trim_blank_edges(lines)
}

/// Apply an extraction mode to already-loaded text.
///
/// # Errors
/// Returns an error if no frame can be found or the frame is blank.
pub fn extract(content: &str, mode: &ExtractMode) -> Result<Vec<String>> {
    let lines = match mode {
        ExtractMode::Template => {
            extract_template(content).context("Aucun littéral `...` trouvé")?
        }
        ExtractMode::LineBlock(max_lines) => extract_line_block(content, *max_lines),
    };
    if lines.is_empty() {
        anyhow::bail!("Frame vide après extraction ({mode:?})");
    }
    Ok(lines)
}

/// Read a text file and extract its glyph frame.
///
/// # Errors
/// Returns an error naming `path` if the file cannot be read as UTF-8, or if
/// extraction yields no frame.
///
/// # Example
/// ```no_run
/// use br_core::config::ExtractMode;
/// use br_source::frames::load_frame;
/// use std::path::Path;
/// let lines = load_frame(Path::new("docs/assets/fairy-frames.js"), &ExtractMode::Template).unwrap();
/// ```
pub fn load_frame(path: &Path, mode: &ExtractMode) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let lines = extract(&content, mode).with_context(|| format!("{}", path.display()))?;
    log::debug!(
        "{} : {} ligne(s) extraites ({mode:?})",
        path.display(),
        lines.len()
    );
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_line_terminator_splits() {
        assert_eq!(split_lines("a\rb\r\nc\nd"), vec!["a", "b", "c", "d"]);
        assert_eq!(
            split_lines("a\u{0B}b\u{0C}c\u{1C}d\u{1D}e\u{1E}f\u{85}g\u{2028}h\u{2029}i"),
            vec!["a", "b", "c", "d", "e", "f", "g", "h", "i"]
        );
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn lone_cr_sources_keep_their_rows() {
        let src = "`\r⣿⣿\r⠉⠉\r`";
        assert_eq!(extract_template(src).unwrap(), vec!["⣿⣿", "⠉⠉"]);
        assert_eq!(extract_line_block("[\r⣀\r⠛\r]\r", 40), vec!["⣀", "⠛"]);
    }

    #[test]
    fn template_keeps_interior_blank_rows() {
        let src = "const f = `\n  \n⣿\n\n⣿\n\t\n`;";
        assert_eq!(extract_template(src).unwrap(), vec!["⣿", "", "⣿"]);
    }

    #[test]
    fn template_takes_first_literal_only() {
        let src = "a = `⠁`; b = `⠂`;";
        assert_eq!(extract_template(src).unwrap(), vec!["⠁"]);
    }

    #[test]
    fn unterminated_template_is_none() {
        assert!(extract_template("x = `⣿⣿").is_none());
    }

    #[test]
    fn blank_braille_cell_is_not_whitespace() {
        // U+2800 is a glyph, not padding
        let src = "`\n⠀⠀\n`";
        assert_eq!(extract_template(src).unwrap(), vec!["⠀⠀"]);
    }

    #[test]
    fn line_block_drops_brackets_and_caps_count() {
        let mut src = String::from("[\n");
        for i in 0..50 {
            src.push_str(&format!("⣿{i}\n"));
        }
        src.push_str("  ]  \n");
        let lines = extract_line_block(&src, 40);
        assert_eq!(lines.len(), 40);
        assert_eq!(lines[0], "⣿0");
        assert_eq!(lines[39], "⣿39");
    }

    #[test]
    fn line_block_counts_blank_lines_before_trimming() {
        let src = "\n\n⣿\n⣿\n⣿\n";
        assert_eq!(extract_line_block(src, 3), vec!["⣿"]);
    }

    #[test]
    fn extract_rejects_blank_frames() {
        assert!(extract("``", &ExtractMode::Template).is_err());
        assert!(extract("[\n]\n", &ExtractMode::LineBlock(40)).is_err());
        assert!(extract("nothing", &ExtractMode::Template).is_err());
    }

    #[test]
    fn load_frame_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.js");
        std::fs::write(&path, "export default `\n⣿⣿\n`;\n").unwrap();
        let lines = load_frame(&path, &ExtractMode::Template).unwrap();
        assert_eq!(lines, vec!["⣿⣿"]);
    }

    #[test]
    fn load_frame_names_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.js");
        let err = load_frame(&path, &ExtractMode::Template).unwrap_err();
        assert!(format!("{err:#}").contains("missing.js"));
    }
}
