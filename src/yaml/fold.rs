//! Line width control for serialized YAML.
//!
//! `serde_yaml` writes every scalar on one line, however long. Long string
//! values of mapping entries are rewritten here as folded block scalars
//! (`>-`) broken at single spaces, which a YAML reader joins back into the
//! original string.

use serde_yaml::{Mapping, Value};

/// Maximum width of a generated line, in characters.
pub const MAX_LINE_WIDTH: usize = 120;

/// Spaces added to a key's column for the lines of its block scalar.
const BLOCK_INDENT: usize = 2;

/// Rewrites long string entries of a serialized document to fit `width`.
///
/// Only entries holding a string value are touched. A rewritten entry is
/// checked by parsing it back; if the folded form would not read back as
/// the same string the entry is kept as it was. Words longer than the
/// available width stay on one line.
///
/// # Arguments
///
/// * `yaml`: Document as produced by `serde_yaml`
/// * `width`: Maximum line width in characters
///
/// # Returns
///
/// Document with the same content and folded long lines
pub fn fold_long_scalars(yaml: &str, width: usize) -> String {
    let lines: Vec<&str> = yaml.lines().collect();
    let mut output: Vec<String> = Vec::with_capacity(lines.len());

    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        let Some(entry) = Entry::parse(line) else {
            output.push(line.to_string());
            index += 1;
            continue;
        };

        let block_end = if entry.is_block_header() {
            block_end(&lines, index + 1, entry.key_column)
        } else {
            index + 1
        };
        let entry_lines = &lines[index..block_end];

        let too_wide = entry_lines.iter().any(|line| line.chars().count() > width);
        let folded = too_wide
            .then(|| fold_entry(&entry, entry_lines, width))
            .flatten();
        match folded {
            Some(folded) => output.extend(folded),
            None => output.extend(entry_lines.iter().map(|line| line.to_string())),
        }
        index = block_end;
    }

    let mut result = output.join("\n");
    if yaml.ends_with('\n') {
        result.push('\n');
    }
    result
}

/// A `key: value` line, possibly opening a sequence item.
struct Entry<'a> {
    /// Text before the key: indentation and an optional `- `.
    prefix: &'a str,
    key: &'a str,
    value: &'a str,
    key_column: usize,
}

impl<'a> Entry<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let indent = line.len() - line.trim_start_matches(' ').len();
        let mut key_column = indent;
        let mut rest = &line[indent..];
        if let Some(item) = rest.strip_prefix("- ") {
            rest = item;
            key_column += 2;
        }

        let (key, value) = rest.split_once(": ")?;
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }

        Some(Self {
            prefix: &line[..key_column],
            key,
            value,
            key_column,
        })
    }

    fn is_block_header(&self) -> bool {
        self.value.starts_with('|') || self.value.starts_with('>')
    }
}

/// Returns the index after the last line of a block scalar starting at
/// `start`.
fn block_end(lines: &[&str], start: usize, key_column: usize) -> usize {
    let mut end = start;
    while end < lines.len() {
        let line = lines[end];
        let indent = line.len() - line.trim_start_matches(' ').len();
        if !line.trim().is_empty() && indent <= key_column {
            break;
        }
        end += 1;
    }
    // Trailing blank lines belong to whatever follows.
    while end > start && lines[end - 1].trim().is_empty() {
        end -= 1;
    }
    end
}

/// Folds one entry, or returns `None` when it must stay unchanged.
fn fold_entry(entry: &Entry<'_>, entry_lines: &[&str], width: usize) -> Option<Vec<String>> {
    let value = read_string(entry.key, entry_lines, entry.key_column)?;
    let (content, chomping) = match value.strip_suffix('\n') {
        Some(content) if !content.ends_with('\n') => (content, ""),
        Some(_) => return None,
        None => (value.as_str(), "-"),
    };

    let content_indent = entry.key_column + BLOCK_INDENT;
    let body = fold_content(content, width.saturating_sub(content_indent))?;
    if body.len() < 2 {
        return None;
    }

    let header = format!("{}: >{}", entry.key, chomping);
    let check: Vec<String> = std::iter::once(header.clone())
        .chain(body.iter().map(|line| indent_line(line, BLOCK_INDENT)))
        .collect();
    if read_string(entry.key, &check.iter().map(String::as_str).collect::<Vec<_>>(), 0)?
        != value
    {
        return None;
    }

    let mut folded = vec![format!("{}{}", entry.prefix, header)];
    folded.extend(body.iter().map(|line| indent_line(line, content_indent)));
    Some(folded)
}

/// Parses the string value of `key` from lines whose key sits at `key_column`.
fn read_string(key: &str, lines: &[&str], key_column: usize) -> Option<String> {
    let fragment: Vec<&str> = lines
        .iter()
        .map(|line| line.get(key_column..).unwrap_or_default())
        .collect();
    let mapping: Mapping = serde_yaml::from_str(&fragment.join("\n")).ok()?;
    match mapping.get(key)? {
        Value::String(value) => Some(value.clone()),
        _ => None,
    }
}

/// Splits content into the lines of a folded block scalar.
///
/// A line break after text becomes an extra empty line, since a single
/// break inside a folded scalar reads back as a space. Returns `None` for
/// content a folded scalar cannot carry unchanged, such as lines that
/// start with whitespace.
fn fold_content(content: &str, width: usize) -> Option<Vec<String>> {
    let source_lines: Vec<&str> = content.split('\n').collect();
    let mut lines = Vec::new();

    for (index, source_line) in source_lines.iter().enumerate() {
        if source_line.starts_with([' ', '\t']) {
            return None;
        }
        if index > 0 && !source_lines[index - 1].is_empty() {
            lines.push(String::new());
        }
        lines.extend(wrap_line(source_line, width));
    }

    Some(lines)
}

/// Breaks one line at single spaces so each piece fits `width` when it can.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }

    let chars: Vec<char> = line.chars().collect();
    let break_points: Vec<usize> = (1..chars.len().saturating_sub(1))
        .filter(|&i| chars[i] == ' ' && chars[i - 1] != ' ' && chars[i + 1] != ' ')
        .collect();

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut candidates = break_points.iter().copied().peekable();
    while chars.len() - start > width {
        let mut chosen = None;
        while let Some(&point) = candidates.peek() {
            if point - start > width && chosen.is_some() {
                break;
            }
            chosen = Some(point);
            candidates.next();
            if point - start > width {
                break;
            }
        }
        let Some(point) = chosen else {
            break;
        };
        pieces.push(chars[start..point].iter().collect());
        start = point + 1;
    }
    pieces.push(chars[start..].iter().collect());
    pieces
}

fn indent_line(line: &str, indent: usize) -> String {
    if line.is_empty() {
        String::new()
    } else {
        format!("{}{}", " ".repeat(indent), line)
    }
}
