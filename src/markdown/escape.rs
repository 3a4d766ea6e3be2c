//! Escaping of literal text for Markdown output.

/// Minimum number of consecutive hyphens that must be escaped.
///
/// Three hyphens on their own line form a thematic break or a front matter
/// delimiter, so any run of this length is neutralised wherever it occurs.
const HYPHEN_RUN_THRESHOLD: usize = 3;

/// Escapes literal text so Markdown renders it verbatim.
///
/// Backslashes and asterisks are backslash-escaped, HTML sensitive
/// characters become entities, and each hyphen in a run of three or more
/// becomes `\-`.
///
/// # Arguments
///
/// * `text`: Literal text content
///
/// # Returns
///
/// Text safe to embed in Markdown
pub fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '-' => {
                let mut run = 1;
                while chars.next_if_eq(&'-').is_some() {
                    run += 1;
                }
                let hyphen = if run >= HYPHEN_RUN_THRESHOLD { "\\-" } else { "-" };
                for _ in 0..run {
                    result.push_str(hyphen);
                }
            }
            '\\' => result.push_str("\\\\"),
            '*' => result.push_str("\\*"),
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }

    result
}

/// Escapes text for use inside a GFM table cell.
///
/// Newlines would terminate the row, so they collapse to spaces; pipes
/// would start a new cell, so they are backslash-escaped.
pub fn escape_table_cell(text: &str) -> String {
    flatten_table_cell(&escape_text(text))
}

/// Makes already rendered Markdown fit on a single table row.
///
/// [`escape_text`] never emits `|`, so every pipe here comes from raw
/// content such as code spans or URLs. Line breaks and blank lines
/// collapse to single spaces.
pub(super) fn flatten_table_cell(rendered: &str) -> String {
    rendered
        .trim()
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_text("plain words"), "plain words");
        assert_eq!(escape_text(""), "");
    }

    #[test]
    fn test_escape_asterisks() {
        assert_eq!(escape_text("*one*two*"), "\\*one\\*two\\*");
    }

    #[test]
    fn test_escape_html_characters() {
        // Arrange
        let input = "<script>alert(\"x\") && y</script>";

        // Act
        let escaped = escape_text(input);

        // Assert
        assert_eq!(
            escaped,
            "&lt;script&gt;alert(&quot;x&quot;) &amp;&amp; y&lt;/script&gt;"
        );
        assert!(!escaped.contains('<'), "Should not contain raw '<'");
        assert!(!escaped.contains('>'), "Should not contain raw '>'");
    }

    #[test]
    fn test_escape_existing_entity_is_double_escaped() {
        assert_eq!(escape_text("&quot;"), "&amp;quot;");
    }

    #[test]
    fn test_escape_backslash() {
        assert_eq!(escape_text("{ \\\"A\\\" }"), "{ \\\\&quot;A\\\\&quot; }");
    }

    #[test]
    fn test_escape_hyphen_runs() {
        // Arrange
        let input = "- -- --- ---- ----- ------";

        // Act
        let escaped = escape_text(input);

        // Assert
        assert_eq!(
            escaped,
            "- -- \\-\\-\\- \\-\\-\\-\\- \\-\\-\\-\\-\\- \\-\\-\\-\\-\\-\\-"
        );
    }

    #[test]
    fn test_escape_hyphen_run_inside_word() {
        assert_eq!(escape_text("a---b"), "a\\-\\-\\-b");
        assert_eq!(escape_text("non-bold"), "non-bold");
    }

    #[test]
    fn test_escape_table_cell() {
        assert_eq!(escape_table_cell("a | b\nc"), "a \\| b c");
    }
}
