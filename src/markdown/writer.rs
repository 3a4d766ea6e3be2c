//! Append-only text buffer with line awareness.

/// String buffer that knows how the text written so far ends.
///
/// Block level elements use [`ensure_skipped_line`](Self::ensure_skipped_line)
/// so that blank lines between blocks never accumulate.
#[derive(Debug, Default)]
pub(super) struct MarkdownWriter {
    buffer: String,
}

impl MarkdownWriter {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Terminates the current line unless the buffer is empty or already
    /// ends with a newline.
    pub(super) fn ensure_new_line(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }

    /// Ensures the next write starts after exactly one blank line.
    ///
    /// A whitespace-only line that trails other text counts as blank.
    pub(super) fn ensure_skipped_line(&mut self) {
        self.drop_trailing_whitespace_line();
        if self.buffer.is_empty() || self.buffer.ends_with("\n\n") {
            return;
        }
        self.ensure_new_line();
        self.buffer.push('\n');
    }

    /// Returns the buffer with exactly one trailing newline.
    ///
    /// An empty buffer stays empty. A whitespace-only last line is removed
    /// when it follows a line with text.
    pub(super) fn finish(mut self) -> String {
        self.drop_trailing_whitespace_line();
        let mut text = self.buffer;
        let trimmed_len = text.trim_end_matches('\n').len();
        text.truncate(trimmed_len);
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }

    /// Removes a last line made only of spaces or tabs, keeping its line
    /// break, when the line before it holds text.
    ///
    /// A whitespace-only line standing on its own is content and stays.
    fn drop_trailing_whitespace_line(&mut self) {
        let Some(break_index) = self.buffer.rfind('\n') else {
            return;
        };
        let last_line = &self.buffer[break_index + 1..];
        if last_line.is_empty() || !last_line.chars().all(|c| c == ' ' || c == '\t') {
            return;
        }
        let before = &self.buffer[..break_index];
        if before.is_empty() || before.ends_with('\n') {
            return;
        }
        self.buffer.truncate(break_index + 1);
    }
}
