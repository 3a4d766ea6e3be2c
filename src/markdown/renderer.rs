//! Markdown renderer for markup pages.

use std::fmt;

use super::escape::{escape_text, flatten_table_cell};
use super::writer::MarkdownWriter;
use crate::markup::{MarkupElement, MarkupPage};

/// Resolves a cross reference id to a link target.
///
/// Returning an empty string means the reference has no target and is
/// rendered as plain text.
pub type DocIdResolver = Box<dyn Fn(&str) -> String>;

/// Options controlling Markdown rendering.
#[derive(Default)]
pub struct RenderOptions {
    doc_id_resolver: Option<DocIdResolver>,
}

impl RenderOptions {
    /// Creates options without a doc id resolver.
    ///
    /// Cross references render as unlinked text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that resolve cross references through `resolver`.
    pub fn with_doc_id_resolver(resolver: impl Fn(&str) -> String + 'static) -> Self {
        Self {
            doc_id_resolver: Some(Box::new(resolver)),
        }
    }

    fn resolve(&self, doc_id: &str) -> Option<String> {
        let resolver = self.doc_id_resolver.as_ref()?;
        let target = resolver(doc_id);
        (!target.is_empty()).then_some(target)
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("doc_id_resolver", &self.doc_id_resolver.is_some())
            .finish()
    }
}

/// Text run after adjacent same-style text elements have been merged.
#[derive(Debug, PartialEq)]
enum Run<'a> {
    Text { content: String, bold: bool },
    Element(&'a MarkupElement),
}

/// Renders markup to Markdown text.
///
/// Rendering happens in two steps. Text elements are first merged into
/// runs, so adjacent bold elements produce one emphasis span and empty
/// elements vanish. Each run is then split into lines and escaped. The
/// renderer never fails: every markup input has a defined output.
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Renders a sequence of pages into a single Markdown string.
    ///
    /// Page titles are metadata and are not emitted. Consecutive pages are
    /// separated by one blank line.
    ///
    /// # Arguments
    ///
    /// * `pages`: Pages to render, in order
    /// * `options`: Rendering options such as the doc id resolver
    ///
    /// # Returns
    ///
    /// Markdown text ending in a single newline, or an empty string when
    /// there was nothing to render
    pub fn render_elements(pages: &[MarkupPage], options: &RenderOptions) -> String {
        let mut writer = MarkdownWriter::new();
        for page in pages {
            writer.ensure_skipped_line();
            Self::write_elements(&mut writer, &page.elements, options);
        }
        writer.finish()
    }

    /// Renders a bare element list, as found in a single doc comment.
    pub fn render_markup(elements: &[MarkupElement], options: &RenderOptions) -> String {
        let mut writer = MarkdownWriter::new();
        Self::write_elements(&mut writer, elements, options);
        writer.finish()
    }

    fn write_elements(
        writer: &mut MarkdownWriter,
        elements: &[MarkupElement],
        options: &RenderOptions,
    ) {
        for run in normalize_runs(elements) {
            match run {
                Run::Text {
                    content,
                    bold: false,
                } => writer.write(&escape_text(&content)),
                Run::Text {
                    content,
                    bold: true,
                } => write_bold(writer, &content),
                Run::Element(element) => Self::write_element(writer, element, options),
            }
        }
    }

    fn write_element(writer: &mut MarkdownWriter, element: &MarkupElement, options: &RenderOptions) {
        match element {
            // Merged into runs by normalize_runs
            MarkupElement::Text { .. } => {}
            MarkupElement::Heading1 { text } => {
                writer.ensure_skipped_line();
                writer.write("# ");
                writer.write(&escape_text(&text.replace('\n', " ")));
                writer.write("\n\n");
            }
            MarkupElement::WebLink { text, url } => {
                writer.write(&format!("[{}]({})", escape_text(text), url));
            }
            MarkupElement::ApiLink { text, doc_id } => match options.resolve(doc_id) {
                Some(target) => writer.write(&format!("[{}]({})", escape_text(text), target)),
                None => writer.write(&escape_text(text)),
            },
            MarkupElement::Code { code } => writer.write(&code_span(code)),
            MarkupElement::Paragraph => writer.ensure_skipped_line(),
            MarkupElement::Table { header, rows } => {
                Self::write_table(writer, header, rows, options);
            }
        }
    }

    /// Writes a GFM table.
    ///
    /// The column count is the widest of the header and all rows; missing
    /// cells render empty.
    fn write_table(
        writer: &mut MarkdownWriter,
        header: &[Vec<MarkupElement>],
        rows: &[Vec<Vec<MarkupElement>>],
        options: &RenderOptions,
    ) {
        let columns = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);
        if columns == 0 {
            return;
        }

        writer.ensure_skipped_line();
        Self::write_table_row(writer, header, columns, options);
        writer.write("|");
        for _ in 0..columns {
            writer.write(" --- |");
        }
        writer.write("\n");
        for row in rows {
            Self::write_table_row(writer, row, columns, options);
        }
        writer.ensure_skipped_line();
    }

    fn write_table_row(
        writer: &mut MarkdownWriter,
        cells: &[Vec<MarkupElement>],
        columns: usize,
        options: &RenderOptions,
    ) {
        writer.write("|");
        for index in 0..columns {
            let cell = cells
                .get(index)
                .map(|cell| flatten_table_cell(&Self::render_markup(cell, options)))
                .unwrap_or_default();
            writer.write(" ");
            writer.write(&cell);
            writer.write(" |");
        }
        writer.write("\n");
    }
}

/// Merges adjacent text elements that share a style.
///
/// Empty text elements are dropped first, so two bold elements separated
/// only by an empty plain element still merge into one run.
fn normalize_runs(elements: &[MarkupElement]) -> Vec<Run<'_>> {
    let mut runs: Vec<Run<'_>> = Vec::with_capacity(elements.len());

    for element in elements {
        match element {
            MarkupElement::Text { content, bold } => {
                if content.is_empty() {
                    continue;
                }
                if let Some(Run::Text {
                    content: previous,
                    bold: previous_bold,
                }) = runs.last_mut()
                    && *previous_bold == *bold
                {
                    previous.push_str(content);
                    continue;
                }
                runs.push(Run::Text {
                    content: content.clone(),
                    bold: *bold,
                });
            }
            other => runs.push(Run::Element(other)),
        }
    }

    runs
}

/// Writes a bold run line by line.
///
/// Emphasis markers cannot wrap whitespace, so leading and trailing
/// whitespace of every line stays outside the markers and whitespace-only
/// lines are written without any.
fn write_bold(writer: &mut MarkdownWriter, content: &str) {
    for (index, line) in content.split('\n').enumerate() {
        if index > 0 {
            writer.write("\n");
        }

        let (leading, middle, trailing) = split_surrounding_whitespace(line);
        writer.write(leading);
        if !middle.is_empty() {
            writer.write("**");
            writer.write(&escape_text(middle));
            writer.write("**");
        }
        writer.write(trailing);
    }
}

/// Splits a line into leading whitespace, content, and trailing whitespace.
fn split_surrounding_whitespace(line: &str) -> (&str, &str, &str) {
    let rest = line.trim_start();
    let leading = &line[..line.len() - rest.len()];
    let middle = rest.trim_end();
    let trailing = &rest[middle.len()..];
    (leading, middle, trailing)
}

/// Formats an inline code span.
///
/// Code containing backticks is fenced with one more backtick than its
/// longest backtick run and padded with spaces.
fn code_span(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }

    let longest_run = code
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    if longest_run == 0 {
        return format!("`{}`", code);
    }

    let fence = "`".repeat(longest_run + 1);
    format!("{fence} {code} {fence}")
}
