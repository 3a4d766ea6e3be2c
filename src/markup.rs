//! Renderer agnostic markup for documentation content.
//!
//! Doc comments are converted into a flat sequence of [`MarkupElement`]
//! values before any output format is produced. The Markdown renderer and
//! the YAML generator only ever see this representation.

use crate::model::DocElement;

/// One piece of renderable documentation content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupElement {
    /// Run of literal text, optionally bold.
    Text { content: String, bold: bool },
    /// Top level heading.
    Heading1 { text: String },
    /// Hyperlink to an external URL.
    WebLink { text: String, url: String },
    /// Cross reference to another documented entity.
    ApiLink { text: String, doc_id: String },
    /// Inline code span.
    Code { code: String },
    /// Paragraph break.
    Paragraph,
    /// Table whose cells are themselves markup.
    Table {
        header: Vec<Vec<MarkupElement>>,
        rows: Vec<Vec<Vec<MarkupElement>>>,
    },
}

/// Ordered list of markup elements with a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupPage {
    pub title: String,
    pub elements: Vec<MarkupElement>,
}

/// Options for [`MarkupBuilder::create_text_elements`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextOptions {
    pub bold: bool,
}

impl TextOptions {
    /// Options for a bold run.
    pub fn bold() -> Self {
        Self { bold: true }
    }
}

/// Construction functions for markup elements.
pub struct MarkupBuilder;

impl MarkupBuilder {
    /// Creates an empty page with the given title.
    pub fn create_page(title: impl Into<String>) -> MarkupPage {
        MarkupPage {
            title: title.into(),
            elements: Vec::new(),
        }
    }

    pub fn create_heading1(text: impl Into<String>) -> MarkupElement {
        MarkupElement::Heading1 { text: text.into() }
    }

    /// Creates text elements for a run of literal text.
    ///
    /// Empty text yields no elements at all. Otherwise the text is kept
    /// verbatim, newlines included, so the renderer decides how multi-line
    /// bold runs are emitted.
    ///
    /// # Arguments
    ///
    /// * `text`: Literal text content
    /// * `options`: Style flags for the run
    ///
    /// # Returns
    ///
    /// Zero or one text elements
    pub fn create_text_elements(text: &str, options: TextOptions) -> Vec<MarkupElement> {
        if text.is_empty() {
            return Vec::new();
        }

        vec![MarkupElement::Text {
            content: text.to_string(),
            bold: options.bold,
        }]
    }

    pub fn create_web_link_from_text(
        text: impl Into<String>,
        url: impl Into<String>,
    ) -> MarkupElement {
        MarkupElement::WebLink {
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn create_api_link_from_text(
        text: impl Into<String>,
        doc_id: impl Into<String>,
    ) -> MarkupElement {
        MarkupElement::ApiLink {
            text: text.into(),
            doc_id: doc_id.into(),
        }
    }

    pub fn create_code(code: impl Into<String>) -> MarkupElement {
        MarkupElement::Code { code: code.into() }
    }

    pub fn create_paragraph() -> MarkupElement {
        MarkupElement::Paragraph
    }

    /// Creates a table from header cells and body rows.
    ///
    /// Rows shorter than the header are padded with empty cells when
    /// rendered; longer rows are rendered as given.
    pub fn create_table(
        header: Vec<Vec<MarkupElement>>,
        rows: Vec<Vec<Vec<MarkupElement>>>,
    ) -> MarkupElement {
        MarkupElement::Table { header, rows }
    }

    /// Converts doc comment content into markup.
    ///
    /// Each doc element maps to at most one markup element. Empty text
    /// contributes nothing.
    ///
    /// # Arguments
    ///
    /// * `doc_elements`: Parsed doc comment content
    ///
    /// # Returns
    ///
    /// Markup elements in source order
    pub fn render_doc_elements(doc_elements: &[DocElement]) -> Vec<MarkupElement> {
        let mut result = Vec::new();

        for element in doc_elements {
            match element {
                DocElement::Text { value } => {
                    result.extend(Self::create_text_elements(value, TextOptions::default()));
                }
                DocElement::Paragraph => result.push(Self::create_paragraph()),
                DocElement::Code { value } => result.push(Self::create_code(value.as_str())),
                DocElement::WebLink { value, target_url } => {
                    result.push(Self::create_web_link_from_text(
                        value.as_str(),
                        target_url.as_str(),
                    ));
                }
                DocElement::ApiLink { value, doc_id } => {
                    result.push(Self::create_api_link_from_text(
                        value.as_str(),
                        doc_id.as_str(),
                    ));
                }
            }
        }

        result
    }
}
