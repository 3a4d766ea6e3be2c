//! Documentation tree walker producing UniversalReference files.

use log::{debug, error, info};
use std::path::{Path, PathBuf};

use super::file::{
    YAML_MIME_HEADER, YamlFile, YamlItem, YamlReference, YamlTypeId, normalize_line_endings,
};
use super::fold::{MAX_LINE_WIDTH, fold_long_scalars};
use super::schema::{UniversalReferenceSchema, YamlSchema, validate_no_undefined_members};
use crate::error::GenerateError;
use crate::markdown::{MarkdownRenderer, RenderOptions};
use crate::markup::MarkupBuilder;
use crate::model::{DocElement, DocItemId, DocItemSet};
use crate::naming::{get_output_file_path, get_uid};
use crate::output::OutputSink;

/// Language tag written into every item by default.
pub const DEFAULT_LANG: &str = "typeScript";

/// Result of visiting one documentation item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    /// The item kind has no YAML type; the item and its subtree were left out.
    Skipped,
    /// The item was added to its ancestor's file.
    Embedded { uid: String },
    /// The item got a file of its own, already written.
    FileStarted { uid: String, name: String },
}

/// File that could not be generated.
#[derive(Debug)]
pub struct FileFailure {
    /// Name of the top level package the file belongs to.
    pub package: String,
    /// Error naming the uid and path of the file.
    pub error: GenerateError,
}

/// Summary of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written, in writing order.
    pub files_written: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// State shared by every step of one walk.
struct Walk<'w> {
    output_folder: PathBuf,
    sink: &'w mut dyn OutputSink,
    /// Top level package being visited.
    package: String,
    files_written: Vec<PathBuf>,
    failures: Vec<FileFailure>,
}

impl Walk<'_> {
    fn record_failure(&mut self, error: GenerateError) {
        error!(package = self.package.as_str(), error:% = error; "File generation failed");
        self.failures.push(FileFailure {
            package: self.package.clone(),
            error,
        });
    }
}

/// Generates UniversalReference YAML files from a documentation tree.
///
/// Packages, classes and interfaces each own a file. Every other mapped
/// item is embedded into the file of its nearest file-owning ancestor and
/// listed in that ancestor's `children`. A file-owning child is recorded in
/// its parent's file as a reference instead.
///
/// # Examples
///
/// ```
/// use refyaml::{ApiItem, DocItemKind, DocItemSet, MemoryOutput, YamlGenerator};
/// use std::path::Path;
///
/// let mut set = DocItemSet::new();
/// let package = set.add_package("widgets", ApiItem::with_summary("Widgets."));
/// let class = set.add_child(package, "Widget", DocItemKind::Class, ApiItem::default());
/// set.add_child(class, "render", DocItemKind::Method, ApiItem::default());
///
/// let mut output = MemoryOutput::new();
/// let report = YamlGenerator::new(&set).generate_files(Path::new("yaml"), &mut output)?;
///
/// assert!(report.is_success());
/// assert_eq!(output.files().len(), 2);
/// # Ok::<(), refyaml::GenerateError>(())
/// ```
pub struct YamlGenerator<'a> {
    doc_items: &'a DocItemSet,
    schema: Box<dyn YamlSchema>,
    render_options: RenderOptions,
    langs: Vec<String>,
}

impl<'a> YamlGenerator<'a> {
    /// Creates a generator with the built-in schema.
    ///
    /// Cross references in doc content render as plain text until a
    /// resolver is configured through [`with_render_options`](Self::with_render_options).
    pub fn new(doc_items: &'a DocItemSet) -> Self {
        Self {
            doc_items,
            schema: Box::new(UniversalReferenceSchema),
            render_options: RenderOptions::with_doc_id_resolver(|_| String::new()),
            langs: vec![DEFAULT_LANG.to_string()],
        }
    }

    /// Replaces the schema every file is validated against.
    pub fn with_schema(mut self, schema: impl YamlSchema + 'static) -> Self {
        self.schema = Box::new(schema);
        self
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Sets the language tags written into every item.
    pub fn with_langs(mut self, langs: Vec<String>) -> Self {
        self.langs = langs;
        self
    }

    /// Generates files for every top level package.
    ///
    /// The output folder is emptied first. Files are generated
    /// independently: a file that fails validation, serialization or
    /// writing is recorded in the report and left out, its parent gets no
    /// reference to it, and every other file is still generated.
    ///
    /// # Arguments
    ///
    /// * `output_folder`: Folder receiving the generated tree
    /// * `sink`: Destination for filesystem effects
    ///
    /// # Returns
    ///
    /// Report listing written files and failed packages
    ///
    /// # Errors
    ///
    /// Returns error if the output folder cannot be cleared or the walk
    /// reaches an embeddable item without an enclosing file.
    pub fn generate_files(
        &self,
        output_folder: &Path,
        sink: &mut dyn OutputSink,
    ) -> Result<GenerationReport, GenerateError> {
        info!(output_folder:? = output_folder; "Deleting old output");
        sink.clear_folder(output_folder)
            .map_err(|source| GenerateError::Output {
                path: output_folder.to_path_buf(),
                source,
            })?;

        let mut walk = Walk {
            output_folder: output_folder.to_path_buf(),
            sink,
            package: String::new(),
            files_written: Vec::new(),
            failures: Vec::new(),
        };

        for &package in self.doc_items.packages() {
            walk.package = self.doc_items.get(package).name().to_string();
            match self.visit(package, None, &mut walk) {
                Ok(_) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => walk.record_failure(err),
            }
        }

        Ok(GenerationReport {
            files_written: walk.files_written,
            failures: walk.failures,
        })
    }

    /// Visits one item and, for file owners, its whole subtree.
    ///
    /// Non-fatal failures of descendant files are recorded in `walk`; the
    /// returned error only concerns this item's own file.
    fn visit(
        &self,
        id: DocItemId,
        parent_file: Option<&mut YamlFile>,
        walk: &mut Walk<'_>,
    ) -> Result<VisitOutcome, GenerateError> {
        let doc_item = self.doc_items.get(id);
        let Some(yaml_item) = self.generate_yaml_item(id) else {
            debug!(name = doc_item.name(), kind:? = doc_item.kind(); "Skipping unmapped item");
            return Ok(VisitOutcome::Skipped);
        };
        let uid = yaml_item.uid.clone();

        if yaml_item.type_id.is_embedded() {
            let parent_file =
                parent_file.ok_or_else(|| GenerateError::MissingFileContext { uid: uid.clone() })?;
            parent_file.push_embedded(yaml_item);
            return Ok(VisitOutcome::Embedded { uid });
        }

        let mut file = YamlFile::new(yaml_item);
        for &child in doc_item.children() {
            match self.visit(child, Some(&mut file), walk) {
                Ok(VisitOutcome::Skipped) => {}
                Ok(VisitOutcome::Embedded { uid }) => file.push_child_uid(uid),
                Ok(VisitOutcome::FileStarted { uid, name }) => {
                    file.push_reference(YamlReference { uid, name });
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => walk.record_failure(err),
            }
        }

        self.write_yaml_file(&file, id, walk)?;

        Ok(VisitOutcome::FileStarted {
            uid,
            name: doc_item.name().to_string(),
        })
    }

    /// Builds the YAML item for a documentation item.
    ///
    /// # Returns
    ///
    /// `None` when the item kind has no YAML type
    pub fn generate_yaml_item(&self, id: DocItemId) -> Option<YamlItem> {
        let doc_item = self.doc_items.get(id);
        let type_id = YamlTypeId::from_kind(doc_item.kind())?;
        let api_item = doc_item.api_item();

        Some(YamlItem {
            uid: get_uid(self.doc_items, id),
            summary: self.render_doc_content(api_item.summary.as_deref()),
            remarks: self.render_doc_content(api_item.remarks.as_deref()),
            name: doc_item.name().to_string(),
            full_name: doc_item.name().to_string(),
            langs: self.langs.clone(),
            type_id,
            children: None,
        })
    }

    /// Renders doc content to Markdown, or `None` when nothing renders.
    fn render_doc_content(&self, doc_elements: Option<&[DocElement]>) -> Option<String> {
        let markup = MarkupBuilder::render_doc_elements(doc_elements.unwrap_or_default());
        if markup.is_empty() {
            return None;
        }

        let markdown = MarkdownRenderer::render_markup(&markup, &self.render_options);
        let markdown = markdown.trim_end();
        (!markdown.is_empty()).then(|| markdown.to_string())
    }

    /// Validates, serializes and writes one file.
    fn write_yaml_file(
        &self,
        file: &YamlFile,
        id: DocItemId,
        walk: &mut Walk<'_>,
    ) -> Result<(), GenerateError> {
        let path = get_output_file_path(self.doc_items, id, &walk.output_folder);
        let uid = file
            .root()
            .map(|root| root.uid.clone())
            .unwrap_or_default();

        let document = serde_yaml::to_value(file).map_err(|source| GenerateError::Serialize {
            uid: uid.clone(),
            path: path.clone(),
            source,
        })?;
        validate_no_undefined_members(&document).map_err(|err| {
            GenerateError::UndefinedMember {
                uid: uid.clone(),
                path: path.clone(),
                field: err.location,
            }
        })?;
        self.schema
            .validate(&document)
            .map_err(|err| GenerateError::SchemaViolation {
                uid: uid.clone(),
                path: path.clone(),
                message: err.to_string(),
            })?;

        let contents = serialize_yaml_file(file).map_err(|source| GenerateError::Serialize {
            uid,
            path: path.clone(),
            source,
        })?;

        info!(path:? = path; "Writing YAML file");
        walk.sink
            .write_file(&path, &contents)
            .map_err(|source| GenerateError::Output {
                path: path.clone(),
                source,
            })?;
        walk.files_written.push(path);
        Ok(())
    }
}

/// Serializes a file with the MIME header and CR+LF line endings.
///
/// Long string values are folded so lines stay within
/// [`MAX_LINE_WIDTH`] characters, except for single words that are longer.
///
/// # Errors
///
/// Returns error if YAML serialization fails.
pub fn serialize_yaml_file(file: &YamlFile) -> Result<String, serde_yaml::Error> {
    let body = fold_long_scalars(&serde_yaml::to_string(file)?, MAX_LINE_WIDTH);
    Ok(normalize_line_endings(&format!(
        "{}\n{}",
        YAML_MIME_HEADER, body
    )))
}
