//! UniversalReference YAML generator for API documentation models.

mod config;
mod error;
mod markdown;
mod markup;
mod model;
mod naming;
mod output;
mod yaml;

pub use config::Config;
pub use error::GenerateError;
pub use markdown::{DocIdResolver, MarkdownRenderer, RenderOptions, escape_table_cell, escape_text};
pub use markup::{MarkupBuilder, MarkupElement, MarkupPage, TextOptions};
pub use model::{ApiItem, DocElement, DocItem, DocItemId, DocItemKind, DocItemSet};
pub use naming::{YAML_FILE_EXTENSION, get_output_file_path, get_uid, unscoped_package_name};
pub use output::{DiskOutput, MemoryOutput, OutputSink};
pub use yaml::{
    DEFAULT_LANG, FileFailure, GenerationReport, MAX_LINE_WIDTH, SchemaError,
    UniversalReferenceSchema, VisitOutcome, YAML_MIME_HEADER, YamlFile, YamlGenerator, YamlItem,
    YamlReference, YamlSchema, YamlTypeId, fold_long_scalars, normalize_line_endings,
    serialize_yaml_file, validate_no_undefined_members,
};
