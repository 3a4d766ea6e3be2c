//! UniversalReference YAML generation.
//!
//! The documentation tree is split into one YAML file per package, class
//! and interface. Members are embedded into the file of their nearest
//! file-owning ancestor, and files point at each other through
//! `references`.

mod file;
mod fold;
mod generator;
mod schema;

pub use file::{
    YAML_MIME_HEADER, YamlFile, YamlItem, YamlReference, YamlTypeId, normalize_line_endings,
};
pub use fold::{MAX_LINE_WIDTH, fold_long_scalars};
pub use generator::{
    DEFAULT_LANG, FileFailure, GenerationReport, VisitOutcome, YamlGenerator,
    serialize_yaml_file,
};
pub use schema::{SchemaError, UniversalReferenceSchema, YamlSchema, validate_no_undefined_members};
