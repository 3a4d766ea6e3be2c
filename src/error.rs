//! Error type of the YAML generator.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while generating reference files.
///
/// Every variant that concerns a single file names the uid of the item
/// owning it and the path it was going to be written to.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// An embeddable item was reached without an enclosing file.
    #[error("missing file context for embedded item '{uid}'")]
    MissingFileContext { uid: String },

    #[error("undefined member in '{uid}' ({}): {field}", .path.display())]
    UndefinedMember {
        uid: String,
        path: PathBuf,
        field: String,
    },

    #[error("schema validation failed for '{uid}' ({}): {message}", .path.display())]
    SchemaViolation {
        uid: String,
        path: PathBuf,
        message: String,
    },

    #[error("failed to serialize '{uid}' ({})", .path.display())]
    Serialize {
        uid: String,
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write output: {}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GenerateError {
    /// Whether the error must abort the whole run.
    ///
    /// A missing file context means the walker itself is broken, so no
    /// further output can be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingFileContext { .. })
    }
}
