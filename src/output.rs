//! Destinations for generated files.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem effects needed by the generator.
pub trait OutputSink {
    /// Removes everything inside `folder`, creating it if missing.
    fn clear_folder(&mut self, folder: &Path) -> io::Result<()>;

    /// Writes `contents` to `path`, creating parent directories as needed.
    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes files to the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskOutput;

impl OutputSink for DiskOutput {
    fn clear_folder(&mut self, folder: &Path) -> io::Result<()> {
        if !folder.exists() {
            return fs::create_dir_all(folder);
        }

        for entry in fs::read_dir(folder)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(entry.path())?;
            } else {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }
}

/// Keeps generated files in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }
}

impl OutputSink for MemoryOutput {
    fn clear_folder(&mut self, folder: &Path) -> io::Result<()> {
        self.files.retain(|path, _| !path.starts_with(folder));
        Ok(())
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
