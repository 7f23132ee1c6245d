//! Directory enumeration used to discover scene files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;

/// Lists files by extension in a single directory.
pub trait SceneFiles {
    /// Returns every file directly inside `directory` whose extension equals
    /// `extension` (without the dot). Subdirectories are not descended into and
    /// no particular order is promised. An unreadable or missing directory
    /// yields an empty list.
    fn list_files(&self, directory: &Path, extension: &str) -> Vec<PathBuf>;
}

/// [`SceneFiles`] backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryScanner;

impl SceneFiles for DirectoryScanner {
    fn list_files(&self, directory: &Path, extension: &str) -> Vec<PathBuf> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(err) => {
                debug!("Cannot read {}: {}", directory.display(), err);
                return Vec::new();
            }
        };

        entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == extension))
            .collect()
    }
}
