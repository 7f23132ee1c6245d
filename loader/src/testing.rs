//! Shared fixtures for unit tests.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{error::HostError, files::SceneFiles, host::SceneHost, scene::LoadMode};

/// Creates an empty file below `root`, along with any missing parent directories.
pub fn touch(root: &Path, relative: &str) -> PathBuf {
    let file = root.join(relative);
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(&file, b"").unwrap();
    file
}

/// In-memory directory listing keyed by directory.
#[derive(Default)]
pub struct FakeFiles {
    dirs: HashMap<PathBuf, Vec<PathBuf>>,
}

impl FakeFiles {
    pub fn with(mut self, directory: impl Into<PathBuf>, files: &[&str]) -> Self {
        let directory = directory.into();
        let listed = files.iter().map(|f| directory.join(f)).collect();
        self.dirs.insert(directory, listed);
        self
    }
}

impl SceneFiles for FakeFiles {
    fn list_files(&self, directory: &Path, extension: &str) -> Vec<PathBuf> {
        self.dirs
            .get(directory)
            .map(|files| {
                files
                    .iter()
                    .filter(|f| f.extension().is_some_and(|e| e == extension))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Open(String),
    Load(String, LoadMode),
    Save,
}

/// Host that records every call and optionally fails them.
#[derive(Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
    pub fail: bool,
}

impl RecordingHost {
    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            fail: true,
        }
    }

    pub fn loads(&self) -> Vec<(String, LoadMode)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Load(path, mode) => Some((path.clone(), *mode)),
                _ => None,
            })
            .collect()
    }

    fn result(&self) -> Result<(), HostError> {
        if self.fail {
            Err("host refused".into())
        } else {
            Ok(())
        }
    }
}

impl SceneHost for RecordingHost {
    fn open_scene(&mut self, path: &str) -> Result<(), HostError> {
        self.calls.push(HostCall::Open(path.to_string()));
        self.result()
    }

    fn load_scene(&mut self, path: &str, mode: LoadMode) -> Result<(), HostError> {
        self.calls.push(HostCall::Load(path.to_string(), mode));
        self.result()
    }

    fn save_modified_scenes(&mut self) -> Result<(), HostError> {
        self.calls.push(HostCall::Save);
        self.result()
    }
}
