//! Project layout configuration.
//!
//! Scene paths inside the registry are always project-relative and `/`
//! separated, e.g. `Assets/Scenes/Main.scene`. [`ProjectConfig`] owns the
//! mapping between those paths and the real filesystem.

use std::path::{Component, Path, PathBuf};

/// Name of the folder holding all project content.
pub const CONTENT_FOLDER: &str = "Assets";

/// File extension (without the dot) of scene assets.
pub const SCENE_EXTENSION: &str = "scene";

/// Well-known key under which the registry is persisted.
pub const SETTINGS_KEY: &str = "Resources/SceneLoader/SceneLoaderData";

/// Where the project lives and how its content is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Absolute (or process-relative) project root.
    pub root: PathBuf,
    /// Content folder directly under `root`.
    pub content_folder: String,
    /// Extension used to recognise scene files.
    pub scene_extension: String,
    /// Key the registry snapshot is stored under.
    pub settings_key: String,
}

impl ProjectConfig {
    /// Creates a configuration with the default layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            content_folder: CONTENT_FOLDER.to_string(),
            scene_extension: SCENE_EXTENSION.to_string(),
            settings_key: SETTINGS_KEY.to_string(),
        }
    }

    /// Replaces the scene extension. A leading dot and surrounding whitespace
    /// are ignored; an empty value keeps the current extension.
    pub fn with_extension(mut self, extension: &str) -> Self {
        let extension = extension.trim().trim_start_matches('.');
        if !extension.is_empty() {
            self.scene_extension = extension.to_string();
        }
        self
    }

    /// Project-relative path of the content root, e.g. `Assets/`.
    pub fn content_root(&self) -> String {
        format!("{}/", self.content_folder)
    }

    /// Absolute location of the content folder.
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.content_folder)
    }

    /// Maps a project-relative path onto the filesystem.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in relative.split(['/', '\\']).filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path
    }

    /// Converts a filesystem path into a project-relative one.
    ///
    /// Returns `None` if the path is not located under the project root.
    pub fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_string_lossy()),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(segments.join("/"))
    }

    /// Returns `true` if the project-relative `path` is inside the content folder.
    ///
    /// Paths containing `..` segments are never accepted.
    pub fn is_content_path(&self, path: &str) -> bool {
        let segments: Vec<&str> = path
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        if segments.contains(&"..") {
            return false;
        }
        segments.first() == Some(&self.content_folder.as_str())
    }
}
