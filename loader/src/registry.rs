//! The persisted scene registry.
//!
//! [`SceneRegistry`] is the configuration record behind the scene loader: the
//! folder scenes are discovered in, the scenes found there, and the auto-load
//! settings consulted when the editor enters run mode.
//!
//! # Target tracking
//!
//! The auto-load target is addressed by position in [`entries`](SceneRegistry::entries),
//! which is rebuilt from scratch by every [`refresh`](SceneRegistry::refresh).
//! To keep the selection pointing at the same scene when files are added,
//! removed or enumerated in a different order, the registry also remembers the
//! path of the selected scene and re-resolves the index from it after each
//! refresh. If that scene is gone the index is kept as is; an index past the end
//! of the list simply means "no target".
//!
//! # Example
//!
//! ```rust,ignore
//! let project = ProjectConfig::new("/work/game");
//! let mut registry = SceneRegistry::new(project.content_root());
//!
//! registry.set_folder("Assets/Scenes");
//! registry.refresh(&project, &DirectoryScanner);
//!
//! if registry.is_empty() {
//!     println!("No scene in path.");
//! } else {
//!     registry.select_target(0);
//!     registry.set_auto_load(true);
//! }
//! ```

use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    files::SceneFiles,
    project::{CONTENT_FOLDER, ProjectConfig},
    scene::{LoadMode, SceneEntry},
};

/// Scene list and auto-load configuration for one project.
///
/// None of the operations fail: an empty registry or an out-of-range target
/// degrade to "nothing to load".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneRegistry {
    /// Project-relative folder scanned for scenes. Left empty when a snapshot
    /// omits it, so the owning store can apply the project's content root.
    #[serde(default)]
    folder_path: String,
    /// Scenes from the last refresh, in enumeration order.
    entries: Vec<SceneEntry>,
    load_mode: LoadMode,
    auto_load_enabled: bool,
    target_index: usize,
    /// Path of the scene selected through [`select_target`](Self::select_target).
    target_path: Option<String>,
}

impl SceneRegistry {
    /// Creates an empty registry scanning `folder_path`.
    pub fn new(folder_path: impl Into<String>) -> Self {
        Self {
            folder_path: folder_path.into(),
            entries: Vec::new(),
            load_mode: LoadMode::Single,
            auto_load_enabled: false,
            target_index: 0,
            target_path: None,
        }
    }

    /// Rescans [`folder_path`](Self::folder_path) and replaces the entry list.
    ///
    /// Returns the number of scenes found. A missing folder, or one without any
    /// scene file, leaves the registry empty.
    pub fn refresh(&mut self, project: &ProjectConfig, files: &dyn SceneFiles) -> usize {
        let directory = project.resolve(&self.folder_path);
        let found = files.list_files(&directory, &project.scene_extension);

        self.entries.clear();
        for file in found {
            let path = match project.relative_path(&file) {
                Some(relative) => relative,
                None => {
                    warn!("Scene {} is outside the project", file.display());
                    file.to_string_lossy().replace('\\', "/")
                }
            };
            self.entries.push(SceneEntry::from_path(path));
        }
        self.resolve_target();

        debug!(
            "Found {} scene(s) in {}",
            self.entries.len(),
            self.folder_path
        );
        self.entries.len()
    }

    /// Path of the scene to load on entering run mode, or an empty string if
    /// there is none.
    pub fn auto_load_target_path(&self) -> String {
        self.target()
            .map(|entry| entry.path.clone())
            .unwrap_or_default()
    }

    /// The currently targeted entry, if the target index is in range.
    pub fn target(&self) -> Option<&SceneEntry> {
        self.entries.get(self.target_index)
    }

    /// Selects the auto-load target by position.
    ///
    /// Returns `false` and leaves the selection untouched if `index` is out of
    /// range.
    pub fn select_target(&mut self, index: usize) -> bool {
        let Some(entry) = self.entries.get(index) else {
            return false;
        };
        self.target_path = Some(entry.path.clone());
        self.target_index = index;
        true
    }

    #[inline]
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    #[inline]
    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    #[inline]
    pub fn entry(&self, index: usize) -> Option<&SceneEntry> {
        self.entries.get(index)
    }

    /// `true` when the last refresh found no scenes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Display names in entry order, as offered when picking a target.
    pub fn scene_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[inline]
    pub fn folder_path(&self) -> &str {
        &self.folder_path
    }

    /// Changes the scanned folder. Takes effect on the next refresh.
    pub fn set_folder(&mut self, folder_path: impl Into<String>) {
        self.folder_path = folder_path.into();
    }

    /// Sets the scanned folder from a filesystem path picked by the user.
    ///
    /// The path must lie inside the project's content folder; anything else is
    /// ignored and `false` is returned.
    pub fn choose_folder(&mut self, chosen: &Path, project: &ProjectConfig) -> bool {
        match project.relative_path(chosen) {
            Some(relative) if project.is_content_path(&relative) => {
                self.folder_path = relative;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn load_mode(&self) -> LoadMode {
        self.load_mode
    }

    pub fn set_load_mode(&mut self, mode: LoadMode) {
        self.load_mode = mode;
    }

    #[inline]
    pub fn auto_load_enabled(&self) -> bool {
        self.auto_load_enabled
    }

    pub fn set_auto_load(&mut self, enabled: bool) {
        self.auto_load_enabled = enabled;
    }

    fn resolve_target(&mut self) {
        let Some(path) = &self.target_path else {
            return;
        };
        match self.entries.iter().position(|e| &e.path == path) {
            Some(index) if index != self.target_index => {
                debug!("Target {} moved from {} to {}", path, self.target_index, index);
                self.target_index = index;
            }
            Some(_) => {}
            None => debug!("Target {} no longer present", path),
        }
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new(format!("{}/", CONTENT_FOLDER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        files::DirectoryScanner,
        testing::{FakeFiles, touch},
    };

    fn project() -> ProjectConfig {
        ProjectConfig::new("/work/game")
    }

    fn registry_with(files: &FakeFiles, folder: &str) -> SceneRegistry {
        let mut registry = SceneRegistry::default();
        registry.set_folder(folder);
        registry.refresh(&project(), files);
        registry
    }

    // ==================== Defaults ====================

    #[test]
    fn default_registry_targets_content_root() {
        let registry = SceneRegistry::default();
        assert_eq!(registry.folder_path(), "Assets/");
        assert!(registry.is_empty());
        assert_eq!(registry.load_mode(), LoadMode::Single);
        assert!(!registry.auto_load_enabled());
        assert_eq!(registry.target_index(), 0);
    }

    // ==================== Refresh ====================

    #[test]
    fn refresh_creates_one_entry_per_scene() {
        let files = FakeFiles::default().with(
            "/work/game/Assets/Scenes",
            &["A.scene", "B.scene", "readme.txt"],
        );
        let registry = registry_with(&files, "Assets/Scenes");

        assert_eq!(
            registry.entries(),
            &[
                SceneEntry::new("A.scene", "Assets/Scenes/A.scene"),
                SceneEntry::new("B.scene", "Assets/Scenes/B.scene"),
            ]
        );
    }

    #[test]
    fn refresh_replaces_previous_entries() {
        let files = FakeFiles::default()
            .with("/work/game/Assets/One", &["A.scene"])
            .with("/work/game/Assets/Two", &["B.scene"]);
        let mut registry = registry_with(&files, "Assets/One");

        registry.set_folder("Assets/Two");
        registry.refresh(&project(), &files);

        assert_eq!(registry.scene_names(), vec!["B.scene"]);
    }

    #[test]
    fn refresh_of_missing_folder_is_empty() {
        let files = FakeFiles::default();
        let registry = registry_with(&files, "Assets/Nowhere");
        assert!(registry.is_empty());
        assert_eq!(registry.auto_load_target_path(), "");
    }

    #[test]
    fn refresh_twice_is_stable() {
        let files = FakeFiles::default().with("/work/game/Assets", &["A.scene", "B.scene"]);
        let mut registry = registry_with(&files, "Assets/");
        let first = registry.entries().to_vec();

        registry.refresh(&project(), &files);

        assert_eq!(registry.entries(), first.as_slice());
    }

    #[test]
    fn refresh_against_real_directory() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Assets/Levels/Intro.scene");
        touch(dir.path(), "Assets/Levels/Boss.scene");
        touch(dir.path(), "Assets/Levels/Boss.scene.meta");
        let project = ProjectConfig::new(dir.path());

        let mut registry = SceneRegistry::new(project.content_root());
        registry.set_folder("Assets/Levels");
        let found = registry.refresh(&project, &DirectoryScanner);

        let mut paths: Vec<_> = registry.entries().iter().map(|e| e.path.as_str()).collect();
        paths.sort();
        assert_eq!(found, 2);
        assert_eq!(paths, vec!["Assets/Levels/Boss.scene", "Assets/Levels/Intro.scene"]);
        for entry in registry.entries() {
            assert!(project.resolve(&entry.path).is_file());
        }
    }

    // ==================== Target Path ====================

    #[test]
    fn empty_registry_has_no_target_regardless_of_settings() {
        let mut registry = SceneRegistry::default();
        registry.set_auto_load(true);
        assert_eq!(registry.auto_load_target_path(), "");
        assert!(registry.target().is_none());
    }

    #[test]
    fn target_path_follows_index() {
        let files = FakeFiles::default().with("/work/game/Assets", &["A.scene", "B.scene"]);
        let mut registry = registry_with(&files, "Assets/");

        for index in 0..registry.len() {
            assert!(registry.select_target(index));
            assert_eq!(registry.auto_load_target_path(), registry.entries()[index].path);
        }
    }

    #[test]
    fn select_target_out_of_range_is_rejected() {
        let files = FakeFiles::default().with("/work/game/Assets", &["A.scene"]);
        let mut registry = registry_with(&files, "Assets/");

        assert!(!registry.select_target(3));
        assert_eq!(registry.target_index(), 0);
    }

    #[test]
    fn stale_index_degrades_to_empty_path() {
        let files = FakeFiles::default()
            .with("/work/game/Assets/Big", &["A.scene", "B.scene", "C.scene"])
            .with("/work/game/Assets/Small", &["D.scene"]);
        let mut registry = registry_with(&files, "Assets/Big");
        registry.select_target(2);

        registry.set_folder("Assets/Small");
        registry.refresh(&project(), &files);

        assert_eq!(registry.target_index(), 2);
        assert_eq!(registry.auto_load_target_path(), "");
    }

    #[test]
    fn target_follows_scene_after_reorder() {
        let before = FakeFiles::default().with("/work/game/Assets", &["A.scene", "B.scene"]);
        let mut registry = registry_with(&before, "Assets/");
        registry.select_target(1);

        let after =
            FakeFiles::default().with("/work/game/Assets", &["0.scene", "B.scene", "A.scene"]);
        registry.refresh(&project(), &after);
        assert_eq!(registry.auto_load_target_path(), "Assets/B.scene");

        let reordered = FakeFiles::default().with("/work/game/Assets", &["B.scene", "A.scene"]);
        registry.refresh(&project(), &reordered);
        assert_eq!(registry.target_index(), 0);
        assert_eq!(registry.auto_load_target_path(), "Assets/B.scene");
    }

    // ==================== Folder Selection ====================

    #[test]
    fn choose_folder_accepts_content_paths() {
        let mut registry = SceneRegistry::default();
        assert!(registry.choose_folder(Path::new("/work/game/Assets/Scenes"), &project()));
        assert_eq!(registry.folder_path(), "Assets/Scenes");
    }

    #[test]
    fn choose_folder_ignores_paths_outside_content() {
        let mut registry = SceneRegistry::default();
        assert!(!registry.choose_folder(Path::new("/tmp/Scenes"), &project()));
        assert!(!registry.choose_folder(Path::new("/work/game/Library"), &project()));
        assert_eq!(registry.folder_path(), "Assets/");
    }

    // ==================== Serialization ====================

    #[test]
    fn snapshot_with_missing_fields_leaves_folder_unset() {
        let registry: SceneRegistry =
            serde_json::from_str(r#"{ "auto_load_enabled": true }"#).unwrap();
        assert!(registry.auto_load_enabled());
        assert_eq!(registry.folder_path(), "");
        assert_eq!(registry.load_mode(), LoadMode::Single);
    }
}
