//! Persistence of the scene registry.
//!
//! The registry is a per-project singleton that outlives editor sessions. Rather
//! than hiding it behind global state, [`RegistryStore`] owns the one in-memory
//! instance and the [`SettingsStore`] backend it is persisted to. The process
//! creates a single `RegistryStore` and passes it by reference to the code that
//! needs the registry.
//!
//! # Lifecycle
//!
//! ```text
//! get_or_create() ──► cached? ──yes──────────────────────────► &mut SceneRegistry
//!                        │
//!                        no
//!                        ▼
//!                  retrieve(key) ──snapshot──► deserialize ──► cache
//!                        │                         │
//!                      none                    malformed
//!                        ▼                         ▼
//!                  default registry ──persist──► cache
//! ```

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, error, info, warn};

use crate::{error::StoreError, project::ProjectConfig, registry::SceneRegistry};

/// Backend able to keep named text snapshots across sessions.
pub trait SettingsStore {
    /// Returns the snapshot stored under `key`, or `None` if there is none.
    fn retrieve(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `contents` under `key`, creating whatever storage location is
    /// missing.
    fn persist(&mut self, key: &str, contents: &str) -> Result<(), StoreError>;
}

/// Stores each key as a `.json` file below a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the project's content folder, so the registry lands in
    /// `Assets/Resources/SceneLoader/SceneLoaderData.json`.
    pub fn for_project(project: &ProjectConfig) -> Self {
        Self::new(project.content_dir())
    }

    /// File backing `key`.
    pub fn file_for(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in key.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.set_extension("json");
        path
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SettingsStore for FileStore {
    fn retrieve(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.file_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn persist(&mut self, key: &str, contents: &str) -> Result<(), StoreError> {
        let file = self.file_for(key);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file, contents)?;
        Ok(())
    }
}

/// Keeps snapshots in process memory. Useful for headless hosts.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    snapshots: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful [`persist`](SettingsStore::persist) calls.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn snapshot(&self, key: &str) -> Option<&str> {
        self.snapshots.get(key).map(String::as_str)
    }
}

impl SettingsStore for MemoryStore {
    fn retrieve(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.snapshots.get(key).cloned())
    }

    fn persist(&mut self, key: &str, contents: &str) -> Result<(), StoreError> {
        self.snapshots.insert(key.to_string(), contents.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Owner of the project's single [`SceneRegistry`].
pub struct RegistryStore<S: SettingsStore> {
    backend: S,
    key: String,
    content_root: String,
    registry: Option<SceneRegistry>,
}

impl<S: SettingsStore> RegistryStore<S> {
    pub fn new(backend: S, project: &ProjectConfig) -> Self {
        Self {
            backend,
            key: project.settings_key.clone(),
            content_root: project.content_root(),
            registry: None,
        }
    }

    /// Returns the registry, loading it on first use.
    ///
    /// If nothing is persisted yet, or the snapshot cannot be read, a default
    /// registry is created and persisted. Later calls return the same
    /// instance without touching the backend.
    pub fn get_or_create(&mut self) -> &mut SceneRegistry {
        let registry = match self.registry.take() {
            Some(registry) => registry,
            None => self.load_or_create(),
        };
        self.registry.insert(registry)
    }

    /// The registry if it has already been loaded.
    pub fn get(&self) -> Option<&SceneRegistry> {
        self.registry.as_ref()
    }

    /// Writes the current registry back to the backend.
    ///
    /// Does nothing if the registry was never loaded.
    pub fn save(&mut self) -> Result<(), StoreError> {
        match &self.registry {
            Some(registry) => Self::write(&mut self.backend, &self.key, registry),
            None => Ok(()),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn load_or_create(&mut self) -> SceneRegistry {
        match self.backend.retrieve(&self.key) {
            Ok(Some(snapshot)) => match serde_json::from_str::<SceneRegistry>(&snapshot) {
                Ok(mut registry) => {
                    debug!("Loaded scene loader data from {}", self.key);
                    if registry.folder_path().is_empty() {
                        registry.set_folder(self.content_root.clone());
                    }
                    return registry;
                }
                Err(err) => warn!("Discarding unreadable scene loader data: {}", err),
            },
            Ok(None) => {}
            Err(err) => warn!("Cannot read scene loader data: {}", err),
        }

        info!("Creating scene loader data at {}", self.key);
        let registry = SceneRegistry::new(self.content_root.clone());
        if let Err(err) = Self::write(&mut self.backend, &self.key, &registry) {
            error!("Failed to persist scene loader data: {}", err);
        }
        registry
    }

    fn write(backend: &mut S, key: &str, registry: &SceneRegistry) -> Result<(), StoreError> {
        let snapshot = serde_json::to_string_pretty(registry)?;
        backend.persist(key, &snapshot)
    }
}
