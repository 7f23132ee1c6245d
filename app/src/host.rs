use std::mem;

use log::info;
use scene_loader::{HostError, LoadMode, ProjectConfig, SceneHost};

/// Stand-in for the editor: keeps track of the open scene and of what is loaded
/// while playing.
pub struct ConsoleHost {
    project: ProjectConfig,
    open: Option<String>,
    modified: bool,
    playing: bool,
    loaded: Vec<String>,
}

impl ConsoleHost {
    pub fn new(project: ProjectConfig) -> Self {
        Self {
            project,
            open: None,
            modified: false,
            playing: false,
            loaded: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Switches between edit and run mode. Entering run mode starts from the
    /// open scene.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        self.loaded = match (&self.open, playing) {
            (Some(open), true) => vec![open.clone()],
            _ => Vec::new(),
        };
    }

    pub fn mark_modified(&mut self) {
        self.modified = self.open.is_some();
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn open(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }

    fn check_exists(&self, path: &str) -> Result<(), HostError> {
        if self.project.resolve(path).is_file() {
            Ok(())
        } else {
            Err(format!("scene {} does not exist", path).into())
        }
    }
}

impl SceneHost for ConsoleHost {
    fn open_scene(&mut self, path: &str) -> Result<(), HostError> {
        if self.playing {
            return Err("cannot open scenes while playing".into());
        }
        self.check_exists(path)?;
        self.open = Some(path.to_string());
        self.modified = false;
        info!("Opened {}", path);
        Ok(())
    }

    fn load_scene(&mut self, path: &str, mode: LoadMode) -> Result<(), HostError> {
        if !self.playing {
            return Err("scenes can only be loaded in run mode".into());
        }
        self.check_exists(path)?;
        match mode {
            LoadMode::Single => {
                let unloaded = mem::take(&mut self.loaded);
                if !unloaded.is_empty() {
                    info!("Unloaded {}", unloaded.join(", "));
                }
                self.loaded.push(path.to_string());
            }
            LoadMode::Additive => self.loaded.push(path.to_string()),
        }
        info!("Loaded {} ({})", path, mode);
        Ok(())
    }

    fn save_modified_scenes(&mut self) -> Result<(), HostError> {
        if let (Some(open), true) = (&self.open, self.modified) {
            info!("Saved {}", open);
            self.modified = false;
        }
        Ok(())
    }
}
