use std::fmt;

use serde::{Deserialize, Serialize};

/// How a scene is brought in when it is loaded at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadMode {
    /// Replace every currently loaded scene.
    #[default]
    Single,
    /// Layer the scene on top of the ones already loaded.
    Additive,
}

impl LoadMode {
    /// Parses a user supplied mode name, ignoring case.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "single" => Some(LoadMode::Single),
            "additive" => Some(LoadMode::Additive),
            _ => None,
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadMode::Single => write!(f, "Single"),
            LoadMode::Additive => write!(f, "Additive"),
        }
    }
}

/// One scene asset discovered by a registry refresh.
///
/// `path` is project-relative with `/` separators and is what the host opens or
/// loads. `name` is only a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneEntry {
    pub name: String,
    pub path: String,
}

impl SceneEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Builds an entry from a project-relative path, naming it after the last
    /// path segment.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = match path.rfind('/') {
            Some(slash) => path[slash + 1..].to_string(),
            None => path.clone(),
        };
        Self { name, path }
    }
}
