//! Scene primitives provided by the editor host.

use crate::{error::HostError, scene::LoadMode};

/// Editor operations on scenes.
///
/// Paths are project-relative, as stored in [`SceneEntry::path`](crate::scene::SceneEntry).
/// None of these calls are retried by the loader; a failure is logged and
/// otherwise left to the host.
pub trait SceneHost {
    /// Opens a scene for editing.
    fn open_scene(&mut self, path: &str) -> Result<(), HostError>;

    /// Loads a scene while the host is in run mode.
    fn load_scene(&mut self, path: &str, mode: LoadMode) -> Result<(), HostError>;

    /// Asks the user whether modified scenes should be saved, saving them if so.
    fn save_modified_scenes(&mut self) -> Result<(), HostError>;
}
