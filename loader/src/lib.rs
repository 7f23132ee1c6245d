//! Editor-side scene registry with auto-load on entering run mode.
//!
//! The crate is organised around two pieces:
//!
//! - [`SceneRegistry`]: the persisted configuration. It holds the folder scenes
//!   are discovered in, the scenes found there, and which one to load, and how,
//!   when the editor enters run mode. [`RegistryStore`] owns the single instance
//!   and persists it through a [`SettingsStore`].
//! - [`AutoLoadController`]: subscribes to the host's run-mode transitions
//!   through a [`Broker`] and issues the load on [`SceneHost`].
//!
//! Filesystem enumeration ([`SceneFiles`]), scene opening and loading
//! ([`SceneHost`]) and snapshot storage ([`SettingsStore`]) are collaborator
//! traits; [`DirectoryScanner`], [`FileStore`] and [`MemoryStore`] are the
//! provided implementations.

pub mod console;
pub mod controller;
pub mod error;
pub mod files;
pub mod host;
pub mod project;
pub mod registry;
pub mod scene;
pub mod store;
pub mod transition;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{AutoLoadController, LoadRequest};
pub use error::{HostError, StoreError, SubscribeError};
pub use files::{DirectoryScanner, SceneFiles};
pub use host::SceneHost;
pub use project::ProjectConfig;
pub use registry::SceneRegistry;
pub use scene::{LoadMode, SceneEntry};
pub use store::{FileStore, MemoryStore, RegistryStore, SettingsStore};
pub use transition::{Broker, RunModeTransition, Subscription};
