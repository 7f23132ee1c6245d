//! Auto-loading of the target scene when the editor enters run mode.
//!
//! [`AutoLoadController`] reacts to two run-mode transitions:
//!
//! | Transition | Action |
//! |------------|--------|
//! | `ExitingEditMode` | Ask the host to save modified scenes |
//! | `EnteredRunMode` | Load the registry's target scene, if auto-load is on |
//!
//! Every other transition is ignored. A load is attempted at most once per
//! `EnteredRunMode`; failures reported by the host are logged and not retried.
//!
//! The controller is built from a [`Subscription`], so a process that installs
//! it through [`AutoLoadController::install`] gets exactly one handler. A second
//! install against the same broker fails instead of doubling every load.

use log::{debug, error, info, warn};

use crate::{
    error::SubscribeError,
    host::SceneHost,
    registry::SceneRegistry,
    scene::LoadMode,
    store::{RegistryStore, SettingsStore},
    transition::{Broker, RunModeTransition, Subscription},
};

/// Name the controller subscribes under.
pub const HANDLER_NAME: &str = "scene-loader.auto-load";

/// A scene load issued to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub path: String,
    pub mode: LoadMode,
}

impl LoadRequest {
    /// The load the registry asks for on entering run mode, if any.
    pub fn for_registry(registry: &SceneRegistry) -> Option<Self> {
        if !registry.auto_load_enabled() {
            return None;
        }
        let path = registry.auto_load_target_path();
        if path.is_empty() {
            return None;
        }
        Some(Self {
            path,
            mode: registry.load_mode(),
        })
    }
}

pub struct AutoLoadController {
    subscription: Subscription,
}

impl AutoLoadController {
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Subscribes a new controller to `broker` under [`HANDLER_NAME`].
    pub fn install(broker: &mut Broker) -> Result<Self, SubscribeError> {
        let subscription = broker.subscribe(HANDLER_NAME)?;
        info!("Scene auto-load installed");
        Ok(Self::new(subscription))
    }

    /// Handles every transition published since the last call, in order.
    ///
    /// Returns the number of scene loads issued.
    pub fn pump<S: SettingsStore>(
        &self,
        store: &mut RegistryStore<S>,
        host: &mut dyn SceneHost,
    ) -> usize {
        let mut loads = 0;
        for transition in self.subscription.drain() {
            if self.handle(transition, store, host).is_some() {
                loads += 1;
            }
        }
        loads
    }

    /// Reacts to a single transition.
    ///
    /// Returns the load issued to the host, if any. The request is returned
    /// even when the host reports a failure for it.
    pub fn handle<S: SettingsStore>(
        &self,
        transition: RunModeTransition,
        store: &mut RegistryStore<S>,
        host: &mut dyn SceneHost,
    ) -> Option<LoadRequest> {
        match transition {
            RunModeTransition::ExitingEditMode => {
                if let Err(err) = host.save_modified_scenes() {
                    warn!("Saving modified scenes failed: {}", err);
                }
                None
            }
            RunModeTransition::EnteredRunMode => {
                let registry = store.get_or_create();
                let Some(request) = LoadRequest::for_registry(registry) else {
                    debug!("Nothing to auto-load");
                    return None;
                };
                info!("Auto-loading {} ({})", request.path, request.mode);
                if let Err(err) = host.load_scene(&request.path, request.mode) {
                    error!("Loading {} failed: {}", request.path, err);
                }
                Some(request)
            }
            RunModeTransition::ExitingRunMode | RunModeTransition::EnteredEditMode => None,
        }
    }
}
