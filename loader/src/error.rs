use thiserror::Error;

/// Failure of a [`SettingsStore`](crate::store::SettingsStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings snapshot is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Failure to attach a run-mode transition handler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubscribeError {
    #[error("handler `{0}` is already subscribed to run-mode transitions")]
    AlreadySubscribed(String),
}

/// Error reported by a [`SceneHost`](crate::host::SceneHost) primitive.
pub type HostError = Box<dyn std::error::Error + Send + Sync>;
