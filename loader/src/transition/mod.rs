pub mod broker;

pub use broker::{Broker, Subscription};

/// Run-mode lifecycle notifications delivered by the editor host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunModeTransition {
    /// The editor is about to leave edit mode.
    ExitingEditMode,
    /// Run mode has been fully entered.
    EnteredRunMode,
    /// The editor is about to leave run mode.
    ExitingRunMode,
    /// Edit mode has been fully entered again.
    EnteredEditMode,
}
