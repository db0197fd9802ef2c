//! Observable transition state.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a [`Transition`](crate::transition::Transition).
///
/// `running` and `paused` flags are derivable from this: a paused transition
/// has been started and not yet ended, but is not advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionState {
    /// Never run, or the last run ended.
    Idle,
    /// Waiting out the start delay.
    Scheduled,
    /// Advancing once per frame.
    Running,
    /// Started but suspended; elapsed time is kept for resumption.
    Paused,
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::Idle
    }
}

impl TransitionState {
    /// Whether a run is in progress (advancing or paused).
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }

    /// Whether the run is suspended.
    pub fn is_paused(self) -> bool {
        self == Self::Paused
    }
}
