//! Session position and the view handed to the presentation layer.

use shared::domain::StepOrdinal;

/// Mutable session position. One per running simulation; discarded on
/// teardown, never persisted.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub step: StepOrdinal,
    /// Terminal "finished" screen is showing. Only set by advancing past
    /// the last step.
    pub completed: bool,
    pub fullscreen: bool,
    /// Step-complete decorative animation currently showing. Cleared by
    /// any navigation.
    pub celebrating: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            step: StepOrdinal::FIRST,
            completed: false,
            fullscreen: false,
            celebrating: false,
        }
    }
}

impl SessionState {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            step: self.step,
            completed: self.completed,
            fullscreen: self.fullscreen,
            celebrating: self.celebrating,
        }
    }
}

/// Immutable view returned by every state mutator. The presentation layer
/// redraws from the latest snapshot; it holds no state of consequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub step: StepOrdinal,
    pub completed: bool,
    pub fullscreen: bool,
    pub celebrating: bool,
}
