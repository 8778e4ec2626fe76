//! Events flowing between the cue worker, the navigation surface, and the
//! app shell.

use shared::domain::FeedbackCue;

/// Delivered from the cue worker back to the UI thread. The shell echoes
/// each fired cue as a transient visual flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Cue(FeedbackCue),
}

/// Requests from the navigation surface (buttons and progress dots).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Advance,
    Retreat,
    JumpTo(u8),
    Reset,
    Inspect,
    SetFullscreen(bool),
}
