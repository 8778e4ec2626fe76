//! Fire-and-forget seam to the decorative feedback collaborator.

use std::time::Duration;

use shared::domain::FeedbackCue;

/// Stagger between the drop that completes a step and the follow-up
/// success cue.
pub const SUCCESS_CUE_DELAY: Duration = Duration::from_millis(500);

/// Receiver side of decorative feedback. Implementations own playback and
/// timing, must not block the caller, and swallow their own failures; a
/// failed cue must never interrupt a state transition.
pub trait CueSink {
    fn cue(&self, cue: FeedbackCue);

    fn cue_after(&self, cue: FeedbackCue, delay: Duration);
}

/// Sink that drops every cue. Used by headless runs and tests that do not
/// assert on feedback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCueSink;

impl CueSink for NullCueSink {
    fn cue(&self, _cue: FeedbackCue) {}

    fn cue_after(&self, _cue: FeedbackCue, _delay: Duration) {}
}
