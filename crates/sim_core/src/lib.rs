//! Core state machine for the step-by-step fermentation activity.
//!
//! Owns the step catalog, the placement tracker, and the session position,
//! and translates drag gestures and navigation requests into state
//! transitions. Rendering, gesture capture, and cue playback live behind
//! seams: the presentation layer drives [`Simulation`] and redraws from
//! the [`SessionSnapshot`] every mutator returns, and decorative feedback
//! goes through the [`CueSink`] trait without ever blocking a transition.

use shared::{
    domain::{FeedbackCue, ItemId, StepOrdinal, ZoneId, STEP_COUNT},
    error::DomainError,
};

pub mod catalog;
pub mod cues;
pub mod interaction;
pub mod placement;
pub mod progress;

pub use catalog::{
    drop_zone, RequiredItem, ScienceNote, StepCatalog, StepDefinition, DROP_ZONE_ID,
};
pub use cues::{CueSink, NullCueSink, SUCCESS_CUE_DELAY};
pub use interaction::{DragState, DropOutcome};
pub use placement::{inspection_marker, PlacementLog, INSPECTION_MARKER};
pub use progress::{SessionSnapshot, SessionState};

/// The running simulation. All reads and writes happen on one logical
/// thread; mutators return the fresh snapshot for the caller to render.
pub struct Simulation {
    catalog: StepCatalog,
    placements: PlacementLog,
    session: SessionState,
    drag: DragState,
    cues: Box<dyn CueSink>,
}

impl Simulation {
    pub fn new(catalog: StepCatalog, cues: Box<dyn CueSink>) -> Self {
        Self {
            catalog,
            placements: PlacementLog::new(),
            session: SessionState::default(),
            drag: DragState::default(),
            cues,
        }
    }

    /// Simulation over the standard yogurt-making catalog.
    pub fn standard(cues: Box<dyn CueSink>) -> Self {
        Self::new(StepCatalog::standard(), cues)
    }

    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    pub fn session(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn current_step(&self) -> &StepDefinition {
        self.catalog.get(self.session.step)
    }

    /// Item the learner is currently dragging, if any.
    pub fn dragging(&self) -> Option<&ItemId> {
        self.drag.active()
    }

    pub fn is_item_placed(&self, item: &ItemId) -> bool {
        self.placements.is_placed(self.session.step, item)
    }

    /// Items placed for `step`, in drop order.
    pub fn placed_items(&self, step: StepOrdinal) -> &[ItemId] {
        self.placements.placed(step)
    }

    /// Per-step ticks for the progress indicator: a placement step counts
    /// once all of its items are in. Zero-item steps never tick.
    pub fn step_completion_flags(&self) -> [bool; STEP_COUNT as usize] {
        let mut flags = [false; STEP_COUNT as usize];
        for step in self.catalog.steps() {
            flags[step.ordinal.index()] = step.requires_placements()
                && self.placements.is_complete(step.ordinal, step.required_ids());
        }
        flags
    }

    /// Whether the active step allows advancing.
    pub fn can_proceed(&self) -> bool {
        self.step_eligible(self.session.step)
    }

    fn step_eligible(&self, step: StepOrdinal) -> bool {
        let definition = self.catalog.get(step);
        if definition.requires_placements() {
            self.placements.is_complete(step, definition.required_ids())
        } else if definition.requires_inspection {
            self.placements.is_placed(step, &inspection_marker())
        } else {
            true
        }
    }

    /// Move to the next step, or to the finished screen from the last
    /// step. Refused without state change while the active step is
    /// incomplete; this is UI gating, not a fault.
    pub fn advance(&mut self) -> SessionSnapshot {
        if self.session.completed {
            return self.session.snapshot();
        }
        if !self.can_proceed() {
            tracing::debug!(step = %self.session.step, "advance refused; step not complete");
            return self.session.snapshot();
        }

        self.session.celebrating = false;
        match self.session.step.next() {
            Some(next) => {
                self.session.step = next;
                tracing::debug!(step = %next, "advanced");
            }
            None => {
                self.session.completed = true;
                self.cues.cue(FeedbackCue::Complete);
                tracing::debug!("activity completed");
            }
        }
        self.session.snapshot()
    }

    /// Step back. No-op from the first step. Also backs out of the
    /// finished screen; reset is the supported way off it, but the
    /// transition mirrors the forward handler for symmetry.
    pub fn retreat(&mut self) -> SessionSnapshot {
        self.session.completed = false;
        self.session.celebrating = false;
        if let Some(prev) = self.session.step.prev() {
            self.session.step = prev;
            tracing::debug!(step = %prev, "retreated");
        }
        self.session.snapshot()
    }

    /// Direct navigation from the progress indicator. Unconditional; never
    /// destroys recorded placements.
    pub fn jump_to(&mut self, ordinal: u8) -> Result<SessionSnapshot, DomainError> {
        let step = StepOrdinal::new(ordinal)?;
        self.session.step = step;
        self.session.completed = false;
        self.session.celebrating = false;
        tracing::debug!(step = %step, "jumped");
        Ok(self.session.snapshot())
    }

    /// Back to the initial state: step 1, nothing placed, flags cleared.
    /// The fullscreen preference is display state and survives.
    pub fn reset(&mut self) -> SessionSnapshot {
        self.placements.reset();
        self.drag = DragState::default();
        self.session = SessionState {
            fullscreen: self.session.fullscreen,
            ..SessionState::default()
        };
        tracing::debug!("session reset");
        self.session.snapshot()
    }

    /// One-time check action for the inspection step. Records the
    /// synthetic marker and fires the success cue exactly once.
    pub fn perform_inspection(&mut self) -> SessionSnapshot {
        let step = self.session.step;
        if self.catalog.get(step).requires_inspection
            && self.placements.record(step, inspection_marker())
        {
            self.session.celebrating = true;
            self.cues.cue(FeedbackCue::Success);
            tracing::debug!(step = %step, "inspection recorded");
        }
        self.session.snapshot()
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) -> SessionSnapshot {
        self.session.fullscreen = fullscreen;
        self.session.snapshot()
    }

    /// Gesture-start callback from the drag collaborator. Returns whether
    /// the item may move; placed and foreign items are not draggable.
    pub fn gesture_start(&mut self, item: ItemId) -> bool {
        let step = self.session.step;
        let draggable = !self.session.completed
            && self.catalog.get(step).required_item(&item).is_some()
            && !self.placements.is_placed(step, &item);
        if draggable {
            self.drag.begin(item);
        }
        draggable
    }

    /// Gesture-end callback. A release on the target zone of an active,
    /// not-yet-placed item records the placement and fires the drop cue;
    /// the placement that completes the step additionally starts the
    /// celebration and schedules the staggered success cue. Everything
    /// else is a forgiving no-op.
    pub fn gesture_end(&mut self, item: ItemId, zone: Option<ZoneId>) -> DropOutcome {
        self.drag.finish();

        if self.session.completed {
            return DropOutcome::Ignored;
        }
        let on_target = zone.is_some_and(|zone| zone.as_str() == DROP_ZONE_ID);
        let step = self.session.step;
        if !on_target || self.catalog.get(step).required_item(&item).is_none() {
            return DropOutcome::Ignored;
        }
        if !self.placements.record(step, item) {
            return DropOutcome::Ignored;
        }

        self.cues.cue(FeedbackCue::Drop);
        let definition = self.catalog.get(step);
        let completed_step = self
            .placements
            .is_complete(step, definition.required_ids());
        if completed_step {
            self.session.celebrating = true;
            self.cues.cue_after(FeedbackCue::Success, SUCCESS_CUE_DELAY);
            tracing::debug!(step = %step, "step complete");
        }
        DropOutcome::Placed { completed_step }
    }

    /// Pronunciation playback request from the science panel. Forwarded as
    /// a cue only when the active step offers it.
    pub fn request_pronunciation(&self) {
        if self.current_step().science.has_pronunciation {
            self.cues.cue(FeedbackCue::Pronounce);
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
