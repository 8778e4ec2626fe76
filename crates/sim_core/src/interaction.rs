//! Transient drag-gesture state and drop resolution results.

use shared::domain::ItemId;

/// Item currently being moved. Visual feedback only; never persisted and
/// never part of completion checks.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    active: Option<ItemId>,
}

impl DragState {
    pub fn begin(&mut self, item: ItemId) {
        self.active = Some(item);
    }

    pub fn finish(&mut self) -> Option<ItemId> {
        self.active.take()
    }

    pub fn active(&self) -> Option<&ItemId> {
        self.active.as_ref()
    }
}

/// Outcome of a gesture-end event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Placement recorded. `completed_step` is set when this drop was the
    /// one that finished the step.
    Placed { completed_step: bool },
    /// Release outside the target zone, of a foreign item, or of an item
    /// already placed. Valid input, no state change.
    Ignored,
}

impl DropOutcome {
    pub fn placed(self) -> bool {
        matches!(self, DropOutcome::Placed { .. })
    }
}
