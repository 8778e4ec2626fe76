//! Per-step record of items dropped into the target zone.

use std::collections::BTreeMap;

use shared::domain::{ItemId, StepOrdinal};

/// Synthetic marker recorded when the check action runs on the
/// inspection step.
pub const INSPECTION_MARKER: &str = "checked";

pub fn inspection_marker() -> ItemId {
    ItemId::new(INSPECTION_MARKER)
}

/// Placement tracker. Insertion order is kept so dropped artifacts render
/// in the order they arrived; completion only cares about membership.
#[derive(Debug, Clone, Default)]
pub struct PlacementLog {
    placed: BTreeMap<StepOrdinal, Vec<ItemId>>,
}

impl PlacementLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent insert. Returns whether this call changed state, so the
    /// caller can fire one-shot feedback exactly once.
    pub fn record(&mut self, step: StepOrdinal, item: ItemId) -> bool {
        let entries = self.placed.entry(step).or_default();
        if entries.contains(&item) {
            return false;
        }
        entries.push(item);
        true
    }

    pub fn is_placed(&self, step: StepOrdinal, item: &ItemId) -> bool {
        self.placed
            .get(&step)
            .is_some_and(|entries| entries.contains(item))
    }

    /// Items placed for `step`, in drop order.
    pub fn placed(&self, step: StepOrdinal) -> &[ItemId] {
        self.placed
            .get(&step)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn placed_count(&self, step: StepOrdinal) -> usize {
        self.placed(step).len()
    }

    /// True iff every id in `required` has been placed for `step`.
    pub fn is_complete<'a>(
        &self,
        step: StepOrdinal,
        required: impl IntoIterator<Item = &'a ItemId>,
    ) -> bool {
        let placed = self.placed(step);
        required.into_iter().all(|id| placed.contains(id))
    }

    pub fn reset(&mut self) {
        self.placed.clear();
    }
}
