//! Controller layer: UI events and dispatch onto the simulation core.

pub mod events;
pub mod orchestration;
