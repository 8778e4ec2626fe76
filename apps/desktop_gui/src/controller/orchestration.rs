//! Dispatch from navigation-surface actions to simulation transitions.

use sim_core::{SessionSnapshot, Simulation};

use crate::controller::events::ControlAction;

/// Applies one navigation request and returns the snapshot to render.
/// Ineligible requests come back as the unchanged snapshot; an
/// out-of-range jump is logged and refused.
pub fn apply_control_action(sim: &mut Simulation, action: ControlAction) -> SessionSnapshot {
    let action_name = match action {
        ControlAction::Advance => "advance",
        ControlAction::Retreat => "retreat",
        ControlAction::JumpTo(_) => "jump_to",
        ControlAction::Reset => "reset",
        ControlAction::Inspect => "inspect",
        ControlAction::SetFullscreen(_) => "set_fullscreen",
    };
    tracing::debug!(action = action_name, "applying control action");

    match action {
        ControlAction::Advance => sim.advance(),
        ControlAction::Retreat => sim.retreat(),
        ControlAction::JumpTo(ordinal) => match sim.jump_to(ordinal) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(%err, "refusing progress-indicator jump");
                sim.session()
            }
        },
        ControlAction::Reset => sim.reset(),
        ControlAction::Inspect => sim.perform_inspection(),
        ControlAction::SetFullscreen(fullscreen) => sim.set_fullscreen(fullscreen),
    }
}
