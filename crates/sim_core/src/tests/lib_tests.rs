use super::*;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum RecordedCue {
    Immediate(FeedbackCue),
    Delayed(FeedbackCue, Duration),
}

#[derive(Clone, Default)]
struct RecordingCueSink {
    cues: Arc<Mutex<Vec<RecordedCue>>>,
}

impl RecordingCueSink {
    fn new() -> (Self, Arc<Mutex<Vec<RecordedCue>>>) {
        let sink = Self::default();
        let cues = sink.cues.clone();
        (sink, cues)
    }
}

impl CueSink for RecordingCueSink {
    fn cue(&self, cue: FeedbackCue) {
        self.cues
            .lock()
            .expect("cue log")
            .push(RecordedCue::Immediate(cue));
    }

    fn cue_after(&self, cue: FeedbackCue, delay: Duration) {
        self.cues
            .lock()
            .expect("cue log")
            .push(RecordedCue::Delayed(cue, delay));
    }
}

fn simulation() -> Simulation {
    Simulation::standard(Box::new(NullCueSink))
}

fn recording_simulation() -> (Simulation, Arc<Mutex<Vec<RecordedCue>>>) {
    let (sink, cues) = RecordingCueSink::new();
    (Simulation::standard(Box::new(sink)), cues)
}

fn item(id: &str) -> ItemId {
    ItemId::new(id)
}

fn drop_on_target(sim: &mut Simulation, id: &str) -> DropOutcome {
    sim.gesture_end(item(id), Some(drop_zone()))
}

/// Drives the active step to completion through the public surface.
fn complete_current_step(sim: &mut Simulation) {
    if sim.current_step().requires_inspection {
        sim.perform_inspection();
        return;
    }
    let ids: Vec<ItemId> = sim.current_step().required_ids().cloned().collect();
    for id in ids {
        assert!(sim.gesture_end(id, Some(drop_zone())).placed());
    }
}

#[test]
fn eligibility_requires_every_item_and_duplicates_change_nothing() {
    let mut sim = simulation();

    assert!(!sim.can_proceed());
    assert!(drop_on_target(&mut sim, "hot-water").placed());
    assert!(!sim.can_proceed());
    assert!(drop_on_target(&mut sim, "cold-water").placed());
    assert!(sim.can_proceed());

    // Re-dropping a placed item is refused and leaves the set at size 2.
    assert_eq!(drop_on_target(&mut sim, "hot-water"), DropOutcome::Ignored);
    assert!(sim.can_proceed());
    assert_eq!(sim.placed_items(StepOrdinal::FIRST).len(), 2);
}

#[test]
fn advance_is_refused_until_eligible() {
    let mut sim = simulation();
    let before = sim.session();
    assert_eq!(sim.advance(), before);

    complete_current_step(&mut sim);
    let after = sim.advance();
    assert_eq!(after.step.get(), 2);
    assert!(!after.completed);
}

#[test]
fn full_run_finishes_on_the_terminal_edge_only() {
    let (mut sim, cues) = recording_simulation();

    for expected in 1..=7u8 {
        assert_eq!(sim.session().step.get(), expected);
        complete_current_step(&mut sim);
        sim.advance();
    }

    let snap = sim.session();
    assert!(snap.completed);
    assert_eq!(snap.step, StepOrdinal::LAST);

    let complete_count = cues
        .lock()
        .expect("cue log")
        .iter()
        .filter(|cue| **cue == RecordedCue::Immediate(FeedbackCue::Complete))
        .count();
    assert_eq!(complete_count, 1);

    // Terminal state refuses further advances without re-firing the cue.
    sim.advance();
    let complete_count = cues
        .lock()
        .expect("cue log")
        .iter()
        .filter(|cue| **cue == RecordedCue::Immediate(FeedbackCue::Complete))
        .count();
    assert_eq!(complete_count, 1);
}

#[test]
fn reset_restores_the_initial_state_from_anywhere() {
    let mut sim = simulation();
    complete_current_step(&mut sim);
    sim.advance();
    sim.set_fullscreen(true);

    let snap = sim.reset();
    assert_eq!(snap.step, StepOrdinal::FIRST);
    assert!(!snap.completed);
    assert!(!snap.celebrating);
    // Display preference survives; sim state does not.
    assert!(snap.fullscreen);
    assert!(sim.placed_items(StepOrdinal::FIRST).is_empty());
    assert!(!sim.can_proceed());
}

#[test]
fn jump_preserves_progress_and_clears_completion() {
    let mut sim = simulation();
    complete_current_step(&mut sim);

    let snap = sim.jump_to(5).expect("valid jump");
    assert_eq!(snap.step.get(), 5);

    let back = sim.jump_to(1).expect("valid jump");
    assert_eq!(back.step, StepOrdinal::FIRST);
    assert!(sim.can_proceed(), "navigation never destroys placements");

    assert!(matches!(
        sim.jump_to(0),
        Err(shared::error::DomainError::OutOfRangeStep { ordinal: 0 })
    ));
    assert!(sim.jump_to(8).is_err());
    assert_eq!(sim.session().step, StepOrdinal::FIRST, "failed jump is a no-op");
}

#[test]
fn jump_clears_the_finished_screen() {
    let mut sim = simulation();
    for _ in 0..7 {
        complete_current_step(&mut sim);
        sim.advance();
    }
    assert!(sim.session().completed);

    let snap = sim.jump_to(7).expect("valid jump");
    assert!(!snap.completed);
    assert_eq!(snap.step, StepOrdinal::LAST);
}

#[test]
fn retreat_stops_at_the_first_step() {
    let mut sim = simulation();
    let snap = sim.retreat();
    assert_eq!(snap.step, StepOrdinal::FIRST);

    complete_current_step(&mut sim);
    sim.advance();
    assert_eq!(sim.retreat().step, StepOrdinal::FIRST);
}

#[test]
fn inspection_step_needs_the_explicit_check() {
    let mut sim = simulation();
    sim.jump_to(6).expect("valid jump");
    assert!(!sim.can_proceed());

    let snap = sim.perform_inspection();
    assert!(sim.can_proceed());
    assert!(snap.celebrating);

    sim.reset();
    sim.jump_to(6).expect("valid jump");
    assert!(!sim.can_proceed(), "reset discards the inspection marker");
}

#[test]
fn inspection_success_cue_fires_once() {
    let (mut sim, cues) = recording_simulation();
    sim.jump_to(6).expect("valid jump");
    sim.perform_inspection();
    sim.perform_inspection();
    assert_eq!(
        *cues.lock().expect("cue log"),
        vec![RecordedCue::Immediate(FeedbackCue::Success)]
    );
}

#[test]
fn inspection_outside_the_inspection_step_is_ignored() {
    let mut sim = simulation();
    sim.perform_inspection();
    assert!(!sim.can_proceed());
    assert!(sim.placed_items(StepOrdinal::FIRST).is_empty());
}

#[test]
fn cross_step_items_are_never_accepted() {
    let mut sim = simulation();
    // yogurt-starter belongs to step 3; the session is on step 1.
    assert_eq!(
        drop_on_target(&mut sim, "yogurt-starter"),
        DropOutcome::Ignored
    );
    assert!(sim.placed_items(StepOrdinal::FIRST).is_empty());
}

#[test]
fn releases_off_the_target_zone_are_ignored() {
    let mut sim = simulation();
    assert_eq!(sim.gesture_end(item("hot-water"), None), DropOutcome::Ignored);
    assert_eq!(
        sim.gesture_end(item("hot-water"), Some(ZoneId::new("science-panel"))),
        DropOutcome::Ignored
    );
    assert!(sim.placed_items(StepOrdinal::FIRST).is_empty());
}

#[test]
fn placed_items_are_no_longer_draggable() {
    let mut sim = simulation();
    assert!(sim.gesture_start(item("hot-water")));
    assert_eq!(sim.dragging(), Some(&item("hot-water")));

    drop_on_target(&mut sim, "hot-water");
    assert!(sim.dragging().is_none());
    assert!(!sim.gesture_start(item("hot-water")));
    // Foreign items never start a move either.
    assert!(!sim.gesture_start(item("yogurt-starter")));
}

#[test]
fn drop_cue_fires_only_on_state_change() {
    let (mut sim, cues) = recording_simulation();
    drop_on_target(&mut sim, "hot-water");
    drop_on_target(&mut sim, "hot-water");
    sim.gesture_end(item("hot-water"), None);

    let drops = cues
        .lock()
        .expect("cue log")
        .iter()
        .filter(|cue| **cue == RecordedCue::Immediate(FeedbackCue::Drop))
        .count();
    assert_eq!(drops, 1);
}

#[test]
fn completing_a_step_schedules_the_staggered_success_cue() {
    let (mut sim, cues) = recording_simulation();

    assert_eq!(
        drop_on_target(&mut sim, "hot-water"),
        DropOutcome::Placed {
            completed_step: false
        }
    );
    assert!(!sim.session().celebrating);

    assert_eq!(
        drop_on_target(&mut sim, "cold-water"),
        DropOutcome::Placed {
            completed_step: true
        }
    );
    assert!(sim.session().celebrating);

    assert_eq!(
        *cues.lock().expect("cue log"),
        vec![
            RecordedCue::Immediate(FeedbackCue::Drop),
            RecordedCue::Immediate(FeedbackCue::Drop),
            RecordedCue::Delayed(FeedbackCue::Success, SUCCESS_CUE_DELAY),
        ]
    );
}

#[test]
fn navigation_clears_the_celebration() {
    let mut sim = simulation();
    complete_current_step(&mut sim);
    assert!(sim.session().celebrating);
    assert!(!sim.advance().celebrating);

    sim.jump_to(3).expect("valid jump");
    complete_current_step(&mut sim);
    assert!(sim.session().celebrating);
    assert!(!sim.jump_to(5).expect("valid jump").celebrating);
}

#[test]
fn incubation_jars_render_in_drop_order() {
    let mut sim = simulation();
    sim.jump_to(5).expect("valid jump");
    for id in ["jar-2", "jar-4", "jar-1", "jar-3"] {
        assert!(drop_on_target(&mut sim, id).placed());
    }
    let order: Vec<&str> = sim
        .placed_items(sim.session().step)
        .iter()
        .map(ItemId::as_str)
        .collect();
    assert_eq!(order, vec!["jar-2", "jar-4", "jar-1", "jar-3"]);
    assert!(sim.can_proceed());
}

#[test]
fn completion_flags_track_placement_steps_only() {
    let mut sim = simulation();
    assert_eq!(sim.step_completion_flags(), [false; 7]);

    complete_current_step(&mut sim);
    let flags = sim.step_completion_flags();
    assert!(flags[0]);
    assert_eq!(&flags[1..], &[false; 6]);

    // The inspection step never ticks, even once checked.
    sim.jump_to(6).expect("valid jump");
    sim.perform_inspection();
    assert!(!sim.step_completion_flags()[5]);
}

#[test]
fn pronunciation_cue_is_limited_to_the_starter_step() {
    let (mut sim, cues) = recording_simulation();
    sim.request_pronunciation();
    assert!(cues.lock().expect("cue log").is_empty());

    sim.jump_to(3).expect("valid jump");
    sim.request_pronunciation();
    assert_eq!(
        *cues.lock().expect("cue log"),
        vec![RecordedCue::Immediate(FeedbackCue::Pronounce)]
    );
}

#[test]
fn drops_after_completion_are_ignored() {
    let mut sim = simulation();
    for _ in 0..7 {
        complete_current_step(&mut sim);
        sim.advance();
    }
    assert!(sim.session().completed);
    assert!(!sim.gesture_start(item("yogurt-cup")));
    assert_eq!(drop_on_target(&mut sim, "yogurt-cup"), DropOutcome::Ignored);
}
