//! Worker thread that owns cue timing and echoes fired cues to the shell.

use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::controller::events::UiEvent;
use crate::feedback::cues::CueRequest;

pub fn spawn(cue_rx: Receiver<CueRequest>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || run(cue_rx, ui_tx));
}

fn run(cue_rx: Receiver<CueRequest>, ui_tx: Sender<UiEvent>) {
    for request in cue_rx.iter() {
        if request.delay.is_zero() {
            deliver(&ui_tx, request);
        } else {
            // Fire-and-forget stagger with no cancellation; a stale cue
            // landing after navigation is cosmetic and tolerated.
            let ui_tx = ui_tx.clone();
            thread::spawn(move || {
                thread::sleep(request.delay);
                deliver(&ui_tx, request);
            });
        }
    }
    tracing::debug!("cue intake closed; worker exiting");
}

fn deliver(ui_tx: &Sender<UiEvent>, request: CueRequest) {
    tracing::debug!(cue = ?request.cue, delay_ms = request.delay.as_millis() as u64, "feedback cue fired");
    if ui_tx.try_send(UiEvent::Cue(request.cue)).is_err() {
        tracing::warn!(cue = ?request.cue, "ui event queue unavailable; cue dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::FeedbackCue;
    use std::time::{Duration, Instant};

    #[test]
    fn immediate_cues_are_echoed_to_the_ui() {
        let (cue_tx, cue_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        spawn(cue_rx, ui_tx);

        cue_tx
            .send(CueRequest {
                cue: FeedbackCue::Drop,
                delay: Duration::ZERO,
            })
            .expect("queue cue");
        assert_eq!(
            ui_rx.recv_timeout(Duration::from_secs(1)).expect("echo"),
            UiEvent::Cue(FeedbackCue::Drop)
        );
    }

    #[test]
    fn delayed_cues_arrive_after_the_stagger_without_blocking_others() {
        let (cue_tx, cue_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        spawn(cue_rx, ui_tx);

        let started = Instant::now();
        cue_tx
            .send(CueRequest {
                cue: FeedbackCue::Success,
                delay: Duration::from_millis(80),
            })
            .expect("queue delayed cue");
        cue_tx
            .send(CueRequest {
                cue: FeedbackCue::Drop,
                delay: Duration::ZERO,
            })
            .expect("queue immediate cue");

        // The immediate cue overtakes the staggered one.
        assert_eq!(
            ui_rx.recv_timeout(Duration::from_secs(1)).expect("first"),
            UiEvent::Cue(FeedbackCue::Drop)
        );
        assert_eq!(
            ui_rx.recv_timeout(Duration::from_secs(1)).expect("second"),
            UiEvent::Cue(FeedbackCue::Success)
        );
        assert!(started.elapsed() >= Duration::from_millis(80));
    }
}
