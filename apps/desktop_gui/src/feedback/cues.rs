//! Channel-backed cue sink handed to the simulation core.

use std::time::Duration;

use crossbeam_channel::{Sender, TrySendError};
use shared::domain::FeedbackCue;
use sim_core::CueSink;

/// A cue plus the stagger the worker applies before delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueRequest {
    pub cue: FeedbackCue,
    pub delay: Duration,
}

/// Forwards cues over a bounded queue to the worker thread. Queue overflow
/// and a missing worker are swallowed with a warning; decorative feedback
/// never blocks or interrupts a state transition.
#[derive(Debug, Clone)]
pub struct ChannelCueSink {
    tx: Sender<CueRequest>,
}

impl ChannelCueSink {
    pub fn new(tx: Sender<CueRequest>) -> Self {
        Self { tx }
    }

    fn submit(&self, request: CueRequest) {
        match self.tx.try_send(request) {
            Ok(()) => {}
            Err(TrySendError::Full(request)) => {
                tracing::warn!(cue = ?request.cue, "cue queue full; dropping cue");
            }
            Err(TrySendError::Disconnected(request)) => {
                tracing::warn!(cue = ?request.cue, "cue worker unavailable; dropping cue");
            }
        }
    }
}

impl CueSink for ChannelCueSink {
    fn cue(&self, cue: FeedbackCue) {
        self.submit(CueRequest {
            cue,
            delay: Duration::ZERO,
        });
    }

    fn cue_after(&self, cue: FeedbackCue, delay: Duration) {
        self.submit(CueRequest { cue, delay });
    }
}
