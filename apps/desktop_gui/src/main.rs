//! Desktop shell for the step-by-step yogurt-fermentation lab.

mod controller;
mod feedback;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use sim_core::Simulation;

use crate::controller::events::UiEvent;
use crate::feedback::cues::{ChannelCueSink, CueRequest};
use crate::feedback::worker;
use crate::ui::app::{LabApp, PersistedLabSettings, SETTINGS_STORAGE_KEY};

/// Interactive drag-and-drop lesson on how milk ferments into yogurt.
#[derive(Debug, Parser)]
#[command(name = "yogurt-lab")]
struct Args {
    /// Step to open on (placements start empty either way).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
    start_step: Option<u8>,

    /// Launch in fullscreen.
    #[arg(long)]
    fullscreen: bool,

    /// Disable decorative animations for this launch.
    #[arg(long)]
    reduced_motion: bool,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let (cue_tx, cue_rx) = bounded::<CueRequest>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    worker::spawn(cue_rx, ui_tx);

    let mut sim = Simulation::standard(Box::new(ChannelCueSink::new(cue_tx)));
    if let Some(step) = args.start_step {
        if let Err(err) = sim.jump_to(step) {
            tracing::warn!(%err, "ignoring --start-step");
        }
    }
    if args.fullscreen {
        sim.set_fullscreen(true);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Yogurt Fermentation Lab")
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([860.0, 620.0])
            .with_fullscreen(args.fullscreen),
        ..Default::default()
    };
    eframe::run_native(
        "Yogurt Fermentation Lab",
        options,
        Box::new(move |cc| {
            let mut settings = cc
                .storage
                .and_then(|storage| storage.get_string(SETTINGS_STORAGE_KEY))
                .and_then(|text| serde_json::from_str::<PersistedLabSettings>(&text).ok())
                .unwrap_or_default();
            if args.reduced_motion {
                settings.reduced_motion = true;
            }
            Ok(Box::new(LabApp::new(sim, ui_rx, settings)))
        }),
    )
}
