//! Color palette and style defaults for the lab shell.

use eframe::egui;

pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(254, 243, 222);
pub const PANEL: egui::Color32 = egui::Color32::from_rgb(255, 255, 255);
pub const PANEL_SOFT: egui::Color32 = egui::Color32::from_rgb(245, 243, 255);

pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(31, 41, 55);
pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(107, 114, 128);

pub const ZONE_IDLE: egui::Color32 = egui::Color32::from_rgb(96, 165, 250);
pub const ZONE_OVER: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
pub const ZONE_COMPLETE: egui::Color32 = egui::Color32::from_rgb(16, 185, 129);

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(139, 92, 246);
pub const STEP_DONE: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
pub const STEP_PENDING: egui::Color32 = egui::Color32::from_rgb(209, 213, 219);

pub const MILK: egui::Color32 = egui::Color32::from_rgb(255, 250, 240);
pub const BACTERIUM: egui::Color32 = egui::Color32::from_rgb(167, 139, 250);

pub fn lighten(color: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round() as u8
    };
    egui::Color32::from_rgb(mix(color.r()), mix(color.g()), mix(color.b()))
}

/// One-time visual setup: light scheme, warm background, rounded widgets.
pub fn apply(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();
    style.visuals.panel_fill = BACKGROUND;
    style.visuals.window_fill = PANEL;

    let radius = egui::CornerRadius::same(10);
    style.visuals.widgets.inactive.corner_radius = radius;
    style.visuals.widgets.hovered.corner_radius = radius;
    style.visuals.widgets.active.corner_radius = radius;
    style.visuals.widgets.open.corner_radius = radius;
    style.visuals.widgets.noninteractive.corner_radius = radius;

    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_moves_toward_white_and_clamps() {
        assert_eq!(lighten(egui::Color32::BLACK, 1.0), egui::Color32::WHITE);
        assert_eq!(lighten(ZONE_IDLE, 0.0), ZONE_IDLE);
        let softened = lighten(ZONE_IDLE, 0.5);
        assert!(softened.r() > ZONE_IDLE.r());
        assert_eq!(lighten(ZONE_IDLE, 2.0), egui::Color32::WHITE);
    }
}
