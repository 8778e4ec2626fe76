//! Decorative particle animations drawn over the drop zone.
//!
//! Everything here is cosmetic. Per-particle variation comes from a hash
//! of the particle index, so the drawing is deterministic frame to frame
//! and the core never sees randomness.

use eframe::egui;
use shared::domain::AnimationKind;

use crate::ui::theme;

pub fn draw(ui: &egui::Ui, rect: egui::Rect, kind: AnimationKind, time: f64) {
    match kind {
        AnimationKind::None => {}
        AnimationKind::Steam => steam(ui, rect, time),
        AnimationKind::Bubbles => bubbles(ui, rect, time),
        AnimationKind::Bacteria => bacteria(ui, rect, time, false),
        AnimationKind::BacteriaMultiply => bacteria(ui, rect, time, true),
        AnimationKind::Snowflakes => snowflakes(ui, rect, time),
        AnimationKind::Pouring => pouring(ui, rect, time),
    }
}

/// Stable pseudo-random value in [0, 1) for particle `index`.
fn jitter(index: u64, salt: u64) -> f32 {
    let mut x = index
        .wrapping_mul(0x9e37_79b9_7f4a_7c15)
        .wrapping_add(salt.wrapping_mul(0xbf58_476d_1ce4_e5b9));
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^= x >> 31;
    (x >> 40) as f32 / (1u64 << 24) as f32
}

/// Looping phase in [0, 1) for a particle with `period` seconds and a
/// start offset; `None` until the offset has elapsed once.
fn phase(time: f64, period: f32, offset: f32) -> Option<f32> {
    let local = time - f64::from(offset);
    if local < 0.0 {
        return None;
    }
    Some((local % f64::from(period)) as f32 / period)
}

fn fade(color: egui::Color32, alpha: f32) -> egui::Color32 {
    let alpha = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
    egui::Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn pouring(ui: &egui::Ui, rect: egui::Rect, time: f64) {
    let painter = ui.painter_at(rect);
    let center_x = rect.center().x;

    // Stream grows, holds, then tapers, on a 2s loop.
    let t = (time % 2.0) as f32 / 2.0;
    let envelope = if t < 0.25 {
        t / 0.25
    } else if t < 0.75 {
        1.0
    } else {
        (1.0 - t) / 0.25
    };
    if envelope > 0.0 {
        let stream_len = rect.height() * 0.45 * envelope;
        let stream = egui::Rect::from_min_max(
            egui::pos2(center_x - 5.0, rect.top() + 8.0),
            egui::pos2(center_x + 5.0, rect.top() + 8.0 + stream_len),
        );
        painter.rect_filled(stream, egui::CornerRadius::same(4), fade(theme::MILK, 0.9));
    }

    for i in 0..8u64 {
        let Some(p) = phase(time, 1.5, i as f32 * 0.2) else {
            continue;
        };
        let x = center_x + (jitter(i, 1) - 0.5) * rect.width() * 0.1;
        let y = rect.top() + 12.0 + p * rect.height() * 0.55;
        let radius = 5.0 * (1.0 - p * 0.5);
        painter.circle_filled(egui::pos2(x, y), radius, fade(theme::MILK, 1.0 - p));
    }

    for i in 0..5u64 {
        let Some(p) = phase(time, 0.8, 0.5 + i as f32 * 0.15) else {
            continue;
        };
        let scale = if p < 0.5 { p * 2.0 } else { (1.0 - p) * 2.0 };
        let x = rect.left() + rect.width() * (0.4 + i as f32 * 0.05);
        let y = rect.bottom() - rect.height() * 0.2 - p * 10.0;
        painter.circle_filled(egui::pos2(x, y), 4.0 * scale, fade(theme::MILK, 0.8 * scale));
    }
}

fn bacteria(ui: &egui::Ui, rect: egui::Rect, time: f64, multiplying: bool) {
    let painter = ui.painter_at(rect);
    let count: u64 = if multiplying { 20 } else { 8 };

    for i in 0..count {
        let Some(p) = phase(time, 3.0 + jitter(i, 2) * 2.0, i as f32 * 0.2) else {
            continue;
        };
        let wiggle = (p * std::f32::consts::TAU).sin();
        let base_x = rect.left() + rect.width() * (0.1 + jitter(i, 3) * 0.8);
        let base_y = rect.top() + rect.height() * (0.1 + jitter(i, 4) * 0.8);
        let x = base_x + wiggle * (jitter(i, 5) * 40.0 - 20.0);
        let y = base_y + wiggle * (jitter(i, 6) * 40.0 - 20.0);
        let radius = 6.0 + 2.0 * (p * std::f32::consts::TAU).cos();
        let center = egui::pos2(x, y);
        painter.circle_filled(center, radius, fade(theme::BACTERIUM, 0.8));
        painter.circle_stroke(
            center,
            radius,
            egui::Stroke::new(1.0, fade(theme::ACCENT, 0.9)),
        );
    }

    if multiplying {
        painter.text(
            egui::pos2(rect.center().x, rect.bottom() - 18.0),
            egui::Align2::CENTER_CENTER,
            "The bacteria are multiplying! 🦠×2",
            egui::FontId::proportional(16.0),
            theme::ACCENT,
        );
    }
}

fn snowflakes(ui: &egui::Ui, rect: egui::Rect, time: f64) {
    let painter = ui.painter_at(rect);
    for i in 0..15u64 {
        let Some(p) = phase(time, 2.0 + jitter(i, 7) * 2.0, i as f32 * 0.2) else {
            continue;
        };
        let x = rect.left() + rect.width() * jitter(i, 8);
        let y = rect.top() + p * rect.height() * 0.8;
        painter.text(
            egui::pos2(x, y),
            egui::Align2::CENTER_CENTER,
            "❄",
            egui::FontId::proportional(14.0 + jitter(i, 9) * 6.0),
            fade(theme::ZONE_IDLE, 1.0 - p),
        );
    }
}

fn steam(ui: &egui::Ui, rect: egui::Rect, time: f64) {
    let painter = ui.painter_at(rect);
    for i in 0..8u64 {
        let Some(p) = phase(time, 2.0 + jitter(i, 10), i as f32 * 0.3) else {
            continue;
        };
        let x = rect.center().x + (jitter(i, 11) - 0.5) * 60.0 + p * (jitter(i, 12) - 0.5) * 40.0;
        let y = rect.bottom() - 20.0 - p * rect.height() * 0.6;
        painter.circle_filled(
            egui::pos2(x, y),
            6.0 + p * 8.0,
            fade(egui::Color32::WHITE, 0.8 * (1.0 - p)),
        );
    }
}

fn bubbles(ui: &egui::Ui, rect: egui::Rect, time: f64) {
    let painter = ui.painter_at(rect);
    for i in 0..12u64 {
        let Some(p) = phase(time, 1.5 + jitter(i, 13), i as f32 * 0.15) else {
            continue;
        };
        let x = rect.left() + rect.width() * (0.1 + jitter(i, 14) * 0.8);
        let y = rect.bottom() - 10.0 - p * rect.height() * 0.75;
        let radius = 4.0 + jitter(i, 15) * 6.0;
        painter.circle_stroke(
            egui::pos2(x, y),
            radius,
            egui::Stroke::new(1.5, fade(theme::ZONE_IDLE, 0.7 * (1.0 - p))),
        );
    }
}
