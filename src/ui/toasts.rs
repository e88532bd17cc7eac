// src/ui/toasts.rs
use std::time::Instant;

use eframe::egui::{self, Align2, RichText, Stroke};

use super::widgets::Palette;
use crate::dashboard::toast::{ToastKind, Toasts};

/// Stacks the live toasts in the bottom-right corner. Clicking one dismisses it.
pub fn show_toasts(ctx: &egui::Context, toasts: &mut Toasts, palette: &Palette, now: Instant) {
    if toasts.is_empty() {
        return;
    }

    let mut dismissed = None;
    egui::Area::new("toasts")
        .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for toast in toasts.iter() {
                let accent = match toast.kind {
                    ToastKind::Info => palette.accent,
                    ToastKind::Success => palette.success,
                    ToastKind::Warning => palette.warning,
                    ToastKind::Error => palette.error,
                };
                let fade = toasts.remaining(toast, now).min(0.25) * 4.0;

                let response = egui::Frame::none()
                    .fill(palette.bg_card.gamma_multiply(fade))
                    .stroke(Stroke::new(2.0, accent.gamma_multiply(fade)))
                    .rounding(6.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.label(RichText::new(&toast.message).color(palette.text_primary.gamma_multiply(fade)));
                    })
                    .response
                    .interact(egui::Sense::click());

                if response.clicked() {
                    dismissed = Some(toast.id);
                }
                ui.add_space(6.0);
            }
        });

    if let Some(id) = dismissed {
        toasts.dismiss(id);
    }
    ctx.request_repaint();
}
