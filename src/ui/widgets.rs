// src/ui/widgets.rs
use std::time::Instant;

use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke};

use crate::dashboard::theme::Theme;
use crate::dom::{Document, Element, Tone};

/// Seconds a token takes to fade in once its delay has passed.
const REVEAL_FADE: f32 = 0.3;
const BALL_RADIUS: f32 = 15.0;

/// Theme colors resolved once per frame.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_card: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub accent: Color32,
    pub star: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        let color = |name: &str, fallback: Color32| theme.color(name).unwrap_or(fallback);
        Self {
            bg_primary: color("--bg-primary", Color32::from_gray(15)),
            bg_card: color("--bg-card", Color32::from_gray(26)),
            text_primary: theme.text_color(),
            text_secondary: color("--text-secondary", Color32::GRAY),
            accent: color("--accent", Color32::from_rgb(37, 99, 235)),
            star: color("--star", Color32::from_rgb(217, 119, 6)),
            success: color("--success", Color32::GREEN),
            warning: color("--warning", Color32::YELLOW),
            error: color("--error", Color32::RED),
        }
    }

    pub fn tone(&self, tone: Tone) -> Color32 {
        match tone {
            Tone::Success => self.success,
            Tone::Warning => self.warning,
        }
    }
}

/// egui visuals for a theme: the stock dark/light set with the page colors
/// on panels and windows.
pub fn visuals(theme: Theme) -> egui::Visuals {
    let palette = Palette::for_theme(theme);
    let mut visuals = match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    };
    visuals.panel_fill = palette.bg_primary;
    visuals.window_fill = palette.bg_card;
    visuals.hyperlink_color = palette.accent;
    visuals.selection.bg_fill = palette.accent;
    visuals
}

/// Opacity of an element revealed `delay` seconds after its region was
/// rendered. Elements with no delay, or in regions never rendered, are fully
/// visible.
pub fn reveal_alpha(rendered_at: Option<Instant>, delay: Option<f32>, now: Instant) -> f32 {
    let (Some(rendered_at), Some(delay)) = (rendered_at, delay) else {
        return 1.0;
    };
    let elapsed = now.saturating_duration_since(rendered_at).as_secs_f32() - delay;
    (elapsed / REVEAL_FADE).clamp(0.0, 1.0)
}

/// Per-frame painting context for one region of the document.
pub struct Region<'a> {
    pub doc: &'a Document,
    pub palette: &'a Palette,
    pub now: Instant,
    /// Set when anything painted is still fading in.
    pub animating: bool,
}

impl<'a> Region<'a> {
    pub fn new(doc: &'a Document, palette: &'a Palette, now: Instant) -> Self {
        Self {
            doc,
            palette,
            now,
            animating: false,
        }
    }

    fn alpha(&mut self, id: &str, element: &Element) -> f32 {
        let alpha = reveal_alpha(self.doc.rendered_at(id), element.style.animation_delay, self.now);
        if alpha < 1.0 {
            self.animating = true;
        }
        alpha
    }

    /// Plain text value, colored by its tone and dimmed by its opacity.
    pub fn value(&mut self, ui: &mut egui::Ui, id: &str, size: f32) {
        let doc = self.doc;
        let Some(element) = doc.element(id) else { return };
        let mut color = element
            .style
            .color
            .map_or(self.palette.text_primary, |tone| self.palette.tone(tone));
        if let Some(opacity) = element.style.opacity {
            color = color.gamma_multiply(opacity);
        }
        ui.label(RichText::new(element.text_content()).size(size).strong().color(color));
    }

    /// A row of number and star tokens, or the region's text when it holds
    /// no tokens.
    pub fn balls(&mut self, ui: &mut egui::Ui, id: &str) {
        let doc = self.doc;
        let Some(element) = doc.element(id) else { return };
        if element.children.is_empty() {
            ui.label(RichText::new(&element.text).color(self.palette.text_secondary));
            return;
        }

        ui.horizontal(|ui| {
            for child in &element.children {
                if child.has_class("plus-sign") || child.has_class("result-plus") {
                    ui.label(RichText::new(&child.text).size(18.0).color(self.palette.text_secondary));
                    continue;
                }
                let alpha = self.alpha(id, child);
                let fill = if child.has_class("star") || child.has_class("star-ball") {
                    self.palette.star
                } else {
                    self.palette.accent
                };
                ball(ui, child, fill, self.palette.text_secondary, alpha);
            }
        });
    }

    /// One row per list item: the number on the left, its detail on the right.
    pub fn list(&mut self, ui: &mut egui::Ui, id: &str) {
        let doc = self.doc;
        let Some(element) = doc.element(id) else { return };

        for item in &element.children {
            let alpha = self.alpha(id, item);
            let mut parts = item.children.iter();
            let number = parts.next().map(|e| e.text.as_str()).unwrap_or_default();
            let detail = parts.next().map(|e| e.text.as_str()).unwrap_or_default();

            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(number)
                        .strong()
                        .size(16.0)
                        .color(self.palette.text_primary.gamma_multiply(alpha)),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(detail).color(self.palette.text_secondary.gamma_multiply(alpha)));
                });
            });
        }
    }
}

fn ball(ui: &mut egui::Ui, element: &Element, fill: Color32, outline: Color32, alpha: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(BALL_RADIUS * 2.0 + 2.0, BALL_RADIUS * 2.0 + 2.0), Sense::hover());
    let painter = ui.painter();
    let center = rect.center();

    if element.has_class("empty") {
        painter.circle_stroke(center, BALL_RADIUS, Stroke::new(1.5, outline.gamma_multiply(alpha * 0.6)));
        return;
    }

    painter.circle_filled(center, BALL_RADIUS, fill.gamma_multiply(alpha));
    painter.text(
        center,
        Align2::CENTER_CENTER,
        &element.text,
        FontId::proportional(14.0),
        Color32::WHITE.gamma_multiply(alpha),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_reveal_alpha() {
        let rendered = Instant::now();
        assert_eq!(reveal_alpha(None, Some(0.5), rendered), 1.0);
        assert_eq!(reveal_alpha(Some(rendered), None, rendered), 1.0);

        assert_eq!(reveal_alpha(Some(rendered), Some(0.5), rendered), 0.0);
        let mid = reveal_alpha(Some(rendered), Some(0.5), rendered + Duration::from_millis(650));
        assert!((mid - 0.5).abs() < 1e-3);
        assert_eq!(reveal_alpha(Some(rendered), Some(0.5), rendered + Duration::from_secs(2)), 1.0);
    }

    #[test]
    fn test_palette_follows_theme() {
        let dark = Palette::for_theme(Theme::Dark);
        let light = Palette::for_theme(Theme::Light);
        assert_eq!(dark.text_primary, Theme::Dark.text_color());
        assert_ne!(dark.bg_primary, light.bg_primary);
        assert_eq!(dark.tone(Tone::Success), dark.success);
        assert_eq!(visuals(Theme::Light).panel_fill, light.bg_primary);
    }
}
