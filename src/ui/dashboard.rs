// src/ui/dashboard.rs
use std::time::Instant;

use eframe::egui::{self, RichText};

use super::charts::frequency_chart;
use super::widgets::{Palette, Region};
use crate::dashboard::Dashboard;
use crate::dom::page::{key_regions, LOADING, UPDATING};
use crate::dom::{ids, Clipboard, Command, Document};
use crate::file::KeyValueStore;
use crate::model::KeyKind;

/// Paints the whole page from the dashboard's element tree and returns the
/// commands bound to whatever was clicked this frame. Requests a repaint while
/// anything is still animating.
pub fn show_dashboard<S: KeyValueStore, C: Clipboard>(
    ui: &mut egui::Ui,
    dashboard: &Dashboard<S, C>,
    palette: &Palette,
    now: Instant,
) -> Vec<Command> {
    let doc = dashboard.document();
    let mut region = Region::new(doc, palette, now);
    let mut commands = Vec::new();

    show_header(ui, doc, palette, &mut commands);
    ui.add_space(12.0);

    egui::ScrollArea::vertical()
        .id_source("dashboard_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            show_stats(ui, &mut region);
            ui.add_space(12.0);

            card(ui, palette, false, |ui| {
                ui.heading("Último Resultado");
                region.balls(ui, ids::LAST_RESULT_BALLS);
            });
            ui.add_space(12.0);

            ui.columns(3, |columns| {
                for (column, kind) in columns.iter_mut().zip(KeyKind::ALL) {
                    show_key_card(column, &mut region, kind, &mut commands);
                }
            });
            ui.add_space(12.0);

            ui.columns(2, |columns| {
                card(&mut columns[0], palette, false, |ui| {
                    ui.heading("Números Mais Frequentes");
                    region.list(ui, ids::TOP_NUMBERS_LIST);
                });
                card(&mut columns[1], palette, false, |ui| {
                    ui.heading("Números em Atraso");
                    region.list(ui, ids::OVERDUE_NUMBERS_LIST);
                });
            });
            ui.add_space(12.0);

            show_trends(ui, &mut region);
            ui.add_space(12.0);

            let mut charts_animating = false;
            ui.columns(2, |columns| {
                card(&mut columns[0], palette, false, |ui| {
                    ui.heading("Frequência dos Números");
                    charts_animating |= frequency_chart(ui, dashboard.numbers_chart(), now);
                });
                card(&mut columns[1], palette, false, |ui| {
                    ui.heading("Frequência das Estrelas");
                    charts_animating |= frequency_chart(ui, dashboard.stars_chart(), now);
                });
            });
            region.animating |= charts_animating;

            ui.add_space(16.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(format!("© {} EuroMilhões Dashboard", doc.text_content(ids::CURRENT_YEAR)))
                        .small()
                        .color(palette.text_secondary),
                );
            });
        });

    if region.animating {
        ui.ctx().request_repaint();
    }
    commands
}

/// Pushes the command bound to `id`, if any, when `response` was clicked.
fn on_click(doc: &Document, id: &str, response: &egui::Response, commands: &mut Vec<Command>) {
    if response.clicked() {
        if let Some(command) = doc.click(id) {
            commands.push(command);
        }
    }
}

fn card<R>(ui: &mut egui::Ui, palette: &Palette, dimmed: bool, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    let fill = if dimmed {
        palette.bg_card.gamma_multiply(0.6)
    } else {
        palette.bg_card
    };
    egui::Frame::none()
        .fill(fill)
        .rounding(8.0)
        .inner_margin(14.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

fn show_header(ui: &mut egui::Ui, doc: &Document, palette: &Palette, commands: &mut Vec<Command>) {
    ui.horizontal(|ui| {
        ui.heading(RichText::new("EuroMilhões Dashboard").strong().color(palette.text_primary));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let icon = doc.text_content(ids::THEME_ICON);
            let response = ui.button(RichText::new(icon).size(16.0));
            on_click(doc, ids::THEME_TOGGLE, &response, commands);

            let refresh = doc.element(ids::REFRESH_BTN);
            let loading = refresh.map_or(false, |btn| btn.has_class(LOADING));
            let enabled = refresh.map_or(false, |btn| !btn.disabled);
            let label = if loading { "A atualizar..." } else { "🔄 Atualizar" };
            let response = ui.add_enabled(enabled, egui::Button::new(label));
            on_click(doc, ids::REFRESH_BTN, &response, commands);
            if loading {
                ui.add(egui::Spinner::new());
            }
        });
    });
}

fn show_stats(ui: &mut egui::Ui, region: &mut Region) {
    let palette = region.palette;
    ui.columns(3, |columns| {
        let stats = [
            ("Total de Sorteios", ids::TOTAL_DRAWS),
            ("Fonte de Dados", ids::DATA_SOURCE),
            ("Última Atualização", ids::LAST_SCRAPING),
        ];
        for (column, (title, id)) in columns.iter_mut().zip(stats) {
            card(column, palette, false, |ui| {
                ui.label(RichText::new(title).color(palette.text_secondary));
                region.value(ui, id, 22.0);
            });
        }
    });
}

fn show_key_card(ui: &mut egui::Ui, region: &mut Region, kind: KeyKind, commands: &mut Vec<Command>) {
    let doc = region.doc;
    let palette = region.palette;
    let regions = key_regions(kind);
    let updating = doc
        .element(regions.card)
        .map_or(false, |card| card.has_class(UPDATING));

    card(ui, palette, updating, |ui| {
        ui.horizontal(|ui| {
            ui.heading(kind.title());
            if updating {
                ui.add(egui::Spinner::new().size(14.0));
            }
        });
        region.balls(ui, regions.numbers);
        region.balls(ui, regions.stars);
        ui.add_space(6.0);

        let response = ui.button("📋 Copiar");
        on_click(doc, regions.copy_button, &response, commands);
    });
}

fn show_trends(ui: &mut egui::Ui, region: &mut Region) {
    let doc = region.doc;
    let palette = region.palette;
    let updating = |id: &str| doc.element(id).map_or(false, |card| card.has_class(UPDATING));

    ui.columns(3, |columns| {
        card(&mut columns[0], palette, updating(ids::HOT_TREND_CARD), |ui| {
            ui.heading("Tendência Quente");
            region.balls(ui, ids::HOT_TREND_BALLS);
        });
        card(&mut columns[1], palette, updating(ids::STARS_TREND_CARD), |ui| {
            ui.heading("Estrelas em Alta");
            region.balls(ui, ids::STARS_TREND_BALLS);
        });
        card(&mut columns[2], palette, updating(ids::FREQUENCY_TREND_CARD), |ui| {
            ui.heading("Frequência Média");
            show_avg_frequency(ui, doc, palette);
        });
    });
}

fn show_avg_frequency(ui: &mut egui::Ui, doc: &Document, palette: &Palette) {
    let Some(element) = doc.element(ids::AVG_FREQUENCY) else { return };
    if element.children.is_empty() {
        ui.label(RichText::new(&element.text).size(22.0).color(palette.text_primary));
        return;
    }
    for child in &element.children {
        let text = RichText::new(&child.text);
        if child.has_class("freq-percentage") {
            ui.label(text.size(26.0).strong().color(palette.accent));
        } else {
            ui.label(text.small().color(palette.text_secondary));
        }
    }
}
