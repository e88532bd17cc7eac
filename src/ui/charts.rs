// src/ui/charts.rs
use std::time::Instant;

use eframe::egui::{self, RichText, Stroke};
use egui_plot::{Bar, BarChart, GridInput, GridMark, Plot};

use crate::dashboard::charts::FrequencyChart;

const CHART_HEIGHT: f32 = 220.0;

/// Paints a frequency chart. Returns true while its entry animation runs.
pub fn frequency_chart(ui: &mut egui::Ui, chart: Option<&FrequencyChart>, now: Instant) -> bool {
    let Some(chart) = chart else {
        ui.add_sized(
            [ui.available_width(), CHART_HEIGHT],
            egui::Label::new(RichText::new("-").weak()),
        );
        return false;
    };

    let config = chart.config();
    let progress = chart.animation_progress(now) as f64;

    let bars: Vec<Bar> = config
        .bars()
        .map(|(label, value)| {
            Bar::new(label as f64, value as f64 * progress)
                .name(label.to_string())
                .width(0.8)
                .fill(config.colors.background)
                .stroke(Stroke::new(1.0, config.colors.border))
        })
        .collect();

    let dataset_label = config.dataset_label;
    let chart_data = BarChart::new(bars)
        .name(dataset_label)
        .color(config.colors.border)
        .element_formatter(Box::new(move |bar, _| {
            format!("{}\n{}: {}", bar.name, dataset_label, bar.value.round())
        }));

    let ticks = config.tick_labels();
    let spacing = ticks.get(1).zip(ticks.first()).map_or(1.0, |(b, a)| (b - a) as f64);

    ui.scope(|ui| {
        ui.visuals_mut().override_text_color = Some(config.tick_color);

        let mut plot = Plot::new(chart.plot_id())
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show_background(false)
            .x_grid_spacer(move |_input: GridInput| {
                ticks
                    .iter()
                    .map(|&label| GridMark {
                        value: label as f64,
                        step_size: spacing,
                    })
                    .collect()
            });
        if config.begin_at_zero {
            plot = plot.include_y(0.0);
        }

        plot.show(ui, |plot_ui| plot_ui.bar_chart(chart_data));
    });

    progress < 1.0
}
