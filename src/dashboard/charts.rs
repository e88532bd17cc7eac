// src/dashboard/charts.rs
use std::time::{Duration, Instant};

use eframe::egui::Color32;
use tracing::debug;

use crate::dom::ids;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartColors {
    pub background: Color32,
    pub border: Color32,
    pub tooltip_border: Color32,
}

pub const NUMBER_COLORS: ChartColors = ChartColors {
    background: Color32::from_rgba_premultiplied(26, 69, 165, 179),
    border: Color32::from_rgb(30, 64, 175),
    tooltip_border: Color32::from_rgba_premultiplied(15, 32, 88, 128),
};

pub const STAR_COLORS: ChartColors = ChartColors {
    background: Color32::from_rgba_premultiplied(152, 83, 4, 179),
    border: Color32::from_rgb(180, 83, 9),
    tooltip_border: Color32::from_rgba_premultiplied(109, 60, 3, 128),
};

/// Everything needed to draw one frequency bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub canvas_id: &'static str,
    pub dataset_label: &'static str,
    pub labels: Vec<u32>,
    pub data: Vec<u32>,
    pub colors: ChartColors,
    pub tick_color: Color32,
    pub begin_at_zero: bool,
    /// Upper bound on labelled x ticks; labels are skipped evenly beyond it.
    pub max_ticks: Option<usize>,
}

impl ChartConfig {
    pub fn frequencies(
        canvas_id: &'static str,
        frequencies: &[u32],
        label_count: u32,
        colors: ChartColors,
        tick_color: Color32,
    ) -> Self {
        Self {
            canvas_id,
            dataset_label: "Frequência",
            labels: (1..=label_count).collect(),
            data: frequencies.to_vec(),
            colors,
            tick_color,
            begin_at_zero: true,
            max_ticks: None,
        }
    }

    pub fn numbers(frequencies: &[u32], tick_color: Color32) -> Self {
        Self {
            max_ticks: Some(25),
            ..Self::frequencies(ids::NUMBERS_CHART, frequencies, 50, NUMBER_COLORS, tick_color)
        }
    }

    pub fn stars(frequencies: &[u32], tick_color: Color32) -> Self {
        Self::frequencies(ids::STARS_CHART, frequencies, 12, STAR_COLORS, tick_color)
    }

    /// Labels that get a tick mark.
    pub fn tick_labels(&self) -> Vec<u32> {
        let step = match self.max_ticks {
            Some(max) if max > 0 && self.labels.len() > max => self.labels.len().div_ceil(max),
            _ => 1,
        };
        self.labels.iter().copied().step_by(step).collect()
    }

    /// `(label, value)` pairs; labels without a value are left out.
    pub fn bars(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.labels.iter().copied().zip(self.data.iter().copied())
    }
}

const ENTRY_ANIMATION: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Redraw with the entry animation.
    Default,
    /// Redraw in place, without animating.
    None,
}

/// A live chart bound to a canvas. Loads replace it wholesale; theme changes
/// only patch its options and redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyChart {
    instance: u64,
    config: ChartConfig,
    revision: u32,
    last_update: UpdateMode,
    created_at: Instant,
}

impl FrequencyChart {
    pub fn new(instance: u64, config: ChartConfig) -> Self {
        debug!(canvas = config.canvas_id, instance, bars = config.data.len(), "chart created");
        Self {
            instance,
            config,
            revision: 0,
            last_update: UpdateMode::Default,
            created_at: Instant::now(),
        }
    }

    pub fn destroy(self) {
        debug!(canvas = self.config.canvas_id, instance = self.instance, "chart destroyed");
    }

    pub fn update(&mut self, mode: UpdateMode) {
        self.revision += 1;
        self.last_update = mode;
    }

    pub fn set_tick_color(&mut self, color: Color32) {
        self.config.tick_color = color;
    }

    pub fn instance(&self) -> u64 {
        self.instance
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn last_update(&self) -> UpdateMode {
        self.last_update
    }

    /// Share of the bar heights to draw: eases out over the first second of a
    /// new chart, always full once redrawn without animation.
    pub fn animation_progress(&self, now: Instant) -> f32 {
        if self.last_update == UpdateMode::None {
            return 1.0;
        }
        let t = now.saturating_duration_since(self.created_at).as_secs_f32() / ENTRY_ANIMATION.as_secs_f32();
        let t = t.clamp(0.0, 1.0);
        1.0 - (1.0 - t).powi(4)
    }

    /// Plot id for the painter. A rebuilt chart gets a fresh id so its view
    /// bounds and animation start over.
    pub fn plot_id(&self) -> String {
        format!("{}-{}", self.config.canvas_id, self.instance)
    }
}

/// Tears down `previous` and builds a chart from `config`. With no config
/// (frequencies absent) the canvas is left empty.
pub fn rebuild_chart(
    previous: Option<FrequencyChart>,
    config: Option<ChartConfig>,
    next_instance: &mut u64,
) -> Option<FrequencyChart> {
    if let Some(chart) = previous {
        chart.destroy();
    }
    let config = config?;
    *next_instance += 1;
    Some(FrequencyChart::new(*next_instance, config))
}
