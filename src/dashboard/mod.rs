// src/dashboard/mod.rs
use std::time::Duration;

use chrono::Datelike;
use tracing::{error, info, warn};

use crate::api::AnalysisSource;
use crate::dom::page::{key_regions, KEY_CARD, LOADING, TREND_CARD, UPDATING};
use crate::dom::{ids, Clipboard, Command, Document};
use crate::error::FetchError;
use crate::file::KeyValueStore;
use crate::model::{simulated_snapshot, AnalysisSnapshot, KeyKind, UpdateResponse};

pub mod charts;
pub mod render;
pub mod theme;
pub mod toast;

use charts::{rebuild_chart, ChartConfig, FrequencyChart, UpdateMode};
use theme::{Theme, THEME_KEY};
use toast::{ToastKind, Toasts};

/// What follows an `/api/update` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStep {
    Reload,
    Done,
}

/// Owns everything the page shows: the current snapshot, the two chart
/// handles, the theme and the element tree. Mutated only from the UI thread.
pub struct Dashboard<S: KeyValueStore, C: Clipboard> {
    document: Document,
    current_data: Option<AnalysisSnapshot>,
    numbers_chart: Option<FrequencyChart>,
    stars_chart: Option<FrequencyChart>,
    next_chart_instance: u64,
    theme: Theme,
    store: S,
    clipboard: C,
    toasts: Toasts,
}

impl<S: KeyValueStore, C: Clipboard> Dashboard<S, C> {
    pub fn new(store: S, clipboard: C, toast_duration: Duration) -> Self {
        Self {
            document: Document::dashboard(),
            current_data: None,
            numbers_chart: None,
            stars_chart: None,
            next_chart_instance: 0,
            theme: Theme::default(),
            store,
            clipboard,
            toasts: Toasts::new(toast_duration),
        }
    }

    /// Page bootstrap: theme, footer year and click bindings. The first load
    /// is started by the caller.
    pub fn start(&mut self) {
        self.init_theme();

        let year = chrono::Local::now().year();
        self.document.set_text(ids::CURRENT_YEAR, year.to_string());

        self.document.add_click_listener(ids::THEME_TOGGLE, Command::ToggleTheme);
        self.document.add_click_listener(ids::REFRESH_BTN, Command::Refresh);
        for kind in KeyKind::ALL {
            self.document
                .add_click_listener(key_regions(kind).copy_button, Command::CopyKey(kind));
        }
    }

    pub fn init_theme(&mut self) {
        self.theme = Theme::from_stored(self.store.get(THEME_KEY).as_deref());
        self.update_theme_icon();
    }

    fn update_theme_icon(&mut self) {
        self.document.set_text(ids::THEME_ICON, self.theme.icon());
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();

        if let Err(e) = self.store.set(THEME_KEY, self.theme.as_str()) {
            warn!("Failed to persist theme: {}", e);
        }
        self.update_theme_icon();

        if self.current_data.is_some() {
            let color = self.theme.text_color();
            if let (Some(numbers), Some(stars)) = (self.numbers_chart.as_mut(), self.stars_chart.as_mut()) {
                for chart in [numbers, stars] {
                    chart.set_tick_color(color);
                    chart.update(UpdateMode::None);
                }
            }
        }
    }

    /// Fetches the analysis and renders it, or renders synthetic data if the
    /// fetch fails in any way.
    pub async fn load_dashboard_data(&mut self, source: &dyn AnalysisSource) {
        let result = source.fetch_analysis().await;
        self.apply_analysis(result);
    }

    pub fn apply_analysis(&mut self, result: Result<AnalysisSnapshot, FetchError>) {
        let data = match result {
            Ok(data) => {
                info!(total_draws = ?data.total_draws, "Analysis loaded");
                data
            }
            Err(e) => {
                warn!("Failed to load analysis, showing simulated data: {}", e);
                if e.is_timeout() {
                    self.toasts.push(
                        ToastKind::Warning,
                        "O servidor demorou demasiado. A mostrar dados simulados.",
                    );
                } else {
                    self.toasts.push(
                        ToastKind::Error,
                        "Erro ao carregar dados. A mostrar dados simulados.",
                    );
                }
                simulated_snapshot()
            }
        };

        self.render(&data);
        self.current_data = Some(data);
    }

    fn render(&mut self, data: &AnalysisSnapshot) {
        let doc = &mut self.document;
        render::update_stats(doc, data);
        render::update_last_result(doc, data);
        render::update_strategic_keys(doc, data.strategic_keys.as_ref());
        render::update_top_numbers(doc, data.top_numbers.as_deref());
        render::update_overdue_numbers(doc, data.overdue_numbers.as_deref());
        render::update_trends(doc, data);

        let tick_color = self.theme.text_color();
        self.numbers_chart = rebuild_chart(
            self.numbers_chart.take(),
            data.number_frequencies.as_deref().map(|f| ChartConfig::numbers(f, tick_color)),
            &mut self.next_chart_instance,
        );
        self.stars_chart = rebuild_chart(
            self.stars_chart.take(),
            data.star_frequencies.as_deref().map(|f| ChartConfig::stars(f, tick_color)),
            &mut self.next_chart_instance,
        );
    }

    /// Asks the backend to re-scrape, then reloads on success. The refresh
    /// markers are cleared whatever happens.
    pub async fn refresh_data(&mut self, source: &dyn AnalysisSource) {
        self.begin_refresh();

        let step = self.on_update_response(source.request_update().await);
        if step == RefreshStep::Reload {
            self.load_dashboard_data(source).await;
        }

        self.finish_refresh();
    }

    pub fn begin_refresh(&mut self) {
        self.document.add_class(ids::REFRESH_BTN, LOADING);
        self.document.set_disabled(ids::REFRESH_BTN, true);
        for id in self.refresh_regions() {
            self.document.add_class(&id, UPDATING);
        }
    }

    pub fn on_update_response(&mut self, result: Result<UpdateResponse, FetchError>) -> RefreshStep {
        match result {
            Ok(update) if update.is_success() => {
                info!(total_draws = ?update.total_draws, "Backend data updated");
                self.toasts.push(
                    ToastKind::Success,
                    update.message.unwrap_or_else(|| "Dados atualizados com sucesso!".to_string()),
                );
                RefreshStep::Reload
            }
            Ok(update) => {
                warn!(status = %update.status, "Backend update did not succeed");
                self.toasts.push(
                    ToastKind::Warning,
                    update.message.unwrap_or_else(|| "Falha ao atualizar dados".to_string()),
                );
                RefreshStep::Done
            }
            Err(e) => {
                error!("Failed to refresh data: {}", e);
                let message = if e.is_timeout() {
                    "A atualização excedeu o tempo limite."
                } else {
                    "Erro ao atualizar dados."
                };
                self.toasts.push(ToastKind::Error, message);
                RefreshStep::Done
            }
        }
    }

    pub fn finish_refresh(&mut self) {
        self.document.remove_class(ids::REFRESH_BTN, LOADING);
        self.document.set_disabled(ids::REFRESH_BTN, false);
        for id in self.refresh_regions() {
            self.document.remove_class(&id, UPDATING);
        }
    }

    fn refresh_regions(&self) -> Vec<String> {
        let mut regions = self.document.ids_with_class(KEY_CARD);
        regions.extend(self.document.ids_with_class(TREND_CARD));
        regions
    }

    pub fn is_refreshing(&self) -> bool {
        self.document
            .element(ids::REFRESH_BTN)
            .map_or(false, |btn| btn.disabled)
    }

    /// Copies one strategic key to the clipboard. Does nothing until data is
    /// loaded or when that key is absent or has an empty list.
    pub fn copy_key(&mut self, kind: KeyKind) {
        let Some(key) = self
            .current_data
            .as_ref()
            .and_then(|data| data.strategic_keys.as_ref())
            .and_then(|keys| keys.get(kind))
            .filter(|key| key.is_complete())
        else {
            return;
        };

        let text = key.to_clipboard_text();
        match self.clipboard.write_text(&text) {
            Ok(()) => {
                info!(key = kind.as_str(), "Key copied: {}", text);
                self.toasts.push(ToastKind::Success, format!("Chave copiada: {}", text));
            }
            Err(e) => {
                error!(key = kind.as_str(), "Failed to copy key: {}", e);
                self.toasts.push(ToastKind::Error, "Erro ao copiar chave");
            }
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn current_data(&self) -> Option<&AnalysisSnapshot> {
        self.current_data.as_ref()
    }

    pub fn numbers_chart(&self) -> Option<&FrequencyChart> {
        self.numbers_chart.as_ref()
    }

    pub fn stars_chart(&self) -> Option<&FrequencyChart> {
        self.stars_chart.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut Toasts {
        &mut self.toasts
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }
}
