// src/app.rs
use std::future::Future;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Instant;

use eframe::egui;
use tokio::runtime::Runtime;
use tracing::{debug, error};

use crate::api::AnalysisSource;
use crate::dashboard::theme::Theme;
use crate::dashboard::{Dashboard, RefreshStep};
use crate::dom::Command;
use crate::error::FetchError;
use crate::file::RonFileStore;
use crate::model::{AnalysisSnapshot, UpdateResponse};
use crate::ui::{self, EguiClipboard, Palette};

/// Result of a backend request, sent from the runtime back to the UI thread.
enum Job {
    Analysis {
        result: Result<AnalysisSnapshot, FetchError>,
        after_refresh: bool,
    },
    Update(Result<UpdateResponse, FetchError>),
}

pub struct DashboardApp {
    dashboard: Dashboard<RonFileStore, EguiClipboard>,
    source: Arc<dyn AnalysisSource>,
    runtime: Runtime,
    jobs_tx: Sender<Job>,
    jobs_rx: Receiver<Job>,
    applied_theme: Option<Theme>,
}

impl DashboardApp {
    /// Builds the app, runs the page bootstrap and starts the first load.
    pub fn new(
        ctx: &egui::Context,
        dashboard: Dashboard<RonFileStore, EguiClipboard>,
        source: Arc<dyn AnalysisSource>,
        runtime: Runtime,
    ) -> Self {
        let (jobs_tx, jobs_rx) = mpsc::channel();
        let mut app = Self {
            dashboard,
            source,
            runtime,
            jobs_tx,
            jobs_rx,
            applied_theme: None,
        };

        app.dashboard.start();
        app.spawn_load(ctx, false);
        app
    }

    fn spawn_load(&self, ctx: &egui::Context, after_refresh: bool) {
        let source = Arc::clone(&self.source);
        self.spawn_job(
            ctx,
            async move { source.fetch_analysis().await },
            move |result| Job::Analysis { result, after_refresh },
        );
    }

    fn spawn_update(&self, ctx: &egui::Context) {
        let source = Arc::clone(&self.source);
        self.spawn_job(ctx, async move { source.request_update().await }, Job::Update);
    }

    /// Runs `request` on the runtime and always answers with a job, even when
    /// the request task panics or is cancelled.
    fn spawn_job<T: Send + 'static>(
        &self,
        ctx: &egui::Context,
        request: impl Future<Output = Result<T, FetchError>> + Send + 'static,
        into_job: impl FnOnce(Result<T, FetchError>) -> Job + Send + 'static,
    ) {
        let tx = self.jobs_tx.clone();
        let ctx = ctx.clone();
        let task = self.runtime.spawn(request);
        self.runtime.spawn(async move {
            let result = task.await.unwrap_or_else(|e| {
                error!("Backend request task failed: {}", e);
                Err(FetchError::Network(format!("request task failed: {}", e)))
            });
            if tx.send(into_job(result)).is_err() {
                debug!("Window closed before the request finished");
            }
            ctx.request_repaint();
        });
    }

    /// Applies every finished request. A refresh keeps its markers until the
    /// reload it triggered has been applied.
    fn drain_jobs(&mut self, ctx: &egui::Context) {
        while let Ok(job) = self.jobs_rx.try_recv() {
            match job {
                Job::Analysis { result, after_refresh } => {
                    self.dashboard.apply_analysis(result);
                    if after_refresh {
                        self.dashboard.finish_refresh();
                    }
                }
                Job::Update(result) => match self.dashboard.on_update_response(result) {
                    RefreshStep::Reload => self.spawn_load(ctx, true),
                    RefreshStep::Done => self.dashboard.finish_refresh(),
                },
            }
        }
    }

    fn handle(&mut self, ctx: &egui::Context, command: Command) {
        debug!(?command, "Click");
        match command {
            Command::ToggleTheme => self.dashboard.toggle_theme(),
            Command::Refresh => {
                if !self.dashboard.is_refreshing() {
                    self.dashboard.begin_refresh();
                    self.spawn_update(ctx);
                }
            }
            Command::CopyKey(kind) => self.dashboard.copy_key(kind),
        }
    }

    pub fn dashboard(&self) -> &Dashboard<RonFileStore, EguiClipboard> {
        &self.dashboard
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_jobs(ctx);

        let now = Instant::now();
        self.dashboard.toasts_mut().expire(now);

        let theme = self.dashboard.theme();
        if self.applied_theme != Some(theme) {
            ctx.set_visuals(ui::widgets::visuals(theme));
            self.applied_theme = Some(theme);
        }
        let palette = Palette::for_theme(theme);

        let commands = egui::CentralPanel::default()
            .show(ctx, |ui| ui::show_dashboard(ui, &self.dashboard, &palette, now))
            .inner;
        for command in commands {
            self.handle(ctx, command);
        }

        ui::show_toasts(ctx, self.dashboard.toasts_mut(), &palette, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::toast::ToastKind;
    use crate::dom::ids;
    use crate::dom::page::UPDATING;
    use crate::model::{simulated_snapshot, SIMULATED_TOTAL_DRAWS};
    use async_trait::async_trait;
    use std::time::Duration;

    struct OfflineSource;

    #[async_trait]
    impl AnalysisSource for OfflineSource {
        async fn fetch_analysis(&self) -> Result<AnalysisSnapshot, FetchError> {
            Err(FetchError::Network("connection refused".to_string()))
        }

        async fn request_update(&self) -> Result<UpdateResponse, FetchError> {
            Err(FetchError::Timeout(Duration::from_secs(300)))
        }
    }

    struct HealthySource;

    #[async_trait]
    impl AnalysisSource for HealthySource {
        async fn fetch_analysis(&self) -> Result<AnalysisSnapshot, FetchError> {
            Ok(AnalysisSnapshot {
                total_draws: Some(1900),
                ..simulated_snapshot()
            })
        }

        async fn request_update(&self) -> Result<UpdateResponse, FetchError> {
            Ok(UpdateResponse {
                status: "success".to_string(),
                message: Some("Dados atualizados".to_string()),
                total_draws: Some(1900),
                timestamp: None,
            })
        }
    }

    /// Backend whose every request task panics.
    struct CrashingSource;

    #[async_trait]
    impl AnalysisSource for CrashingSource {
        async fn fetch_analysis(&self) -> Result<AnalysisSnapshot, FetchError> {
            panic!("analysis handler crashed");
        }

        async fn request_update(&self) -> Result<UpdateResponse, FetchError> {
            panic!("update handler crashed");
        }
    }

    fn app(source: Arc<dyn AnalysisSource>, dir: &tempfile::TempDir) -> (DashboardApp, egui::Context) {
        let ctx = egui::Context::default();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let dashboard = Dashboard::new(
            RonFileStore::open(dir.path().join("settings.ron")),
            EguiClipboard::detached(),
            Duration::from_secs(4),
        );
        (DashboardApp::new(&ctx, dashboard, source, runtime), ctx)
    }

    /// Drains jobs until `done` holds, or fails after a few seconds.
    fn pump(app: &mut DashboardApp, ctx: &egui::Context, done: impl Fn(&DashboardApp) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(app) {
            assert!(Instant::now() < deadline, "job never arrived");
            app.drain_jobs(ctx);
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_startup_falls_back_to_simulated_data() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, ctx) = app(Arc::new(OfflineSource), &dir);
        assert!(!app.dashboard().document().text_content(ids::CURRENT_YEAR).is_empty());

        pump(&mut app, &ctx, |app| app.dashboard().current_data().is_some());

        let doc = app.dashboard().document();
        assert_eq!(doc.text_content(ids::TOTAL_DRAWS), SIMULATED_TOTAL_DRAWS.to_string());
        assert_eq!(app.dashboard().toasts().last().unwrap().kind, ToastKind::Error);
    }

    #[test]
    fn test_refresh_reloads_then_clears_markers() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, ctx) = app(Arc::new(HealthySource), &dir);
        pump(&mut app, &ctx, |app| app.dashboard().current_data().is_some());

        app.handle(&ctx, Command::Refresh);
        assert!(app.dashboard().is_refreshing());

        pump(&mut app, &ctx, |app| !app.dashboard().is_refreshing());
        assert_eq!(app.dashboard().document().text_content(ids::TOTAL_DRAWS), "1900");
        assert!(app
            .dashboard()
            .toasts()
            .iter()
            .any(|t| t.kind == ToastKind::Success && t.message == "Dados atualizados"));
    }

    #[test]
    fn test_failed_refresh_clears_markers_without_reload() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, ctx) = app(Arc::new(OfflineSource), &dir);
        pump(&mut app, &ctx, |app| app.dashboard().current_data().is_some());

        app.handle(&ctx, Command::Refresh);
        pump(&mut app, &ctx, |app| !app.dashboard().is_refreshing());
        assert_eq!(
            app.dashboard().toasts().last().unwrap().message,
            "A atualização excedeu o tempo limite."
        );
    }

    #[test]
    fn test_crashed_requests_still_settle() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, ctx) = app(Arc::new(CrashingSource), &dir);

        pump(&mut app, &ctx, |app| app.dashboard().current_data().is_some());
        assert_eq!(
            app.dashboard().document().text_content(ids::TOTAL_DRAWS),
            SIMULATED_TOTAL_DRAWS.to_string()
        );

        app.handle(&ctx, Command::Refresh);
        assert!(app.dashboard().is_refreshing());
        pump(&mut app, &ctx, |app| !app.dashboard().is_refreshing());
        assert!(app.dashboard().document().ids_with_class(UPDATING).is_empty());
        assert_eq!(app.dashboard().toasts().last().unwrap().message, "Erro ao atualizar dados.");
    }

    #[test]
    fn test_toggle_theme_persists_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, ctx) = app(Arc::new(HealthySource), &dir);
        app.handle(&ctx, Command::ToggleTheme);
        assert_eq!(app.dashboard().theme(), Theme::Light);

        let reopened = RonFileStore::open(dir.path().join("settings.ron"));
        assert_eq!(crate::file::KeyValueStore::get(&reopened, "theme").as_deref(), Some("light"));
    }
}
