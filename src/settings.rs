// src/settings.rs
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";
const ENV_PREFIX: &str = "EURODASH";
const CONFIG_PATH_VAR: &str = "EURODASH_CONFIG";

/// Runtime settings: built-in defaults, then `dashboard.toml`, then the file
/// named by `EURODASH_CONFIG`, then `EURODASH_*` environment variables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub analysis_timeout_secs: u64,
    pub update_timeout_secs: u64,
    pub toast_duration_secs: u64,
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    pub window_width: f32,
    pub window_height: f32,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let mut builder = Self::defaults()?
            .add_source(File::with_name("dashboard").required(false));

        if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
            builder = builder.add_source(File::with_name(&path).required(true));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read dashboard configuration")?
            .try_deserialize()
            .context("Invalid dashboard configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = Self::defaults()?
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("api_base_url", DEFAULT_BASE_URL)?
            .set_default("analysis_timeout_secs", 10_i64)?
            .set_default("update_timeout_secs", 300_i64)?
            .set_default("toast_duration_secs", 4_i64)?
            .set_default("window_width", 1200.0_f64)?
            .set_default("window_height", 860.0_f64)?)
    }

    fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(anyhow!("api_base_url must not be empty"));
        }
        if self.analysis_timeout_secs == 0 || self.update_timeout_secs == 0 {
            return Err(anyhow!("request timeouts must be at least one second"));
        }
        Ok(())
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    pub fn update_timeout(&self) -> Duration {
        Duration::from_secs(self.update_timeout_secs)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_duration_secs)
    }

    /// Where the theme and other client state is kept between runs.
    pub fn resolved_store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("eurodash")
                .join("settings.ron")
        })
    }
}
