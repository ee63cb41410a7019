use crate::application::history_cache::DEFAULT_MAX_AGE;
use crate::domain::live_buffer::DEFAULT_LIVE_CAPACITY;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct StationConfig {
    pub station: StationSettings,
    pub refresh: RefreshSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StationSettings {
    pub base_url: String,
    pub latest_path: String,
    pub history_path: String,
    pub request_timeout_secs: u64,
}

impl StationSettings {
    pub fn latest_url(&self) -> String {
        self.join(&self.latest_path)
    }

    pub fn history_url(&self) -> String {
        self.join(&self.history_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    pub interval_secs: u64,
    pub history_window_hours: u32,
    pub history_max_age_secs: u64,
    pub live_capacity: usize,
}

impl RefreshSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn history_max_age(&self) -> Duration {
        Duration::from_secs(self.history_max_age_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

/// Load `config/station.toml`; every key has a default, so the file is optional.
pub fn load_station_config() -> anyhow::Result<StationConfig> {
    build_config(config::File::with_name("config/station").required(false))
}

fn build_config<S>(source: S) -> anyhow::Result<StationConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = with_defaults(config::Config::builder())?
        .add_source(source)
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("station.base_url", "http://127.0.0.1:8080")?
        .set_default("station.latest_path", "/api/latest")?
        .set_default("station.history_path", "/api/history")?
        .set_default("station.request_timeout_secs", 10)?
        .set_default("refresh.interval_secs", 5)?
        .set_default("refresh.history_window_hours", 24)?
        .set_default("refresh.history_max_age_secs", DEFAULT_MAX_AGE.as_secs() as i64)?
        .set_default("refresh.live_capacity", DEFAULT_LIVE_CAPACITY as i64)?
        .set_default("server.bind", "0.0.0.0:8090")
}
