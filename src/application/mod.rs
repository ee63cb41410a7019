// Application layer - Refresh use cases and the seams they talk through
pub mod chart_layout;
pub mod chart_sink;
pub mod dashboard_service;
pub mod history_cache;
pub mod refresh_loop;
pub mod station_source;

#[cfg(test)]
pub(crate) mod fakes;
