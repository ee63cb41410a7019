// Dashboard service - One refresh cycle: snapshot, live buffers, history, classify, assemble
use crate::application::chart_layout::{CHARTS, ChartSpec, SeriesSource, TILES, TileSource};
use crate::application::history_cache::HistoryCache;
use crate::application::station_source::{FetchError, StationSource};
use crate::domain::classification::{classify_severity, classify_trend};
use crate::domain::dashboard::{Dashboard, Location, TileData};
use crate::domain::live_buffer::LiveBuffers;
use crate::domain::snapshot::{Metric, Snapshot};
use crate::domain::telemetry::{ChartData, HistorySeries, SeriesData, SeriesOrigin};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Refreshing,
}

pub struct DashboardService {
    source: Arc<dyn StationSource>,
    history: Arc<HistoryCache>,
    live: LiveBuffers,
    history_window_hours: u32,
    state: RefreshState,
}

impl DashboardService {
    pub fn new(
        source: Arc<dyn StationSource>,
        history: Arc<HistoryCache>,
        live_capacity: usize,
        history_window_hours: u32,
    ) -> Self {
        Self {
            source,
            history,
            live: LiveBuffers::new(live_capacity),
            history_window_hours,
            state: RefreshState::Idle,
        }
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn live(&self) -> &LiveBuffers {
        &self.live
    }

    /// Run one cycle stamped with the current wall-clock second.
    pub async fn refresh_cycle(&mut self) -> Result<Dashboard, FetchError> {
        self.refresh_cycle_at(chrono::Utc::now().timestamp()).await
    }

    /// Run one cycle with live points stamped at `now_s`.
    ///
    /// Only a failed snapshot fetch fails the cycle, and it does so before any
    /// buffer is touched. A failed history fetch falls back to the cached
    /// series, or to live-only charts when nothing has been cached yet.
    pub async fn refresh_cycle_at(&mut self, now_s: i64) -> Result<Dashboard, FetchError> {
        self.state = RefreshState::Refreshing;
        let result = self.run_cycle(now_s).await;
        self.state = RefreshState::Idle;
        result
    }

    async fn run_cycle(&mut self, now_s: i64) -> Result<Dashboard, FetchError> {
        let snapshot = self.source.latest().await?;

        self.live.record(now_s, &snapshot);

        let history = match self.history.get(self.history_window_hours).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!("History unavailable, charting live data only: {}", e);
                Arc::new(HistorySeries::default())
            }
        };

        let tiles = self.build_tiles(&snapshot);
        let charts = CHARTS
            .iter()
            .map(|spec| self.build_chart(spec, &history))
            .collect();

        tracing::debug!(
            "Assembled dashboard at {} ({} history series)",
            now_s,
            history.len()
        );

        let title = format!(
            "{} Weather (last {}h)",
            snapshot.location_name, self.history_window_hours
        );
        let location = Location {
            code: snapshot.location.clone(),
            name: snapshot.location_name.clone(),
        };

        Ok(Dashboard::new(
            title,
            snapshot.time.clone(),
            snapshot.received_at,
            now_s,
            location,
            tiles,
            charts,
        ))
    }

    fn build_tiles(&self, snapshot: &Snapshot) -> Vec<TileData> {
        TILES
            .iter()
            .map(|spec| {
                let tile = |value| {
                    TileData::new(
                        spec.id.to_string(),
                        spec.title.to_string(),
                        spec.unit.to_string(),
                        value,
                        spec.precision,
                    )
                };

                match spec.source {
                    TileSource::Metric(metric) => {
                        let value = snapshot.value(metric);
                        let mut data = tile(value)
                            .with_severity(classify_severity(metric, value))
                            .with_trend(classify_trend(snapshot.trend_signal(metric)));
                        if metric == Metric::WindDirection {
                            data = data.with_detail(snapshot.wind_cardinal.clone());
                        }
                        data
                    }
                    TileSource::Rain(field) => tile(field.value(&snapshot.rain)),
                }
            })
            .collect()
    }

    fn build_chart(&self, spec: &ChartSpec, history: &HistorySeries) -> ChartData {
        let series = spec
            .series
            .iter()
            .map(|s| {
                let (origin, points) = match s.source {
                    SeriesSource::Live(metric) => (SeriesOrigin::Live, self.live.get(metric).to_vec()),
                    SeriesSource::History(key) => (SeriesOrigin::History, history.points(key).to_vec()),
                };
                SeriesData::new(
                    s.id.to_string(),
                    s.name.to_string(),
                    origin,
                    s.axis,
                    s.hidden,
                    points,
                )
            })
            .collect();

        ChartData::new(spec.group, spec.title.to_string(), series)
    }
}
