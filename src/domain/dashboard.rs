// Dashboard domain model
use serde::Serialize;

use super::classification::{Severity, TrendTag};
use super::telemetry::{ChartData, ChartGroup};

/// Single-metric readout shown next to the charts.
#[derive(Debug, Clone, Serialize)]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub precision: i32,
    pub severity: Option<Severity>,
    pub trend: Option<TrendTag>,
    pub detail: Option<String>,
}

impl TileData {
    pub fn new(id: String, title: String, unit: String, value: f64, precision: i32) -> Self {
        Self {
            id,
            title,
            unit,
            value,
            precision,
            severity: None,
            trend: None,
            detail: None,
        }
    }

    pub fn with_severity(mut self, severity: Option<Severity>) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_trend(mut self, trend: TrendTag) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub code: String,
    pub name: String,
}

/// Everything the rendering layer needs for one refresh.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub station_time: String,
    /// When the reading behind this bundle was received, in Unix seconds.
    pub received_at: i64,
    pub generated_at: i64,
    pub location: Location,
    pub tiles: Vec<TileData>,
    pub charts: Vec<ChartData>,
}

impl Dashboard {
    pub fn new(
        title: String,
        station_time: String,
        received_at: i64,
        generated_at: i64,
        location: Location,
        tiles: Vec<TileData>,
        charts: Vec<ChartData>,
    ) -> Self {
        Self {
            title,
            station_time,
            received_at,
            generated_at,
            location,
            tiles,
            charts,
        }
    }

    pub fn chart(&self, group: ChartGroup) -> Option<&ChartData> {
        self.charts.iter().find(|c| c.group == group)
    }

    pub fn tile(&self, id: &str) -> Option<&TileData> {
        self.tiles.iter().find(|t| t.id == id)
    }
}
