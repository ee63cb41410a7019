// Telemetry data domain models
use serde::Serialize;
use std::collections::BTreeMap;

/// One `(x, y)` sample, `x` in seconds since epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    #[serde(rename = "x")]
    pub time_s: i64,
    #[serde(rename = "y")]
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_s: i64, value: f64) -> Self {
        Self { time_s, value }
    }
}

/// Server-downsampled series keyed by metric, as returned by the history endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySeries {
    series: BTreeMap<String, Vec<TimeSeriesPoint>>,
}

impl HistorySeries {
    pub fn new(series: BTreeMap<String, Vec<TimeSeriesPoint>>) -> Self {
        Self { series }
    }

    /// Points for `key`, empty when the source did not send that series.
    pub fn points(&self, key: &str) -> &[TimeSeriesPoint] {
        self.series.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesOrigin {
    Live,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub origin: SeriesOrigin,
    pub axis: Axis,
    pub hidden: bool,
    pub points: Vec<TimeSeriesPoint>,
}

impl SeriesData {
    pub fn new(
        id: String,
        name: String,
        origin: SeriesOrigin,
        axis: Axis,
        hidden: bool,
        points: Vec<TimeSeriesPoint>,
    ) -> Self {
        Self {
            id,
            name,
            origin,
            axis,
            hidden,
            points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartGroup {
    Thermal,
    Wind,
    Precipitation,
    SolarUv,
}

impl ChartGroup {
    pub const ALL: [ChartGroup; 4] = [
        ChartGroup::Thermal,
        ChartGroup::Wind,
        ChartGroup::Precipitation,
        ChartGroup::SolarUv,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ChartGroup::Thermal => "thermal",
            ChartGroup::Wind => "wind",
            ChartGroup::Precipitation => "precipitation",
            ChartGroup::SolarUv => "solar_uv",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.key() == key)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub group: ChartGroup,
    pub title: String,
    pub series: Vec<SeriesData>,
}

impl ChartData {
    pub fn new(group: ChartGroup, title: String, series: Vec<SeriesData>) -> Self {
        Self {
            group,
            title,
            series,
        }
    }

    pub fn series(&self, id: &str) -> Option<&SeriesData> {
        self.series.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_history_key_is_empty() {
        let mut map = BTreeMap::new();
        map.insert("uv".to_string(), vec![TimeSeriesPoint::new(60, 1.5)]);
        let history = HistorySeries::new(map);

        assert_eq!(history.points("uv").len(), 1);
        assert!(history.points("temperature").is_empty());
    }

    #[test]
    fn test_chart_group_keys() {
        for group in ChartGroup::ALL {
            assert_eq!(ChartGroup::from_key(group.key()), Some(group));
        }
        assert_eq!(ChartGroup::from_key("radar"), None);
    }

    #[test]
    fn test_point_serializes_as_xy() {
        let json = serde_json::to_value(TimeSeriesPoint::new(120, 3.5)).unwrap();
        assert_eq!(json, serde_json::json!({ "x": 120, "y": 3.5 }));
    }
}
