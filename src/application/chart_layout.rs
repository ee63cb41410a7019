// Static dashboard layout - which tiles and series make up each chart group
use crate::domain::live_buffer::LiveMetric;
use crate::domain::snapshot::{Metric, RainTotals};
use crate::domain::telemetry::{Axis, ChartGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesSource {
    Live(LiveMetric),
    /// Key in the history endpoint response
    History(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct SeriesSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub source: SeriesSource,
    pub axis: Axis,
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub group: ChartGroup,
    pub title: &'static str,
    pub series: &'static [SeriesSpec],
}

const fn live(id: &'static str, name: &'static str, metric: LiveMetric, axis: Axis) -> SeriesSpec {
    SeriesSpec {
        id,
        name,
        source: SeriesSource::Live(metric),
        axis,
        hidden: false,
    }
}

const fn history(id: &'static str, name: &'static str, key: &'static str, axis: Axis) -> SeriesSpec {
    SeriesSpec {
        id,
        name,
        source: SeriesSource::History(key),
        axis,
        hidden: false,
    }
}

const fn hidden(spec: SeriesSpec) -> SeriesSpec {
    SeriesSpec {
        hidden: true,
        ..spec
    }
}

pub const CHARTS: [ChartSpec; 4] = [
    ChartSpec {
        group: ChartGroup::Thermal,
        title: "Temperature & Humidity",
        series: &[
            live("temperature_live", "Temp (live) °C", LiveMetric::Temperature, Axis::Primary),
            history("temperature_history", "Temp (history) °C", "temperature", Axis::Primary),
            live("humidity_live", "Hum (live) %", LiveMetric::Humidity, Axis::Secondary),
            history("humidity_history", "Hum (history) %", "humidity", Axis::Secondary),
        ],
    },
    ChartSpec {
        group: ChartGroup::Wind,
        title: "Wind",
        series: &[
            live("windspeed_live", "Wind (live) km/h", LiveMetric::WindSpeed, Axis::Primary),
            history("windspeed_history", "Wind (history) km/h", "windspeed", Axis::Primary),
            live("winddir_live", "Dir (live) °", LiveMetric::WindDirection, Axis::Secondary),
            history("winddir_history", "Dir (history) °", "winddir", Axis::Secondary),
        ],
    },
    ChartSpec {
        group: ChartGroup::Precipitation,
        title: "Rain",
        series: &[
            history("rainrate", "rainrate (mm/h)", "rainrate_mm", Axis::Primary),
            history("yearly", "yearly (mm)", "yearly_mm", Axis::Primary),
            hidden(history("event", "event (mm)", "event_mm", Axis::Primary)),
            hidden(history("hourly", "hourly (mm)", "hourly_mm", Axis::Primary)),
            hidden(history("last24h", "last24h (mm)", "last24h_mm", Axis::Primary)),
            hidden(history("daily", "daily (mm)", "daily_mm", Axis::Primary)),
            hidden(history("weekly", "weekly (mm)", "weekly_mm", Axis::Primary)),
            hidden(history("monthly", "monthly (mm)", "monthly_mm", Axis::Primary)),
        ],
    },
    ChartSpec {
        group: ChartGroup::SolarUv,
        title: "Solar & UV",
        series: &[
            live("solar_live", "Solar (live) W/m²", LiveMetric::SolarRadiation, Axis::Primary),
            live("uv_live", "UV (live)", LiveMetric::Uv, Axis::Secondary),
            history("uv_history", "UV (history)", "uv", Axis::Secondary),
        ],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainField {
    Rate,
    Event,
    Hourly,
    Last24h,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RainField {
    pub fn value(&self, rain: &RainTotals) -> f64 {
        match self {
            RainField::Rate => rain.rate,
            RainField::Event => rain.event,
            RainField::Hourly => rain.hourly,
            RainField::Last24h => rain.last_24h,
            RainField::Daily => rain.daily,
            RainField::Weekly => rain.weekly,
            RainField::Monthly => rain.monthly,
            RainField::Yearly => rain.yearly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSource {
    Metric(Metric),
    Rain(RainField),
}

#[derive(Debug, Clone, Copy)]
pub struct TileSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub unit: &'static str,
    pub precision: i32,
    pub source: TileSource,
}

const fn metric_tile(
    id: &'static str,
    title: &'static str,
    unit: &'static str,
    precision: i32,
    metric: Metric,
) -> TileSpec {
    TileSpec {
        id,
        title,
        unit,
        precision,
        source: TileSource::Metric(metric),
    }
}

const fn rain_tile(id: &'static str, title: &'static str, unit: &'static str, field: RainField) -> TileSpec {
    TileSpec {
        id,
        title,
        unit,
        precision: 2,
        source: TileSource::Rain(field),
    }
}

pub const TILES: [TileSpec; 15] = [
    metric_tile("temperature", "Temperature", "°C", 1, Metric::Temperature),
    metric_tile("humidity", "Humidity", "%", 0, Metric::Humidity),
    metric_tile("windspeed", "Wind", "km/h", 1, Metric::WindSpeed),
    metric_tile("winddir", "Wind direction", "°", 0, Metric::WindDirection),
    metric_tile("pressure", "Pressure", "hPa", 1, Metric::Pressure),
    metric_tile("solarradiation", "Solar radiation", "W/m²", 0, Metric::SolarRadiation),
    metric_tile("uv", "UV index", "", 1, Metric::Uv),
    rain_tile("rainrate", "Rain rate", "mm/h", RainField::Rate),
    rain_tile("eventrain", "Event rain", "mm", RainField::Event),
    rain_tile("hourlyrain", "Hourly rain", "mm", RainField::Hourly),
    rain_tile("last24hrain", "Last 24h rain", "mm", RainField::Last24h),
    rain_tile("dailyrain", "Daily rain", "mm", RainField::Daily),
    rain_tile("weeklyrain", "Weekly rain", "mm", RainField::Weekly),
    rain_tile("monthlyrain", "Monthly rain", "mm", RainField::Monthly),
    rain_tile("yearlyrain", "Yearly rain", "mm", RainField::Yearly),
];
