// Severity tiers and trend tags derived from a reading
use serde::Serialize;

use super::snapshot::{Metric, Snapshot};

const PRESSURE_REFERENCE_HPA: f64 = 1013.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendTag {
    Up,
    Down,
    Same,
}

/// Ordered severity scale shared by every metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Informational,
    Notice,
    Low,
    Moderate,
    High,
    Severe,
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Below(f64),
    AtMost(f64),
}

impl Bound {
    fn matches(&self, value: f64) -> bool {
        match *self {
            Bound::Below(limit) => value < limit,
            Bound::AtMost(limit) => value <= limit,
        }
    }
}

/// Breakpoints in ascending order; a value past every bound is `Severe`.
struct Scale {
    steps: &'static [(Bound, Severity)],
}

impl Scale {
    fn tier(&self, value: f64) -> Severity {
        self.steps
            .iter()
            .find(|(bound, _)| bound.matches(value))
            .map(|(_, tier)| *tier)
            .unwrap_or(Severity::Severe)
    }
}

const TEMPERATURE: Scale = Scale {
    steps: &[
        (Bound::Below(5.0), Severity::Informational),
        (Bound::Below(10.0), Severity::Notice),
        (Bound::Below(20.0), Severity::Low),
        (Bound::Below(30.0), Severity::Moderate),
        (Bound::Below(40.0), Severity::High),
    ],
};

const WIND_SPEED: Scale = Scale {
    steps: &[
        (Bound::Below(10.0), Severity::Informational),
        (Bound::Below(30.0), Severity::Moderate),
        (Bound::Below(60.0), Severity::High),
    ],
};

const SOLAR_RADIATION: Scale = Scale {
    steps: &[
        (Bound::AtMost(0.0), Severity::Informational),
        (Bound::Below(250.0), Severity::Low),
        (Bound::Below(600.0), Severity::Moderate),
        (Bound::Below(900.0), Severity::High),
    ],
};

// Applied to |pressure - 1013|
const PRESSURE_DEVIATION: Scale = Scale {
    steps: &[
        (Bound::Below(5.0), Severity::Informational),
        (Bound::Below(15.0), Severity::Low),
        (Bound::Below(25.0), Severity::Moderate),
        (Bound::Below(40.0), Severity::High),
    ],
};

/// Normalize a station trend signal. Anything unrecognized is `Same`.
pub fn classify_trend(signal: Option<&str>) -> TrendTag {
    match signal.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("up") => TrendTag::Up,
        Some("down") => TrendTag::Down,
        _ => TrendTag::Same,
    }
}

/// Tier for `value`, or `None` for metrics without breakpoints.
pub fn classify_severity(metric: Metric, value: f64) -> Option<Severity> {
    let value = if value.is_finite() { value } else { 0.0 };

    match metric {
        Metric::Temperature => Some(TEMPERATURE.tier(value)),
        Metric::WindSpeed => Some(WIND_SPEED.tier(value)),
        Metric::SolarRadiation => Some(SOLAR_RADIATION.tier(value)),
        Metric::Pressure => Some(PRESSURE_DEVIATION.tier((value - PRESSURE_REFERENCE_HPA).abs())),
        Metric::Humidity | Metric::WindDirection | Metric::Uv => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub severity: Option<Severity>,
    pub trend: TrendTag,
}

pub fn classify(snapshot: &Snapshot, metric: Metric) -> Classification {
    Classification {
        severity: classify_severity(metric, snapshot.value(metric)),
        trend: classify_trend(snapshot.trend_signal(metric)),
    }
}
