// Station snapshot domain model
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const UNKNOWN_TIME: &str = "--:--:--";
const UNKNOWN_PLACE: &str = "Unknown place";

const CARDINALS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Scalar metrics reported by the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Humidity,
    WindSpeed,
    WindDirection,
    Pressure,
    SolarRadiation,
    Uv,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::WindSpeed,
        Metric::WindDirection,
        Metric::Pressure,
        Metric::SolarRadiation,
        Metric::Uv,
    ];

    /// Field name used by the latest-reading and history endpoints.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::WindSpeed => "windspeed",
            Metric::WindDirection => "winddir",
            Metric::Pressure => "pressure",
            Metric::SolarRadiation => "solarradiation",
            Metric::Uv => "uv",
        }
    }
}

/// Rain accumulations in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RainTotals {
    pub rate: f64,
    pub event: f64,
    pub hourly: f64,
    pub last_24h: f64,
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub yearly: f64,
}

impl RainTotals {
    fn from_fields(fields: Option<&Map<String, Value>>) -> Self {
        let Some(fields) = fields else {
            return Self::default();
        };

        Self {
            rate: number(fields, "rainrate"),
            event: number(fields, "eventrain"),
            hourly: number(fields, "hourlyrain"),
            last_24h: number(fields, "last24hrain"),
            daily: number(fields, "dailyrain"),
            weekly: number(fields, "weeklyrain"),
            monthly: number(fields, "monthlyrain"),
            yearly: number(fields, "yearlyrain"),
        }
    }
}

/// One reading of every tracked metric.
///
/// Built once from the raw endpoint payload; all numeric coercion happens in
/// [`Snapshot::from_value`] so the rest of the pipeline sees plain `f64`s.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub received_at: i64,
    pub time: String,
    pub location: String,
    pub location_name: String,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub wind_cardinal: String,
    pub pressure: f64,
    pub solar_radiation: f64,
    pub uv: f64,
    pub rain: RainTotals,
    trend: BTreeMap<String, String>,
}

impl Snapshot {
    /// Parse a latest-reading payload.
    ///
    /// Returns `None` only when the payload is not a JSON object. Missing or
    /// non-numeric fields default to zero.
    pub fn from_value(body: &Value, received_at: i64) -> Option<Self> {
        let fields = body.as_object()?;

        let wind_direction = number(fields, "winddir");
        let wind_cardinal =
            text(fields, "windcard").unwrap_or_else(|| degrees_to_cardinal(wind_direction).to_string());

        let trend: BTreeMap<String, String> = fields
            .get("trend")
            .and_then(Value::as_object)
            .map(|tags| {
                tags.iter()
                    .filter_map(|(k, v)| v.as_str().map(|tag| (k.clone(), tag.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            received_at,
            time: text(fields, "time").unwrap_or_else(|| UNKNOWN_TIME.to_string()),
            location: text(fields, "location").unwrap_or_default(),
            location_name: text(fields, "location_name").unwrap_or_else(|| UNKNOWN_PLACE.to_string()),
            temperature: number(fields, "temperature"),
            humidity: number(fields, "humidity"),
            wind_speed: number(fields, "windspeed"),
            wind_direction,
            wind_cardinal,
            pressure: number(fields, "pressure"),
            solar_radiation: number(fields, "solarradiation"),
            uv: number(fields, "uv"),
            rain: RainTotals::from_fields(fields.get("rain_mm").and_then(Value::as_object)),
            trend,
        })
    }

    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::WindSpeed => self.wind_speed,
            Metric::WindDirection => self.wind_direction,
            Metric::Pressure => self.pressure,
            Metric::SolarRadiation => self.solar_radiation,
            Metric::Uv => self.uv,
        }
    }

    /// Raw trend signal as sent by the station, if any.
    pub fn trend_signal(&self, metric: Metric) -> Option<&str> {
        self.trend.get(metric.key()).map(String::as_str)
    }
}

/// Coerce a JSON cell to a finite number, falling back to zero.
pub fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// 8-point compass label for a bearing in degrees, matching the station's
/// own `windcard` labels.
pub fn degrees_to_cardinal(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return "--";
    }
    let index = ((degrees + 22.5) / 45.0).floor() as i64;
    CARDINALS[index.rem_euclid(8) as usize]
}

fn number(fields: &Map<String, Value>, key: &str) -> f64 {
    fields.get(key).map(coerce_number).unwrap_or(0.0)
}

fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_full_payload() {
        let body = json!({
            "time": "14:05:10",
            "temperature": 21.4,
            "humidity": 63,
            "windspeed": 12.9,
            "winddir": 200.0,
            "windcard": "SSW",
            "pressure": 1009.5,
            "solarradiation": 410.2,
            "uv": 3.1,
            "location": " 8FHJVFRR+3W ",
            "location_name": "Lisbon",
            "trend": { "temperature": "up", "pressure": "down" },
            "rain_mm": {
                "rainrate": 1.2, "eventrain": 3.0, "hourlyrain": 0.5, "last24hrain": 4.4,
                "dailyrain": 2.0, "weeklyrain": 10.0, "monthlyrain": 30.5, "yearlyrain": 420.0
            }
        });

        let snapshot = Snapshot::from_value(&body, 1_700_000_000).unwrap();
        assert_eq!(snapshot.received_at, 1_700_000_000);
        assert_eq!(snapshot.time, "14:05:10");
        assert_eq!(snapshot.location, "8FHJVFRR+3W");
        assert_eq!(snapshot.location_name, "Lisbon");
        assert_eq!(snapshot.value(Metric::Humidity), 63.0);
        assert_eq!(snapshot.wind_cardinal, "SSW");
        assert_eq!(snapshot.rain.yearly, 420.0);
        assert_eq!(snapshot.rain.last_24h, 4.4);
        assert_eq!(snapshot.trend_signal(Metric::Temperature), Some("up"));
        assert_eq!(snapshot.trend_signal(Metric::Uv), None);
    }

    #[test]
    fn test_partial_payload_defaults_to_zero() {
        let body = json!({
            "temperature": "18.5",
            "humidity": null,
            "windspeed": "fast",
            "uv": "NaN",
            "rain_mm": { "dailyrain": 1.5 }
        });

        let snapshot = Snapshot::from_value(&body, 0).unwrap();
        assert_eq!(snapshot.temperature, 18.5);
        assert_eq!(snapshot.humidity, 0.0);
        assert_eq!(snapshot.wind_speed, 0.0);
        assert_eq!(snapshot.uv, 0.0);
        assert_eq!(snapshot.pressure, 0.0);
        assert_eq!(snapshot.rain.daily, 1.5);
        assert_eq!(snapshot.rain.yearly, 0.0);
        assert_eq!(snapshot.time, "--:--:--");
        assert_eq!(snapshot.location_name, "Unknown place");
        assert_eq!(snapshot.wind_cardinal, "N");
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(Snapshot::from_value(&json!([1, 2, 3]), 0).is_none());
        assert!(Snapshot::from_value(&json!("latest"), 0).is_none());
    }

    #[test]
    fn test_cardinal_from_degrees() {
        assert_eq!(degrees_to_cardinal(0.0), "N");
        assert_eq!(degrees_to_cardinal(20.0), "N");
        assert_eq!(degrees_to_cardinal(22.5), "NE");
        assert_eq!(degrees_to_cardinal(60.0), "NE");
        assert_eq!(degrees_to_cardinal(90.0), "E");
        assert_eq!(degrees_to_cardinal(200.0), "S");
        assert_eq!(degrees_to_cardinal(337.5), "N");
        assert_eq!(degrees_to_cardinal(350.0), "N");
        assert_eq!(degrees_to_cardinal(-90.0), "W");
        assert_eq!(degrees_to_cardinal(f64::NAN), "--");
    }
}
