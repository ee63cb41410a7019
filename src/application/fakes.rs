// In-memory station and sink used by application tests
use crate::application::chart_sink::{ChartSink, RedrawMode};
use crate::application::station_source::{FetchError, StationSource};
use crate::domain::dashboard::Dashboard;
use crate::domain::snapshot::Snapshot;
use crate::domain::telemetry::{HistorySeries, TimeSeriesPoint};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const HISTORY_KEYS: [&str; 13] = [
    "temperature",
    "humidity",
    "windspeed",
    "winddir",
    "rainrate_mm",
    "yearly_mm",
    "event_mm",
    "hourly_mm",
    "last24h_mm",
    "daily_mm",
    "weekly_mm",
    "monthly_mm",
    "uv",
];

/// Receive time stamped on every reading the fake hands out.
pub const RECEIVED_AT: i64 = 990;

pub fn sample_reading() -> Value {
    json!({
        "time": "12:00:00",
        "temperature": 22.5,
        "humidity": 61,
        "windspeed": 45.0,
        "winddir": 270.0,
        "windcard": "W",
        "pressure": 1050.0,
        "solarradiation": 320.0,
        "uv": 4.2,
        "location": "8FHJVFRR+3W",
        "location_name": "Porto",
        "trend": { "temperature": "up", "windspeed": "down" },
        "rain_mm": { "rainrate": 0.4, "dailyrain": 2.2, "yearlyrain": 512.0 }
    })
}

/// Two points per series, one minute apart.
pub fn sample_history() -> HistorySeries {
    let series: BTreeMap<String, Vec<TimeSeriesPoint>> = HISTORY_KEYS
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let points = vec![
                TimeSeriesPoint::new(600, i as f64),
                TimeSeriesPoint::new(660, i as f64 + 0.5),
            ];
            (key.to_string(), points)
        })
        .collect();
    HistorySeries::new(series)
}

pub struct FakeStation {
    reading: Mutex<Value>,
    history: HistorySeries,
    history_delay: Duration,
    fail_latest: AtomicBool,
    fail_history: AtomicBool,
    latest_calls: AtomicUsize,
    history_calls: AtomicUsize,
    last_window: AtomicU32,
}

impl FakeStation {
    pub fn new() -> Self {
        Self {
            reading: Mutex::new(sample_reading()),
            history: sample_history(),
            history_delay: Duration::ZERO,
            fail_latest: AtomicBool::new(false),
            fail_history: AtomicBool::new(false),
            latest_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
            last_window: AtomicU32::new(0),
        }
    }

    pub fn with_history_delay(mut self, delay: Duration) -> Self {
        self.history_delay = delay;
        self
    }

    pub fn set_reading(&self, reading: Value) {
        *self.reading.lock().unwrap() = reading;
    }

    pub fn fail_latest(&self, fail: bool) {
        self.fail_latest.store(fail, Ordering::SeqCst);
    }

    pub fn fail_history(&self, fail: bool) {
        self.fail_history.store(fail, Ordering::SeqCst);
    }

    pub fn latest_calls(&self) -> usize {
        self.latest_calls.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    pub fn last_window(&self) -> Option<u32> {
        match self.last_window.load(Ordering::SeqCst) {
            0 => None,
            hours => Some(hours),
        }
    }
}

#[async_trait]
impl StationSource for FakeStation {
    async fn latest(&self) -> Result<Snapshot, FetchError> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_latest.load(Ordering::SeqCst) {
            return Err(FetchError::Network("connection refused".to_string()));
        }
        let reading = self.reading.lock().unwrap().clone();
        Snapshot::from_value(&reading, RECEIVED_AT)
            .ok_or_else(|| FetchError::Parse("expected a JSON object".to_string()))
    }

    async fn history(&self, window_hours: u32) -> Result<HistorySeries, FetchError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.last_window.store(window_hours, Ordering::SeqCst);
        if !self.history_delay.is_zero() {
            tokio::time::sleep(self.history_delay).await;
        }
        if self.fail_history.load(Ordering::SeqCst) {
            return Err(FetchError::Network("history unavailable".to_string()));
        }
        Ok(self.history.clone())
    }
}

/// Sink that records every redraw it is asked for.
#[derive(Default)]
pub struct RecordingSink {
    redraws: Mutex<Vec<(Arc<Dashboard>, RedrawMode)>>,
}

impl RecordingSink {
    pub fn redraw_count(&self) -> usize {
        self.redraws.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<(Arc<Dashboard>, RedrawMode)> {
        self.redraws.lock().unwrap().last().cloned()
    }
}

impl ChartSink for RecordingSink {
    fn redraw(&self, dashboard: Arc<Dashboard>, mode: RedrawMode) {
        self.redraws.lock().unwrap().push((dashboard, mode));
    }
}
