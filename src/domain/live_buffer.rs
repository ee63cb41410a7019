//! Bounded per-metric windows of recent readings.

use std::collections::VecDeque;

use serde::Serialize;

use super::snapshot::{Metric, Snapshot};
use super::telemetry::TimeSeriesPoint;

/// 240 points at a 5 s cadence is about twenty minutes.
pub const DEFAULT_LIVE_CAPACITY: usize = 240;

/// Metrics that keep a client-side live window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveMetric {
    Temperature,
    Humidity,
    WindSpeed,
    WindDirection,
    SolarRadiation,
    Uv,
}

impl LiveMetric {
    pub const ALL: [LiveMetric; 6] = [
        LiveMetric::Temperature,
        LiveMetric::Humidity,
        LiveMetric::WindSpeed,
        LiveMetric::WindDirection,
        LiveMetric::SolarRadiation,
        LiveMetric::Uv,
    ];

    pub fn metric(&self) -> Metric {
        match self {
            LiveMetric::Temperature => Metric::Temperature,
            LiveMetric::Humidity => Metric::Humidity,
            LiveMetric::WindSpeed => Metric::WindSpeed,
            LiveMetric::WindDirection => Metric::WindDirection,
            LiveMetric::SolarRadiation => Metric::SolarRadiation,
            LiveMetric::Uv => Metric::Uv,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// FIFO window of at most `capacity` points.
///
/// Timestamps are kept non-decreasing: a point older than the current tail is
/// stored with the tail's timestamp instead.
#[derive(Debug, Clone)]
pub struct LiveBuffer {
    points: VecDeque<TimeSeriesPoint>,
    capacity: usize,
}

impl LiveBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn append(&mut self, point: TimeSeriesPoint) {
        let point = match self.points.back() {
            Some(tail) if point.time_s < tail.time_s => {
                tracing::debug!(
                    "Clamping out-of-order point {} to tail timestamp {}",
                    point.time_s,
                    tail.time_s
                );
                TimeSeriesPoint::new(tail.time_s, point.value)
            }
            _ => point,
        };

        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn to_vec(&self) -> Vec<TimeSeriesPoint> {
        self.points.iter().copied().collect()
    }
}

/// The six live buffers, one per [`LiveMetric`].
#[derive(Debug, Clone)]
pub struct LiveBuffers {
    buffers: [LiveBuffer; 6],
}

impl LiveBuffers {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: std::array::from_fn(|_| LiveBuffer::new(capacity)),
        }
    }

    /// Append one point per live metric, all stamped with `time_s`.
    pub fn record(&mut self, time_s: i64, snapshot: &Snapshot) {
        for metric in LiveMetric::ALL {
            let value = snapshot.value(metric.metric());
            self.buffers[metric.index()].append(TimeSeriesPoint::new(time_s, value));
        }
    }

    pub fn get(&self, metric: LiveMetric) -> &LiveBuffer {
        &self.buffers[metric.index()]
    }
}
