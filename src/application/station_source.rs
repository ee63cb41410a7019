// Source trait for station data access
use crate::domain::snapshot::Snapshot;
use crate::domain::telemetry::HistorySeries;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while fetching station data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete or the endpoint returned a non-success status.
    #[error("Station request failed: {0}")]
    Network(String),

    /// The response body was not in the expected shape.
    #[error("Failed to parse station response: {0}")]
    Parse(String),
}

#[async_trait]
pub trait StationSource: Send + Sync {
    /// Latest reading, fetched from the origin on every call
    async fn latest(&self) -> Result<Snapshot, FetchError>;

    /// Downsampled history covering the last `window_hours`
    async fn history(&self, window_hours: u32) -> Result<HistorySeries, FetchError>;
}
