// HTTP station client - Talks to the latest-reading and history endpoints
use crate::application::station_source::{FetchError, StationSource};
use crate::domain::snapshot::{Snapshot, coerce_number};
use crate::domain::telemetry::{HistorySeries, TimeSeriesPoint};
use crate::infrastructure::config::StationSettings;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct HttpStationClient {
    client: reqwest::Client,
    latest_url: String,
    history_url: String,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

impl HttpStationClient {
    pub fn new(settings: &StationSettings) -> anyhow::Result<Self> {
        // Every request must reach the origin, never an intermediary cache.
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.request_timeout())
            .build()
            .context("Failed to build station HTTP client")?;

        Ok(Self {
            client,
            latest_url: settings.latest_url(),
            history_url: settings.history_url(),
        })
    }

    async fn get_json(&self, request: reqwest::RequestBuilder) -> Result<Value, FetchError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Network(format!(
                "endpoint returned status {}: {}",
                status, body
            )));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

#[async_trait]
impl StationSource for HttpStationClient {
    async fn latest(&self) -> Result<Snapshot, FetchError> {
        let body = self.get_json(self.client.get(&self.latest_url)).await?;
        let received_at = chrono::Utc::now().timestamp();

        Snapshot::from_value(&body, received_at)
            .ok_or_else(|| FetchError::Parse("latest reading is not a JSON object".to_string()))
    }

    async fn history(&self, window_hours: u32) -> Result<HistorySeries, FetchError> {
        let request = self
            .client
            .get(&self.history_url)
            .query(&[("hours", window_hours)]);
        let body = self.get_json(request).await?;

        parse_history(&body)
    }
}

/// Parse `{ key: [[ts, value], ...] }`.
///
/// Rows shorter than two cells are dropped and non-numeric cells read as zero;
/// only a non-object body is an error.
fn parse_history(body: &Value) -> Result<HistorySeries, FetchError> {
    let object = body
        .as_object()
        .ok_or_else(|| FetchError::Parse("history is not a JSON object".to_string()))?;

    let mut series = BTreeMap::new();
    for (key, rows) in object {
        let Some(rows) = rows.as_array() else {
            tracing::debug!("Skipping history series {} - not a list", key);
            continue;
        };

        let points: Vec<TimeSeriesPoint> = rows
            .iter()
            .filter_map(Value::as_array)
            .filter(|row| row.len() >= 2)
            .map(|row| TimeSeriesPoint::new(coerce_number(&row[0]) as i64, coerce_number(&row[1])))
            .collect();

        series.insert(key.clone(), points);
    }

    Ok(HistorySeries::new(series))
}
