// Refresh loop - Drives one refresh cycle per interval and hands the result to the sink
use crate::application::chart_sink::{ChartSink, RedrawMode};
use crate::application::dashboard_service::DashboardService;
use std::sync::Arc;
use std::time::Duration;

pub struct RefreshLoop {
    service: DashboardService,
    sink: Arc<dyn ChartSink>,
    interval: Duration,
    completed: u64,
    failed: u64,
}

impl RefreshLoop {
    pub fn new(service: DashboardService, sink: Arc<dyn ChartSink>, interval: Duration) -> Self {
        Self {
            service,
            sink,
            interval,
            completed: 0,
            failed: 0,
        }
    }

    /// Run one cycle. Errors are logged here and never escape; on failure the
    /// sink keeps whatever it last drew.
    pub async fn tick(&mut self) -> bool {
        match self.service.refresh_cycle().await {
            Ok(dashboard) => {
                self.completed += 1;
                self.sink.redraw(Arc::new(dashboard), RedrawMode::Immediate);
                true
            }
            Err(e) => {
                self.failed += 1;
                tracing::warn!(
                    "Refresh cycle failed ({} failed, {} completed): {}",
                    self.failed,
                    self.completed,
                    e
                );
                false
            }
        }
    }

    /// Tick, then sleep for the interval, forever. The next tick is only armed
    /// once the current one has finished.
    pub async fn run(mut self) {
        tracing::info!("Refreshing every {:?}", self.interval);
        loop {
            self.tick().await;
            tokio::time::sleep(self.interval).await;
        }
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }
}
