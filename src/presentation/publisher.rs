// Dataset publisher - Latest dashboard shared with the HTTP handlers
use crate::application::chart_sink::{ChartSink, RedrawMode};
use crate::domain::dashboard::Dashboard;
use std::sync::Arc;
use tokio::sync::watch;

pub type DashboardReceiver = watch::Receiver<Option<Arc<Dashboard>>>;

pub struct DashboardPublisher {
    sender: watch::Sender<Option<Arc<Dashboard>>>,
}

impl DashboardPublisher {
    /// Publisher plus a receiver that starts out empty.
    pub fn channel() -> (Self, DashboardReceiver) {
        let (sender, receiver) = watch::channel(None);
        (Self { sender }, receiver)
    }
}

impl ChartSink for DashboardPublisher {
    fn redraw(&self, dashboard: Arc<Dashboard>, mode: RedrawMode) {
        match mode {
            RedrawMode::Immediate => {
                self.sender.send_replace(Some(dashboard));
            }
        }
    }
}
