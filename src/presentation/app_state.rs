// Application state for HTTP handlers
use crate::domain::dashboard::Dashboard;
use crate::presentation::publisher::DashboardReceiver;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboards: DashboardReceiver,
}

impl AppState {
    pub fn latest(&self) -> Option<Arc<Dashboard>> {
        self.dashboards.borrow().clone()
    }
}
