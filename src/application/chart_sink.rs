// Hand-off point to the rendering layer
use crate::domain::dashboard::Dashboard;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawMode {
    /// Replace the datasets and redraw without animation
    Immediate,
}

pub trait ChartSink: Send + Sync {
    fn redraw(&self, dashboard: Arc<Dashboard>, mode: RedrawMode);
}
