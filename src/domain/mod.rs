// Domain layer - Station readings, live windows, classification and chart models
pub mod classification;
pub mod dashboard;
pub mod live_buffer;
pub mod snapshot;
pub mod telemetry;
