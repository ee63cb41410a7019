//! Aggregation core of a weather-station dashboard.
//!
//! Each refresh cycle pulls the latest station reading, appends it to bounded
//! live windows, merges in the cached server-side history, classifies every
//! metric and assembles per-chart datasets for the rendering layer.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
