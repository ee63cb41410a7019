// Presentation layer - HTTP surface for the rendering layer
pub mod app_state;
pub mod handlers;
pub mod publisher;
