//! Library exports for the viewer binary and integration tests.
/// Application directory helpers.
pub mod app_dirs;
/// Persistent viewer settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Shared HTTP agent.
pub mod http_client;
/// Tracing setup.
pub mod logging;
/// Report rendering pipeline.
pub mod report;
/// Result document loading and lookup.
pub mod results;
