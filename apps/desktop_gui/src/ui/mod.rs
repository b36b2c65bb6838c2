//! UI layer for the check-in window: app shell and the egui-backed surface.

pub mod app;
pub mod surface;

pub use app::{AppPaths, CheckInApp, StartupConfig};
