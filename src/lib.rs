/// Rainfall prediction client.
///
/// Collects weather features, posts them to a prediction backend and
/// renders the rain/no-rain verdict with a probability gauge.

pub mod config;
pub mod features;
pub mod form;
pub mod logging;
pub mod model;
pub mod predict;
pub mod render;
