//! Runtime tuning for the engine.

use std::time::Duration;

use diagramkit_core::constants::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_BOUNDS_TOLERANCE, DEFAULT_FIT_PADDING,
    DEFAULT_HISTORY_DEPTH, DEFAULT_WHEEL_ZOOM_SENSITIVITY,
};

/// Values the engine reads at construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Tolerance for comparing measured and model bounds.
    pub bounds_tolerance: f64,
    /// Wheel zoom factor is `exp(-delta_y * wheel_zoom_sensitivity)`.
    pub wheel_zoom_sensitivity: f64,
    pub animation_duration: Duration,
    /// Maximum undoable entries; 0 keeps everything.
    pub history_depth: usize,
    /// Default padding fraction for fit-to-screen.
    pub fit_padding: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bounds_tolerance: DEFAULT_BOUNDS_TOLERANCE,
            wheel_zoom_sensitivity: DEFAULT_WHEEL_ZOOM_SENSITIVITY,
            animation_duration: Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS),
            history_depth: DEFAULT_HISTORY_DEPTH,
            fit_padding: DEFAULT_FIT_PADDING,
        }
    }
}
