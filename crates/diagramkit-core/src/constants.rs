//! Engine-wide default constants.
//!
//! Every value here is only a default: hosts override them through the
//! settings crate and `EngineConfig`.

/// Tolerance used when comparing measured bounds to model bounds.
pub const DEFAULT_BOUNDS_TOLERANCE: f64 = 1e-3;

/// Wheel zoom sensitivity: the zoom factor of one wheel event is
/// `exp(-delta_y * sensitivity)`.
pub const DEFAULT_WHEEL_ZOOM_SENSITIVITY: f64 = 0.005;

/// Duration of animated viewport transitions in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 250;

/// Maximum number of undoable entries kept in history (0 = unbounded).
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Padding fraction kept around content by fit-to-screen.
pub const DEFAULT_FIT_PADDING: f64 = 0.05;

/// Smallest zoom level a viewport may reach.
pub const MIN_ZOOM: f64 = 1e-3;

/// Largest zoom level a viewport may reach.
pub const MAX_ZOOM: f64 = 1e3;
