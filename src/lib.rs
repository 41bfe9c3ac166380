//! # DiagramKit
//!
//! Engine for interactive, zoomable, pannable diagrams (for example chip
//! floorplans). Rendering is left to the host; DiagramKit owns the model,
//! the action/command pipeline with undo/redo, viewport animation, and the
//! measure-then-commit bounds loop.
//!
//! ## Architecture
//!
//! DiagramKit is organized as a workspace with multiple crates:
//!
//! 1. **diagramkit-core** - Geometry, error types, defaults, shared-handle aliases
//! 2. **diagramkit-settings** - JSON/TOML configuration and persistence
//! 3. **diagramkit-engine** - Model, actions, commands, animations, reconciliation
//! 4. **diagramkit** - Logging setup, config bridging, and the demo binary

pub use diagramkit_core::{Bounds, CodecError, Dimension, Error, ModelError, Point, Result};
pub use diagramkit_engine as engine;
pub use diagramkit_engine::{
    Action, ActionMessageHandler, BoundsMeasurer, Diagram, DiagramModel, Element, EngineConfig,
    MeasuredBounds, ModelFactory, MouseEvent, Viewport, WheelEvent,
};
pub use diagramkit_settings::{Config, SettingsPersistence};

use std::time::Duration;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Engine tuning derived from a loaded [`Config`].
pub fn engine_config(config: &Config) -> EngineConfig {
    EngineConfig {
        bounds_tolerance: config.reconciliation.tolerance,
        wheel_zoom_sensitivity: config.zoom.wheel_sensitivity,
        animation_duration: Duration::from_millis(config.animation.duration_ms),
        history_depth: config.history.max_depth,
        fit_padding: config.history.fit_padding,
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
