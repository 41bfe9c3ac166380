//! # DiagramKit Core
//!
//! Core types and utilities shared by the DiagramKit crates:
//! error types, model-space geometry, engine defaults and
//! shared-handle aliases.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod types;

pub use error::{CodecError, Error, ModelError, Result};

pub use geometry::{almost_equals, Bounds, Dimension, Point};

// Re-export type aliases for convenience
pub use types::{shared, thread_safe_rw_map, Shared, ThreadSafeRwMap};
