//! Error handling for DiagramKit
//!
//! Provides error types for the layers of the engine:
//! - Model errors (element lookup, parent/coordinate validation)
//! - Codec errors (action wire format)
//!
//! Command execution itself never fails loudly: a command whose target is
//! missing skips its effect and logs a diagnostic. These types are used at
//! the boundaries (model construction, message decoding) where a structured
//! error is caught, logged, and degraded to a no-op.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Model error type
///
/// Raised while building or querying the element arena.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// No element with the given id exists in the model
    #[error("Element '{id}' not found")]
    ElementNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// An element with the same id is already registered
    #[error("Duplicate element id '{id}'")]
    DuplicateId {
        /// The conflicting id.
        id: String,
    },

    /// The parent cannot contain the given child
    #[error("Invalid parent '{parent}' for element '{child}': {reason}")]
    InvalidParent {
        /// The parent element id.
        parent: String,
        /// The child element id.
        child: String,
        /// Why the relation was rejected.
        reason: String,
    },

    /// Element coordinates or dimensions are not usable
    #[error("Coordinates of element '{id}' are out of bounds: {reason}")]
    CoordinatesOutOfBounds {
        /// The offending element id.
        id: String,
        /// What is wrong with the coordinates.
        reason: String,
    },

    /// The element lacks a capability the operation requires
    #[error("Element '{id}' lacks the {capability} capability")]
    MissingCapability {
        /// The element id.
        id: String,
        /// The capability name.
        capability: String,
    },
}

/// Codec error type
///
/// Raised when an action message cannot be decoded or encoded.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The message is not valid JSON or does not match the action schema
    #[error("Malformed action message: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The message is a JSON value but carries no string `kind`
    #[error("Action message has no 'kind' field")]
    MissingKind,
}

/// Main error type for DiagramKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Model error
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Codec error
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a model error
    pub fn is_model_error(&self) -> bool {
        matches!(self, Error::Model(_))
    }

    /// Check if this is a codec error
    pub fn is_codec_error(&self) -> bool {
        matches!(self, Error::Codec(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
