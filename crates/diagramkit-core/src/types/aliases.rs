//! Type aliases for commonly used shared-handle types.
//!
//! The engine runs single-threaded and frame-driven, so most shared state is
//! an `Rc<RefCell<T>>` handle passed to the collaborators that need it. The
//! action protocol is the exception: inbound messages may arrive on a
//! transport thread, so its listener tables use `parking_lot` locks.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diagramkit_core::types::*;
//!
//! // Instead of: Rc<RefCell<DiagramModel>>
//! let model: Shared<DiagramModel> = shared(DiagramModel::new(root));
//! ```

use parking_lot::RwLock;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

// =============================================================================
// SINGLE-THREADED SHARED TYPES (Rc<RefCell<T>>)
// =============================================================================

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Used for the model, the command stack and the frame queue: every
/// collaborator holds a handle and borrows only for the duration of one
/// mutation, so there is never more than one active mutator.
pub type Shared<T> = Rc<RefCell<T>>;

// =============================================================================
// THREAD-SAFE SHARED TYPES (Arc<RwLock<T>>)
// =============================================================================

/// A thread-safe reader-writer hash map.
///
/// Used for listener tables keyed by subscription id.
pub type ThreadSafeRwMap<K, V> = Arc<RwLock<HashMap<K, V>>>;

// =============================================================================
// CONSTRUCTOR HELPERS
// =============================================================================

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Create a new empty `ThreadSafeRwMap<K, V>`.
#[inline]
pub fn thread_safe_rw_map<K, V>() -> ThreadSafeRwMap<K, V> {
    Arc::new(RwLock::new(HashMap::new()))
}
