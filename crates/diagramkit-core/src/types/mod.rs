//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Type aliases for `Rc<RefCell<T>>` handles and listener maps.

pub mod aliases;

pub use aliases::*;
