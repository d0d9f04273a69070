//! View-layer helpers shared by list and form endpoints.
//!
//! Everything here is synchronous and owns its own state; nothing performs I/O.

pub mod filters;
pub mod form;
pub mod page_window;
pub mod pagination;
pub mod preferences;

pub use filters::*;
pub use form::*;
pub use page_window::*;
pub use pagination::*;
pub use preferences::*;
