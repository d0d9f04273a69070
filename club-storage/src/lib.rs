//! In-process storage for the club roster, finances and accounts.
//!
//! Every repository keeps its rows in a [`dashmap::DashMap`] and implements
//! [`club_core::Repository`]. Data lives for the lifetime of the process.

pub mod memory;
pub mod repositories;
pub mod store;

pub use memory::MemoryTable;
pub use repositories::*;
pub use store::*;
