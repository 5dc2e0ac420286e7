//! # Storage Module
//!
//! Handles all data persistence for the sleep tracker.
//!
//! The domain layer only talks to the traits in [`traits`]; the concrete
//! backend is chosen once at startup through a [`Connection`]. The only
//! backend today is the process-lifetime in-memory store in [`memory`]:
//! no durability, no transactions, and filters are full scans.

pub mod memory;
pub mod traits;

pub use memory::MemoryConnection;
pub use traits::{
    ChildStorage, Connection, SleepPredictionStorage, SleepRecordStorage, UserStorage,
};
