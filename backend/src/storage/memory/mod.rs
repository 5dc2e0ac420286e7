//! In-memory storage backend.
//!
//! Data lives for the lifetime of the process. Full scans are used for every
//! filter; there are no secondary indices and no cascading deletes.

pub mod connection;
pub mod child_repository;
pub mod sleep_record_repository;
pub mod sleep_prediction_repository;
pub mod user_repository;

pub use connection::MemoryConnection;
pub use child_repository::MemoryChildRepository;
pub use sleep_record_repository::MemorySleepRecordRepository;
pub use sleep_prediction_repository::MemorySleepPredictionRepository;
pub use user_repository::MemoryUserRepository;
