//! # Domain Layer
//!
//! Business rules for the sleep tracker, independent of HTTP and of the
//! storage backend.
//!
//! ## Services
//!
//! - **ChildService**: child profiles and their validation
//! - **SleepRecordService**: starting, ending and rating sleep sessions
//! - **PredictionService**: cached next-sleep predictions
//!
//! Services are generic over [`crate::storage::Connection`] and are cheap to
//! clone; each clone shares the same underlying store.

pub mod child_service;
pub mod commands;
pub mod errors;
pub mod models;
pub mod prediction;
pub mod prediction_service;
pub mod sleep_record_service;

pub use child_service::ChildService;
pub use errors::{DomainError, DomainResult};
pub use prediction_service::PredictionService;
pub use sleep_record_service::SleepRecordService;
