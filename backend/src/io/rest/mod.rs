//! # REST API Interface Layer
//!
//! HTTP endpoints for the sleep tracker, all mounted under `/api`.
//!
//! - **child_apis**: child profile CRUD
//! - **sleep_record_apis**: starting, ending and rating sleep sessions
//! - **prediction_apis**: next-sleep prediction per child
//! - **logging_apis**: client log forwarding
//!
//! Handlers only translate. Validation lives in the domain services; malformed
//! JSON bodies and path ids are rejected by the extractors in [`error`].

pub mod child_apis;
pub mod error;
pub mod logging_apis;
pub mod mappers;
pub mod prediction_apis;
pub mod sleep_record_apis;

pub use error::{ApiError, ApiJson, ApiPath};
