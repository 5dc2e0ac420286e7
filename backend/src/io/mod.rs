//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services.
//!
//! Requests arrive as the JSON DTOs from the `shared` crate, are mapped to
//! domain commands, and domain results are mapped back to DTOs. Domain errors
//! become status codes here and nowhere else.

pub mod rest;

pub use rest::*;
