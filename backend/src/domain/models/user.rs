//! backend/src/domain/models/user.rs

use serde::{Deserialize, Serialize};

/// Account record. Stored, but nothing authenticates against it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}
