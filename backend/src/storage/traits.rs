//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::child::{Child, NewChild};
use crate::domain::models::sleep_prediction::{NewSleepPrediction, SleepPrediction};
use crate::domain::models::sleep_record::{NewSleepRecord, SleepRecord};
use crate::domain::models::user::{NewUser, User};

/// Trait defining the interface for user storage operations
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Store a new user, assigning the next user id
    async fn store_user(&self, user: NewUser) -> Result<User>;

    async fn get_user(&self, user_id: i64) -> Result<Option<User>>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
}

/// Trait defining the interface for child storage operations
#[async_trait]
pub trait ChildStorage: Send + Sync {
    /// Store a new child, assigning the next child id
    async fn store_child(&self, child: NewChild) -> Result<Child>;

    /// Retrieve a specific child by ID
    async fn get_child(&self, child_id: i64) -> Result<Option<Child>>;

    /// List all children in id order
    async fn list_children(&self) -> Result<Vec<Child>>;

    /// Replace an existing child. Returns false if the id is unknown.
    async fn update_child(&self, child: &Child) -> Result<bool>;

    /// Delete a child by ID. Returns false if the id is unknown.
    /// Sleep records and predictions owned by the child are left in place.
    async fn delete_child(&self, child_id: i64) -> Result<bool>;
}

/// Trait defining the interface for sleep record storage operations
#[async_trait]
pub trait SleepRecordStorage: Send + Sync {
    /// Store a new sleep record, assigning the next record id
    async fn store_sleep_record(&self, record: NewSleepRecord) -> Result<SleepRecord>;

    async fn get_sleep_record(&self, record_id: i64) -> Result<Option<SleepRecord>>;

    /// List a child's sleep records, most recent start time first
    async fn list_sleep_records(&self, child_id: i64) -> Result<Vec<SleepRecord>>;

    /// First record for the child with `is_active` set, scanning in id order.
    /// Nothing guarantees there is at most one.
    async fn get_active_sleep_record(&self, child_id: i64) -> Result<Option<SleepRecord>>;

    /// Replace an existing record. Returns false if the id is unknown.
    async fn update_sleep_record(&self, record: &SleepRecord) -> Result<bool>;
}

/// Trait defining the interface for sleep prediction storage operations
#[async_trait]
pub trait SleepPredictionStorage: Send + Sync {
    /// Store a new prediction, assigning the next prediction id
    async fn store_prediction(&self, prediction: NewSleepPrediction) -> Result<SleepPrediction>;

    /// The child's most recently created prediction
    async fn get_latest_prediction(&self, child_id: i64) -> Result<Option<SleepPrediction>>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides
/// factory methods for creating repositories, so the domain layer never
/// names a concrete backend.
pub trait Connection: Send + Sync + Clone {
    type UserRepository: UserStorage + Clone;
    type ChildRepository: ChildStorage + Clone;
    type SleepRecordRepository: SleepRecordStorage + Clone;
    type SleepPredictionRepository: SleepPredictionStorage + Clone;

    fn create_user_repository(&self) -> Self::UserRepository;

    fn create_child_repository(&self) -> Self::ChildRepository;

    fn create_sleep_record_repository(&self) -> Self::SleepRecordRepository;

    fn create_sleep_prediction_repository(&self) -> Self::SleepPredictionRepository;
}
