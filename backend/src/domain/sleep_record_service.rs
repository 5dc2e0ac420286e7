//! Sleep record domain logic.
//!
//! ## Business Rules
//!
//! - A finished session must end strictly after it started
//! - A session flagged active cannot carry an end time
//! - New records are active unless an end time is supplied
//! - Setting an end time without an explicit `is_active` ends the session
//! - At most one active session per child is expected but **not enforced**;
//!   starting a second one is logged and allowed

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::sleep_record::{CreateSleepRecordCommand, UpdateSleepRecordCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::sleep_record::{NewSleepRecord, SleepRecord};
use crate::storage::{ChildStorage, Connection, SleepRecordStorage};

/// Service for recording and querying sleep sessions
#[derive(Clone)]
pub struct SleepRecordService<C: Connection> {
    child_repository: C::ChildRepository,
    sleep_record_repository: C::SleepRecordRepository,
}

impl<C: Connection> SleepRecordService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            child_repository: connection.create_child_repository(),
            sleep_record_repository: connection.create_sleep_record_repository(),
        }
    }

    /// Record a new sleep session for an existing child
    pub async fn create_sleep_record(&self, command: CreateSleepRecordCommand) -> DomainResult<SleepRecord> {
        info!(
            "Creating sleep record for child {} starting at {}",
            command.child_id, command.start_time
        );

        self.ensure_child_exists(command.child_id).await?;

        let is_active = command.is_active.unwrap_or(command.end_time.is_none());
        validate_session(command.start_time, command.end_time, is_active)?;

        if is_active {
            if let Some(existing) = self
                .sleep_record_repository
                .get_active_sleep_record(command.child_id)
                .await?
            {
                warn!(
                    "Child {} already has active sleep record {}; starting another",
                    command.child_id, existing.id
                );
            }
        }

        let record = self
            .sleep_record_repository
            .store_sleep_record(NewSleepRecord {
                child_id: command.child_id,
                start_time: command.start_time,
                end_time: command.end_time,
                is_active,
                quality: command.quality,
            })
            .await?;

        Ok(record)
    }

    /// All sleep records for a child, most recent first
    pub async fn list_sleep_records(&self, child_id: i64) -> DomainResult<Vec<SleepRecord>> {
        self.ensure_child_exists(child_id).await?;
        Ok(self.sleep_record_repository.list_sleep_records(child_id).await?)
    }

    /// The child's running session, if any
    pub async fn get_active_sleep_record(&self, child_id: i64) -> DomainResult<Option<SleepRecord>> {
        self.ensure_child_exists(child_id).await?;
        Ok(self
            .sleep_record_repository
            .get_active_sleep_record(child_id)
            .await?)
    }

    /// Merge the provided fields into an existing record
    pub async fn update_sleep_record(
        &self,
        record_id: i64,
        command: UpdateSleepRecordCommand,
    ) -> DomainResult<SleepRecord> {
        info!("Updating sleep record: {}", record_id);

        let mut record = self
            .sleep_record_repository
            .get_sleep_record(record_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Sleep record not found: {}", record_id)))?;

        if let Some(end_time) = command.end_time {
            record.end_time = Some(end_time);
            if command.is_active.is_none() {
                record.is_active = false;
            }
        }
        if let Some(is_active) = command.is_active {
            record.is_active = is_active;
        }
        if let Some(quality) = command.quality {
            record.quality = Some(quality);
        }

        validate_session(record.start_time, record.end_time, record.is_active)?;

        if !self.sleep_record_repository.update_sleep_record(&record).await? {
            return Err(DomainError::not_found(format!("Sleep record not found: {}", record_id)));
        }

        info!(
            "Updated sleep record {} (active: {}, quality: {:?})",
            record.id, record.is_active, record.quality
        );
        Ok(record)
    }

    async fn ensure_child_exists(&self, child_id: i64) -> DomainResult<()> {
        if self.child_repository.get_child(child_id).await?.is_none() {
            warn!("Child not found: {}", child_id);
            return Err(DomainError::not_found(format!("Child not found: {}", child_id)));
        }
        Ok(())
    }
}

fn validate_session(
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    is_active: bool,
) -> DomainResult<()> {
    if let Some(end_time) = end_time {
        if end_time <= start_time {
            return Err(DomainError::validation("End time must be after start time"));
        }
        if is_active {
            return Err(DomainError::validation(
                "An active sleep session cannot have an end time",
            ));
        }
    }
    Ok(())
}
