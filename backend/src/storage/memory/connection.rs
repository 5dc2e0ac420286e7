use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use super::{
    MemoryChildRepository, MemorySleepPredictionRepository, MemorySleepRecordRepository,
    MemoryUserRepository,
};
use crate::domain::models::child::Child;
use crate::domain::models::sleep_prediction::SleepPrediction;
use crate::domain::models::sleep_record::SleepRecord;
use crate::domain::models::user::User;
use crate::storage::traits::Connection;

/// Auto-increment id generator. Ids start at 1 and are never reused.
#[derive(Debug)]
pub(crate) struct IdSequence {
    next: i64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    pub(crate) fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// One map per entity kind, each with its own id sequence.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: BTreeMap<i64, User>,
    pub(crate) user_ids: IdSequence,
    pub(crate) children: BTreeMap<i64, Child>,
    pub(crate) child_ids: IdSequence,
    pub(crate) sleep_records: BTreeMap<i64, SleepRecord>,
    pub(crate) sleep_record_ids: IdSequence,
    pub(crate) predictions: BTreeMap<i64, SleepPrediction>,
    pub(crate) prediction_ids: IdSequence,
}

/// MemoryConnection owns the process-lifetime store shared by all repositories.
///
/// Cloning is cheap and every clone sees the same tables. The lock is only
/// held for the duration of a synchronous map operation.
#[derive(Clone, Default)]
pub struct MemoryConnection {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        debug!("Creating in-memory store");
        Self::default()
    }

    pub(crate) fn with_tables<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> Result<R> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| anyhow!("In-memory store lock poisoned"))?;
        Ok(f(&mut tables))
    }
}

impl Connection for MemoryConnection {
    type UserRepository = MemoryUserRepository;
    type ChildRepository = MemoryChildRepository;
    type SleepRecordRepository = MemorySleepRecordRepository;
    type SleepPredictionRepository = MemorySleepPredictionRepository;

    fn create_user_repository(&self) -> Self::UserRepository {
        MemoryUserRepository::new(self.clone())
    }

    fn create_child_repository(&self) -> Self::ChildRepository {
        MemoryChildRepository::new(self.clone())
    }

    fn create_sleep_record_repository(&self) -> Self::SleepRecordRepository {
        MemorySleepRecordRepository::new(self.clone())
    }

    fn create_sleep_prediction_repository(&self) -> Self::SleepPredictionRepository {
        MemorySleepPredictionRepository::new(self.clone())
    }
}
