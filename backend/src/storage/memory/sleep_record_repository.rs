use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use super::connection::MemoryConnection;
use crate::domain::models::sleep_record::{NewSleepRecord, SleepRecord};
use crate::storage::traits::SleepRecordStorage;

/// In-memory sleep record repository
#[derive(Clone)]
pub struct MemorySleepRecordRepository {
    connection: MemoryConnection,
}

impl MemorySleepRecordRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl SleepRecordStorage for MemorySleepRecordRepository {
    async fn store_sleep_record(&self, record: NewSleepRecord) -> Result<SleepRecord> {
        let stored = self.connection.with_tables(|tables| {
            let record = SleepRecord {
                id: tables.sleep_record_ids.next_id(),
                child_id: record.child_id,
                start_time: record.start_time,
                end_time: record.end_time,
                is_active: record.is_active,
                quality: record.quality,
            };
            tables.sleep_records.insert(record.id, record.clone());
            record
        })?;

        info!(
            "Stored sleep record {} for child {} (active: {})",
            stored.id, stored.child_id, stored.is_active
        );
        Ok(stored)
    }

    async fn get_sleep_record(&self, record_id: i64) -> Result<Option<SleepRecord>> {
        self.connection
            .with_tables(|tables| tables.sleep_records.get(&record_id).cloned())
    }

    async fn list_sleep_records(&self, child_id: i64) -> Result<Vec<SleepRecord>> {
        let mut records = self.connection.with_tables(|tables| {
            tables
                .sleep_records
                .values()
                .filter(|record| record.child_id == child_id)
                .cloned()
                .collect::<Vec<_>>()
        })?;

        records.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));

        debug!("Found {} sleep records for child {}", records.len(), child_id);
        Ok(records)
    }

    async fn get_active_sleep_record(&self, child_id: i64) -> Result<Option<SleepRecord>> {
        self.connection.with_tables(|tables| {
            tables
                .sleep_records
                .values()
                .find(|record| record.child_id == child_id && record.is_active)
                .cloned()
        })
    }

    async fn update_sleep_record(&self, record: &SleepRecord) -> Result<bool> {
        self.connection.with_tables(|tables| {
            match tables.sleep_records.get_mut(&record.id) {
                Some(existing) => {
                    *existing = record.clone();
                    true
                }
                None => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use shared::SleepQuality;

    fn setup_test_repo() -> MemorySleepRecordRepository {
        MemorySleepRecordRepository::new(MemoryConnection::new())
    }

    fn active_record(child_id: i64, hour: u32) -> NewSleepRecord {
        NewSleepRecord {
            child_id,
            start_time: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
            end_time: None,
            is_active: true,
            quality: None,
        }
    }

    #[tokio::test]
    async fn test_list_sleep_records_most_recent_first() {
        let repo = setup_test_repo();
        repo.store_sleep_record(active_record(1, 9)).await.unwrap();
        repo.store_sleep_record(active_record(2, 10)).await.unwrap();
        repo.store_sleep_record(active_record(1, 13)).await.unwrap();

        let records = repo.list_sleep_records(1).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 3);
        assert_eq!(records[1].id, 1);

        assert!(repo.list_sleep_records(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_active_record_lookup_returns_first_match() {
        let repo = setup_test_repo();
        let first = repo.store_sleep_record(active_record(1, 9)).await.unwrap();
        repo.store_sleep_record(active_record(1, 13)).await.unwrap();

        let active = repo.get_active_sleep_record(1).await.unwrap().unwrap();
        assert_eq!(active.id, first.id);
        assert!(repo.get_active_sleep_record(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_ends_session() {
        let repo = setup_test_repo();
        let mut record = repo.store_sleep_record(active_record(1, 9)).await.unwrap();

        record.end_time = Some(record.start_time + Duration::minutes(45));
        record.is_active = false;
        record.quality = Some(SleepQuality::SleptWell);
        assert!(repo.update_sleep_record(&record).await.unwrap());

        let stored = repo.get_sleep_record(record.id).await.unwrap().unwrap();
        assert_eq!(stored, record);
        assert!(repo.get_active_sleep_record(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_record() {
        let repo = setup_test_repo();
        let record = SleepRecord {
            id: 5,
            child_id: 1,
            start_time: Utc::now(),
            end_time: None,
            is_active: true,
            quality: None,
        };
        assert!(!repo.update_sleep_record(&record).await.unwrap());
        assert!(repo.get_sleep_record(5).await.unwrap().is_none());
    }
}
