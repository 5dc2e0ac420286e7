//! backend/src/io/rest/mappers/sleep_record_mapper.rs

use shared::{CreateSleepRecordRequest, SleepRecord as SharedSleepRecord, UpdateSleepRecordRequest};

use super::{format_timestamp, parse_timestamp};
use crate::domain::commands::sleep_record::{CreateSleepRecordCommand, UpdateSleepRecordCommand};
use crate::domain::models::sleep_record::SleepRecord as DomainSleepRecord;
use crate::domain::DomainResult;

pub struct SleepRecordMapper;

impl SleepRecordMapper {
    pub fn to_dto(domain: DomainSleepRecord) -> SharedSleepRecord {
        SharedSleepRecord {
            id: domain.id,
            child_id: domain.child_id,
            start_time: format_timestamp(&domain.start_time),
            end_time: domain.end_time.as_ref().map(format_timestamp),
            is_active: domain.is_active,
            quality: domain.quality,
        }
    }

    pub fn to_dto_list(records: Vec<DomainSleepRecord>) -> Vec<SharedSleepRecord> {
        records.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreateSleepRecordRequest) -> DomainResult<CreateSleepRecordCommand> {
        let end_time = request
            .end_time
            .as_deref()
            .map(|t| parse_timestamp("endTime", t))
            .transpose()?;

        Ok(CreateSleepRecordCommand {
            child_id: request.child_id,
            start_time: parse_timestamp("startTime", &request.start_time)?,
            end_time,
            is_active: request.is_active,
            quality: request.quality,
        })
    }

    pub fn to_update_command(request: UpdateSleepRecordRequest) -> DomainResult<UpdateSleepRecordCommand> {
        let end_time = request
            .end_time
            .as_deref()
            .map(|t| parse_timestamp("endTime", t))
            .transpose()?;

        Ok(UpdateSleepRecordCommand {
            end_time,
            is_active: request.is_active,
            quality: request.quality,
        })
    }
}
