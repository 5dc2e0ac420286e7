//! backend/src/io/rest/mappers/child_mapper.rs

use shared::{Child as SharedChild, CreateChildRequest, UpdateChildRequest};

use super::{parse_date, DATE_FORMAT};
use crate::domain::commands::child::{CreateChildCommand, UpdateChildCommand};
use crate::domain::models::child::Child as DomainChild;
use crate::domain::DomainResult;

/// Mapper to convert between shared Child DTOs and domain Child models.
pub struct ChildMapper;

impl ChildMapper {
    pub fn to_dto(domain: DomainChild) -> SharedChild {
        SharedChild {
            id: domain.id,
            name: domain.name,
            birth_date: domain.birth_date.format(DATE_FORMAT).to_string(),
            gender: domain.gender,
        }
    }

    pub fn to_dto_list(children: Vec<DomainChild>) -> Vec<SharedChild> {
        children.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreateChildRequest) -> DomainResult<CreateChildCommand> {
        Ok(CreateChildCommand {
            birth_date: parse_date("birthDate", &request.birth_date)?,
            name: request.name,
            gender: request.gender,
        })
    }

    pub fn to_update_command(request: UpdateChildRequest) -> DomainResult<UpdateChildCommand> {
        let birth_date = request
            .birth_date
            .as_deref()
            .map(|date| parse_date("birthDate", date))
            .transpose()?;

        Ok(UpdateChildCommand {
            name: request.name,
            birth_date,
            gender: request.gender,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use chrono::NaiveDate;

    #[test]
    fn test_to_dto_formats_birth_date() {
        let dto = ChildMapper::to_dto(DomainChild {
            id: 3,
            name: "Ada".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            gender: "female".to_string(),
        });
        assert_eq!(dto.birth_date, "2024-01-05");
        assert_eq!(dto.id, 3);
    }

    #[test]
    fn test_update_command_keeps_absent_fields_absent() {
        let command = ChildMapper::to_update_command(UpdateChildRequest {
            gender: Some("male".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(command.name.is_none());
        assert!(command.birth_date.is_none());
        assert_eq!(command.gender.as_deref(), Some("male"));

        let result = ChildMapper::to_update_command(UpdateChildRequest {
            birth_date: Some("soon".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
