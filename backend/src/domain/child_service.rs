use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::child::{CreateChildCommand, UpdateChildCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::child::{Child, NewChild};
use crate::storage::{ChildStorage, Connection};

const MAX_NAME_LEN: usize = 100;
const MAX_GENDER_LEN: usize = 32;

/// Service for managing children
#[derive(Clone)]
pub struct ChildService<C: Connection> {
    child_repository: C::ChildRepository,
}

impl<C: Connection> ChildService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            child_repository: connection.create_child_repository(),
        }
    }

    /// Create a new child
    pub async fn create_child(&self, command: CreateChildCommand) -> DomainResult<Child> {
        info!("Creating child: name={}, birth_date={}", command.name, command.birth_date);

        let name = validate_name(&command.name)?;
        let gender = validate_gender(&command.gender)?;
        validate_birth_date(command.birth_date, Local::now().date_naive())?;

        let child = self
            .child_repository
            .store_child(NewChild {
                name,
                birth_date: command.birth_date,
                gender,
            })
            .await?;

        info!("Created child: {} with ID: {}", child.name, child.id);
        Ok(child)
    }

    /// Get a child by ID
    pub async fn get_child(&self, child_id: i64) -> DomainResult<Child> {
        match self.child_repository.get_child(child_id).await? {
            Some(child) => Ok(child),
            None => {
                warn!("Child not found: {}", child_id);
                Err(DomainError::not_found(format!("Child not found: {}", child_id)))
            }
        }
    }

    /// List all children
    pub async fn list_children(&self) -> DomainResult<Vec<Child>> {
        let children = self.child_repository.list_children().await?;
        info!("Found {} children", children.len());
        Ok(children)
    }

    /// Update an existing child, merging only the provided fields
    pub async fn update_child(&self, child_id: i64, command: UpdateChildCommand) -> DomainResult<Child> {
        info!("Updating child: {}", child_id);

        let mut child = self.get_child(child_id).await?;

        if let Some(name) = command.name {
            child.name = validate_name(&name)?;
        }
        if let Some(gender) = command.gender {
            child.gender = validate_gender(&gender)?;
        }
        if let Some(birth_date) = command.birth_date {
            validate_birth_date(birth_date, Local::now().date_naive())?;
            child.birth_date = birth_date;
        }

        if !self.child_repository.update_child(&child).await? {
            return Err(DomainError::not_found(format!("Child not found: {}", child_id)));
        }

        info!("Updated child: {} with ID: {}", child.name, child.id);
        Ok(child)
    }

    /// Delete a child. Its sleep records and predictions are not removed.
    pub async fn delete_child(&self, child_id: i64) -> DomainResult<()> {
        info!("Deleting child: {}", child_id);

        if !self.child_repository.delete_child(child_id).await? {
            warn!("Child not found: {}", child_id);
            return Err(DomainError::not_found(format!("Child not found: {}", child_id)));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("Child name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(format!(
            "Child name cannot exceed {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

fn validate_gender(gender: &str) -> DomainResult<String> {
    let gender = gender.trim();
    if gender.is_empty() {
        return Err(DomainError::validation("Gender cannot be empty"));
    }
    if gender.chars().count() > MAX_GENDER_LEN {
        return Err(DomainError::validation(format!(
            "Gender cannot exceed {} characters",
            MAX_GENDER_LEN
        )));
    }
    Ok(gender.to_string())
}

fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> DomainResult<()> {
    if birth_date > today {
        return Err(DomainError::validation("Birth date cannot be in the future"));
    }
    Ok(())
}
