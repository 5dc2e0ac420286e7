use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use super::connection::MemoryConnection;
use crate::domain::models::child::{Child, NewChild};
use crate::storage::traits::ChildStorage;

/// In-memory child repository
#[derive(Clone)]
pub struct MemoryChildRepository {
    connection: MemoryConnection,
}

impl MemoryChildRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ChildStorage for MemoryChildRepository {
    async fn store_child(&self, child: NewChild) -> Result<Child> {
        let stored = self.connection.with_tables(|tables| {
            let child = Child {
                id: tables.child_ids.next_id(),
                name: child.name,
                birth_date: child.birth_date,
                gender: child.gender,
            };
            tables.children.insert(child.id, child.clone());
            child
        })?;

        info!("Stored child {} with ID: {}", stored.name, stored.id);
        Ok(stored)
    }

    async fn get_child(&self, child_id: i64) -> Result<Option<Child>> {
        self.connection
            .with_tables(|tables| tables.children.get(&child_id).cloned())
    }

    async fn list_children(&self) -> Result<Vec<Child>> {
        let children = self
            .connection
            .with_tables(|tables| tables.children.values().cloned().collect::<Vec<_>>())?;

        debug!("Listed {} children", children.len());
        Ok(children)
    }

    async fn update_child(&self, child: &Child) -> Result<bool> {
        self.connection.with_tables(|tables| {
            match tables.children.get_mut(&child.id) {
                Some(existing) => {
                    *existing = child.clone();
                    true
                }
                None => false,
            }
        })
    }

    async fn delete_child(&self, child_id: i64) -> Result<bool> {
        let removed = self
            .connection
            .with_tables(|tables| tables.children.remove(&child_id).is_some())?;

        if removed {
            info!("Deleted child with ID: {}", child_id);
        }
        Ok(removed)
    }
}
