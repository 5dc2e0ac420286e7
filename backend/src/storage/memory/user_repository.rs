use anyhow::Result;
use async_trait::async_trait;

use super::connection::MemoryConnection;
use crate::domain::models::user::{NewUser, User};
use crate::storage::traits::UserStorage;

/// In-memory user repository
#[derive(Clone)]
pub struct MemoryUserRepository {
    connection: MemoryConnection,
}

impl MemoryUserRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl UserStorage for MemoryUserRepository {
    async fn store_user(&self, user: NewUser) -> Result<User> {
        self.connection.with_tables(|tables| {
            let user = User {
                id: tables.user_ids.next_id(),
                username: user.username,
                password: user.password,
            };
            tables.users.insert(user.id, user.clone());
            user
        })
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        self.connection
            .with_tables(|tables| tables.users.get(&user_id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.connection.with_tables(|tables| {
            tables
                .users
                .values()
                .find(|user| user.username == username)
                .cloned()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_find_user() {
        let repo = MemoryUserRepository::new(MemoryConnection::new());

        let user = repo
            .store_user(NewUser {
                username: "parent".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.id, 1);

        assert_eq!(repo.get_user(1).await.unwrap(), Some(user.clone()));
        assert_eq!(repo.get_user_by_username("parent").await.unwrap(), Some(user));
        assert!(repo.get_user_by_username("someone").await.unwrap().is_none());
        assert!(repo.get_user(2).await.unwrap().is_none());
    }
}
