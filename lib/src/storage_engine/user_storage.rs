// lib/src/storage_engine/user_storage.rs
use async_trait::async_trait;
use log::{debug, info};
use sled::transaction::abort;
use sled::Transactional;

use models::medical::{NewUser, User};

use crate::errors::Result;
use crate::storage_engine::sled_storage::{SledStorage, USERS};
use crate::storage_engine::storage_utils::{
    allocate_id, decode_row, get_row, id_from_bytes, id_key, tx_encode, tx_result, TxAbort,
};

#[async_trait]
pub trait UserStorageEngine: Send + Sync + 'static {
    /// Inserts a user, enforcing unique username and email in the same write.
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    /// Retrieves a user by their username.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    /// Retrieves a user by their unique ID.
    async fn get_user_by_id(&self, id: u64) -> Result<Option<User>>;
    async fn count_users(&self) -> Result<usize>;
}

/// Emails are compared case-insensitively; usernames exactly.
fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl UserStorageEngine for SledStorage {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let username = new_user.username.trim().to_string();
        let email = email_key(&new_user.email);

        let result = (&self.users, &self.users_by_username, &self.users_by_email, &self.counters)
            .transaction(|(users, by_username, by_email, counters)| {
                if by_username.get(username.as_bytes())?.is_some() {
                    return abort(TxAbort::UsernameTaken(username.clone()));
                }
                if by_email.get(email.as_bytes())?.is_some() {
                    return abort(TxAbort::EmailTaken(email.clone()));
                }

                let id = allocate_id(counters, USERS)?;
                let mut row = new_user.clone();
                row.username = username.clone();
                let user = User::from_new_user(id, row);

                users.insert(id_key(id).to_vec(), tx_encode(&user)?)?;
                by_username.insert(username.as_bytes(), id_key(id).to_vec())?;
                by_email.insert(email.as_bytes(), id_key(id).to_vec())?;
                Ok(user)
            });

        let user = tx_result(result)?;
        info!("Created user '{}' with id {}", user.username, user.id);
        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let Some(id_bytes) = self.users_by_username.get(username.trim().as_bytes())? else {
            debug!("No user named '{}'", username);
            return Ok(None);
        };
        match id_from_bytes(&id_bytes) {
            Some(id) => match self.users.get(id_key(id))? {
                Some(bytes) => Ok(Some(decode_row(&bytes)?)),
                None => Ok(None),
            },
            None => Ok(None),
        }
    }

    async fn get_user_by_id(&self, id: u64) -> Result<Option<User>> {
        get_row(&self.users, id)
    }

    async fn count_users(&self) -> Result<usize> {
        Ok(self.users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$stub".to_string(),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn ids_are_dense_and_start_at_one() {
        let store = SledStorage::temporary().unwrap();
        let first = store.create_user(new_user("alice", "alice@example.com")).await.unwrap();
        let second = store.create_user(new_user("bob", "bob@example.com")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(store.count_users().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = SledStorage::temporary().unwrap();
        store.create_user(new_user("alice", "alice@example.com")).await.unwrap();
        let err = store
            .create_user(new_user("alice", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UsernameTaken(ref name) if name == "alice"));
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let store = SledStorage::temporary().unwrap();
        store.create_user(new_user("alice", "alice@example.com")).await.unwrap();
        let err = store
            .create_user(new_user("alicia", "Alice@Example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken(_)));
    }

    #[tokio::test]
    async fn rejected_insert_does_not_consume_an_id() {
        let store = SledStorage::temporary().unwrap();
        store.create_user(new_user("alice", "alice@example.com")).await.unwrap();
        let _ = store.create_user(new_user("alice", "x@example.com")).await;
        let next = store.create_user(new_user("bob", "bob@example.com")).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn lookups_by_username_and_id_agree() {
        let store = SledStorage::temporary().unwrap();
        let created = store.create_user(new_user("dana", "dana@example.com")).await.unwrap();
        let by_name = store.get_user_by_username("dana").await.unwrap().unwrap();
        let by_id = store.get_user_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_name, by_id);
        assert!(store.get_user_by_username("nobody").await.unwrap().is_none());
    }
}
