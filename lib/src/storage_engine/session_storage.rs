// lib/src/storage_engine/session_storage.rs
use async_trait::async_trait;
use log::debug;

use models::Session;

use crate::errors::Result;
use crate::storage_engine::sled_storage::SledStorage;
use crate::storage_engine::storage_utils::{decode_row, encode_row};

/// Server-side sessions keyed by their token.
#[async_trait]
pub trait SessionStorageEngine: Send + Sync + 'static {
    async fn put_session(&self, session: &Session) -> Result<()>;
    async fn get_session(&self, token: &str) -> Result<Option<Session>>;
    /// Returns whether a session was removed.
    async fn delete_session(&self, token: &str) -> Result<bool>;
}

#[async_trait]
impl SessionStorageEngine for SledStorage {
    async fn put_session(&self, session: &Session) -> Result<()> {
        self.sessions.insert(session.token.as_bytes(), encode_row(session)?)?;
        debug!("Stored session for user {}", session.user_id);
        Ok(())
    }

    async fn get_session(&self, token: &str) -> Result<Option<Session>> {
        match self.sessions.get(token.as_bytes())? {
            Some(bytes) => Ok(Some(decode_row(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn delete_session(&self, token: &str) -> Result<bool> {
        Ok(self.sessions.remove(token.as_bytes())?.is_some())
    }
}
