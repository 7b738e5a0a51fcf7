// lib/src/storage_engine/sled_storage.rs

use std::fs;

use log::{error, info};
use sled::{Db, Tree};

use crate::config::StorageConfig;
use crate::errors::{Result, StoreError};

pub(crate) const USERS: &str = "users";
pub(crate) const USERS_BY_USERNAME: &str = "users_by_username";
pub(crate) const USERS_BY_EMAIL: &str = "users_by_email";
pub(crate) const DEPARTMENTS: &str = "departments";
pub(crate) const DOCTORS: &str = "doctors";
pub(crate) const APPOINTMENTS: &str = "appointments";
pub(crate) const MEDICAL_RECORDS: &str = "medical_records";
pub(crate) const MEDICINES: &str = "medicines";
pub(crate) const SESSIONS: &str = "sessions";
pub(crate) const COUNTERS: &str = "counters";

/// Opens (creating if needed) the sled database under the configured data
/// directory.
pub fn open_sled_db(config: &StorageConfig) -> Result<Db> {
    let db_path = config.data_directory.join("sled");
    if !db_path.exists() {
        info!("Creating database directory at {:?}", db_path);
        fs::create_dir_all(&db_path).map_err(|e| {
            error!("Failed to create database directory at {:?}: {}", db_path, e);
            StoreError::IoError(e)
        })?;
    } else if !db_path.is_dir() {
        return Err(StoreError::ConfigurationError(format!(
            "Path {:?} exists but is not a directory",
            db_path
        )));
    }

    info!("Opening Sled database at {:?}", db_path);
    sled::Config::new()
        .path(&db_path)
        .cache_capacity(config.cache_capacity_bytes)
        .flush_every_ms(config.flush_every_ms)
        .open()
        .map_err(|e| {
            error!("Failed to open Sled database at {:?}: {}", db_path, e);
            StoreError::DatabaseError(format!(
                "Failed to open Sled database at {:?}: {}. Ensure the directory is accessible.",
                db_path, e
            ))
        })
}

/// Sled-backed hospital store: one tree per table plus the username/email
/// indexes and the id counters.
#[derive(Clone)]
pub struct SledStorage {
    db: Db,
    pub(crate) users: Tree,
    pub(crate) users_by_username: Tree,
    pub(crate) users_by_email: Tree,
    pub(crate) departments: Tree,
    pub(crate) doctors: Tree,
    pub(crate) appointments: Tree,
    pub(crate) medical_records: Tree,
    pub(crate) medicines: Tree,
    pub(crate) sessions: Tree,
    pub(crate) counters: Tree,
}

impl SledStorage {
    pub fn new(db: Db) -> Result<Self> {
        Ok(Self {
            users: db.open_tree(USERS)?,
            users_by_username: db.open_tree(USERS_BY_USERNAME)?,
            users_by_email: db.open_tree(USERS_BY_EMAIL)?,
            departments: db.open_tree(DEPARTMENTS)?,
            doctors: db.open_tree(DOCTORS)?,
            appointments: db.open_tree(APPOINTMENTS)?,
            medical_records: db.open_tree(MEDICAL_RECORDS)?,
            medicines: db.open_tree(MEDICINES)?,
            sessions: db.open_tree(SESSIONS)?,
            counters: db.open_tree(COUNTERS)?,
            db,
        })
    }

    pub fn open(config: &StorageConfig) -> Result<Self> {
        Self::new(open_sled_db(config)?)
    }

    /// A throwaway database that is removed when dropped.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::new(db)
    }

    pub async fn flush(&self) -> Result<()> {
        let bytes = self.db.flush_async().await?;
        info!("Flushed {} bytes to disk", bytes);
        Ok(())
    }
}
