// lib/src/storage_engine/mod.rs

pub mod appointment_storage;
pub mod catalog_storage;
pub mod record_storage;
pub mod session_storage;
pub mod sled_storage;
pub mod storage_utils;
pub mod user_storage;

pub use appointment_storage::AppointmentStorageEngine;
pub use catalog_storage::CatalogStorageEngine;
pub use record_storage::RecordStorageEngine;
pub use session_storage::SessionStorageEngine;
pub use sled_storage::{open_sled_db, SledStorage};
pub use user_storage::UserStorageEngine;

/// Everything the site needs from its store, usable as `Arc<dyn HospitalStorage>`.
pub trait HospitalStorage:
    UserStorageEngine
    + CatalogStorageEngine
    + AppointmentStorageEngine
    + RecordStorageEngine
    + SessionStorageEngine
{
}

impl<T> HospitalStorage for T where
    T: UserStorageEngine
        + CatalogStorageEngine
        + AppointmentStorageEngine
        + RecordStorageEngine
        + SessionStorageEngine
{
}
