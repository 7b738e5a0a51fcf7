// lib/src/lib.rs

//! Persistence and domain workflows for the hospital site.
//!
//! `storage_engine` owns the sled-backed tables; `booking` and `read_models`
//! are the workflows the REST layer calls; `seed` fills an empty database.

pub mod booking;
pub mod config;
pub mod errors;
pub mod read_models;
pub mod seed;
pub mod storage_engine;

pub use crate::errors::{Result, StoreError};
pub use crate::storage_engine::{open_sled_db, HospitalStorage, SledStorage};
