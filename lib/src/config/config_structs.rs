// lib/src/config/config_structs.rs
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::config_defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HospitalConfig {
    #[serde(default)]
    pub rest: RestApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

impl HospitalConfig {
    /// Copy safe to log: the admin password is masked.
    pub fn redacted(&self) -> HospitalConfig {
        let mut copy = self.clone();
        copy.seed.admin_password = "********".to_string();
        copy
    }
}

/// Represents the configuration for the HTTP server itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestApiConfig {
    #[serde(default = "default_rest_host")]
    pub host: String,
    #[serde(default = "default_rest_port")]
    pub port: u16,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        RestApiConfig {
            host: default_rest_host(),
            port: default_rest_port(),
            session_cookie: default_session_cookie(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_directory")]
    pub data_directory: PathBuf,
    #[serde(default = "default_cache_capacity_bytes")]
    pub cache_capacity_bytes: u64,
    #[serde(default = "default_flush_every_ms")]
    pub flush_every_ms: Option<u64>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_directory: default_data_directory(),
            cache_capacity_bytes: default_cache_capacity_bytes(),
            flush_every_ms: default_flush_every_ms(),
        }
    }
}

/// First-run sample data and the admin account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig {
            enabled: default_seed_enabled(),
            admin_username: default_admin_username(),
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
        }
    }
}
