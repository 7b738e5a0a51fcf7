// lib/src/config/config_defaults.rs
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE_STEM: &str = "hospital";
pub const ENV_PREFIX: &str = "HOSPITAL";

pub const DEFAULT_REST_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_REST_API_PORT: u16 = 5000;
pub const DEFAULT_SESSION_COOKIE: &str = "hospital_session";

pub const DEFAULT_DATA_DIRECTORY: &str = "./hospital_data";
pub const DEFAULT_CACHE_CAPACITY_BYTES: u64 = 64 * 1024 * 1024;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@hospital.org";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

pub fn default_rest_host() -> String { DEFAULT_REST_API_HOST.to_string() }
pub fn default_rest_port() -> u16 { DEFAULT_REST_API_PORT }
pub fn default_session_cookie() -> String { DEFAULT_SESSION_COOKIE.to_string() }

pub fn default_data_directory() -> PathBuf { PathBuf::from(DEFAULT_DATA_DIRECTORY) }
pub fn default_cache_capacity_bytes() -> u64 { DEFAULT_CACHE_CAPACITY_BYTES }
pub fn default_flush_every_ms() -> Option<u64> { Some(500) }

pub fn default_seed_enabled() -> bool { true }
pub fn default_admin_username() -> String { DEFAULT_ADMIN_USERNAME.to_string() }
pub fn default_admin_email() -> String { DEFAULT_ADMIN_EMAIL.to_string() }
pub fn default_admin_password() -> String { DEFAULT_ADMIN_PASSWORD.to_string() }
