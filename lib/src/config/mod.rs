// lib/src/config/mod.rs

//! Layered configuration: serde defaults, then an optional config file, then
//! `HOSPITAL_<SECTION>__<KEY>` environment variables.

pub mod config_defaults;
pub mod config_structs;

use std::path::Path;

use config::{Config, Environment, File};
use log::{debug, info};

pub use config_defaults::*;
pub use config_structs::{HospitalConfig, RestApiConfig, SeedConfig, StorageConfig};

use crate::errors::Result;

/// Loads the site configuration.
///
/// With `config_file` set the file must exist; otherwise `hospital.toml` /
/// `hospital.yaml` in the working directory are read when present.
pub fn load_hospital_config(config_file: Option<&Path>) -> Result<HospitalConfig> {
    let mut builder = Config::builder();
    builder = match config_file {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            builder.add_source(File::from(path).required(true))
        }
        None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE_STEM).required(false)),
    };
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config: HospitalConfig = builder.build()?.try_deserialize()?;
    debug!("Effective configuration: {:?}", config.redacted());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_sources() {
        let config: HospitalConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.rest.port, DEFAULT_REST_API_PORT);
        assert_eq!(config.rest.session_cookie, DEFAULT_SESSION_COOKIE);
        assert!(config.seed.enabled);
        assert_eq!(config.seed.admin_username, "admin");
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[rest]\nport = 9090\n\n[seed]\nenabled = false").unwrap();

        let config = load_hospital_config(Some(file.path())).unwrap();
        assert_eq!(config.rest.port, 9090);
        assert_eq!(config.rest.host, DEFAULT_REST_API_HOST);
        assert!(!config.seed.enabled);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let missing = Path::new("/nonexistent/hospital-config.toml");
        assert!(load_hospital_config(Some(missing)).is_err());
    }
}
