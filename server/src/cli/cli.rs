// server/src/cli/cli.rs
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use tokio::sync::oneshot;

use lib::config::{load_hospital_config, HospitalConfig};
use lib::seed::seed_sample_data;
use lib::storage_engine::{HospitalStorage, SledStorage};
use security::ensure_admin_account;

// CLI entry point for the hospital site
#[derive(Parser, Debug)]
#[command(name = "hospital-site")]
#[command(version = "0.1.0")]
#[command(about = "Sunshine Children's Hospital website")]
pub struct CliArgs {
    /// Configuration file (TOML or YAML). Defaults to ./hospital.{toml,yaml} when present.
    #[arg(short = 'c', long = "config", value_name = "FILE", env = "HOSPITAL_CONFIG")]
    pub config: Option<PathBuf>,
    /// Address to listen on
    #[arg(long = "host", value_name = "HOST")]
    pub host: Option<String>,
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub port: Option<u16>,
    /// Directory holding the database
    #[arg(short = 'd', long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Skip the sample catalog and the admin account
    #[arg(long = "no-seed")]
    pub no_seed: bool,
}

impl CliArgs {
    /// Flags win over the file and the environment.
    pub fn apply(&self, config: &mut HospitalConfig) {
        if let Some(host) = &self.host {
            config.rest.host = host.clone();
        }
        if let Some(port) = self.port {
            config.rest.port = port;
        }
        if let Some(dir) = &self.data_dir {
            config.storage.data_directory = dir.clone();
        }
        if self.no_seed {
            config.seed.enabled = false;
        }
    }
}

pub async fn start_cli() -> Result<()> {
    let args = CliArgs::parse();
    run(args).await
}

/// Loads the sample catalog and the admin account, unless seeding is off.
pub async fn prepare_store(config: &HospitalConfig, store: &dyn HospitalStorage) -> Result<()> {
    if !config.seed.enabled {
        info!("Seeding disabled; leaving the database as it is");
        return Ok(());
    }
    seed_sample_data(store).await.context("Failed to seed sample data")?;
    ensure_admin_account(&config.seed, store)
        .await
        .context("Failed to create the admin account")?;
    Ok(())
}

pub async fn run(args: CliArgs) -> Result<()> {
    let mut config = load_hospital_config(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply(&mut config);
    info!("Starting with configuration: {:?}", config.redacted());

    let storage = Arc::new(SledStorage::open(&config.storage).context("Failed to open the database")?);
    prepare_store(&config, storage.as_ref()).await?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl-C received, shutting down"),
            Err(e) => warn!("Could not listen for Ctrl-C: {}", e),
        }
        let _ = shutdown_tx.send(());
    });

    let served = rest_api::start_server(config.rest.clone(), storage.clone(), shutdown_rx).await;
    if let Err(e) = storage.flush().await {
        error!("Final flush failed: {}", e);
    }
    served
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib::config::StorageConfig;
    use lib::storage_engine::{CatalogStorageEngine, UserStorageEngine};

    #[test]
    fn flags_override_configuration() {
        let args = CliArgs::try_parse_from([
            "hospital-site",
            "--port",
            "8088",
            "--host",
            "0.0.0.0",
            "--data-dir",
            "/srv/hospital",
            "--no-seed",
        ])
        .unwrap();
        let mut config = HospitalConfig::default();
        args.apply(&mut config);
        assert_eq!(config.rest.port, 8088);
        assert_eq!(config.rest.host, "0.0.0.0");
        assert_eq!(config.storage.data_directory, PathBuf::from("/srv/hospital"));
        assert!(!config.seed.enabled);
    }

    #[test]
    fn no_flags_keep_configuration() {
        let args = CliArgs::try_parse_from(["hospital-site"]).unwrap();
        let mut config = HospitalConfig::default();
        args.apply(&mut config);
        assert_eq!(config.rest.port, 5000);
        assert!(config.seed.enabled);
    }

    #[tokio::test]
    async fn prepare_store_seeds_once_and_creates_admin() {
        let dir = tempfile::tempdir().unwrap();
        let config = HospitalConfig {
            storage: StorageConfig { data_directory: dir.path().to_path_buf(), ..StorageConfig::default() },
            ..HospitalConfig::default()
        };
        let store = SledStorage::open(&config.storage).unwrap();

        prepare_store(&config, &store).await.unwrap();
        prepare_store(&config, &store).await.unwrap();

        assert_eq!(store.count_departments().await.unwrap(), 8);
        assert_eq!(store.count_users().await.unwrap(), 1);
        let admin = store.get_user_by_username("admin").await.unwrap().unwrap();
        assert!(admin.is_admin);
        assert!(dir.path().join("sled").is_dir());
    }

    #[tokio::test]
    async fn disabled_seeding_leaves_the_store_empty() {
        let mut config = HospitalConfig::default();
        config.seed.enabled = false;
        let store = SledStorage::temporary().unwrap();
        prepare_store(&config, &store).await.unwrap();
        assert_eq!(store.count_departments().await.unwrap(), 0);
        assert_eq!(store.count_users().await.unwrap(), 0);
    }
}
