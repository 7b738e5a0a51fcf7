// server/src/main.rs

// Entry point for the hospital site: environment, logging, then the CLI.

use anyhow::Result;
use hospital_server::cli::cli::start_cli;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    start_cli().await
}
