//! Headless tactics client.
//!
//! Loads battle tuning and content from a data directory, then plays a full
//! run with a scripted player and prints a JSON summary to stdout. Every
//! engine event is logged at `debug`.
//!
//! ```bash
//! RUST_LOG=debug TACTICS_SEED=7 cargo run -p tactics-client
//! ```

mod autopilot;
mod config;
mod logging;
mod run;

use anyhow::{Context, Result};
use tactics_content::ContentFactory;

use crate::config::ClientConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting tactics run");
    tracing::info!("Data directory: {}", config.data_dir.display());

    let factory = ContentFactory::new(&config.data_dir);
    let mut battle = factory
        .load_config()
        .context("Failed to load battle configuration")?;
    if let Some(seed) = config.seed {
        battle.seed = seed;
    }
    let catalog = factory
        .load_catalog()
        .context("Failed to load content catalog")?;

    let summary = run::play_run(&config, &catalog, battle)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
