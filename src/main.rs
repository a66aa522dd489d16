use anyhow::{Context, Result};
use category_sync::config::Config;
use category_sync::gateway::GatewayClient;
use category_sync::init::setup_logging;
use category_sync::sync::{self, SyncOutcome};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up credentials from a .env file when present.
    let _ = dotenvy::dotenv();

    // 1. Load Config
    let config = Config::from_env()?;

    // 2. Setup Logging
    setup_logging(&config);
    info!(
        "Starting category sync for '{}' from {}",
        config.category_name, config.url_list_source
    );

    // 3. One HTTP client for both the source fetch and the gateway, with
    // the configured bounded timeout.
    let client = reqwest::Client::builder()
        .user_agent(concat!("category-sync/", env!("CARGO_PKG_VERSION")))
        .timeout(config.fetch_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let store = GatewayClient::new(client.clone(), config.clone());

    // 4. Run the pipeline. Any stage error propagates out and exits
    // non-zero with the diagnostic on stderr.
    match sync::run(&client, &store, &config).await? {
        SyncOutcome::UpToDate => info!("No changes detected; category is already up to date"),
        SyncOutcome::Updated { added, removed } => {
            info!("Sync complete: {added} added, {removed} removed")
        }
    }
    Ok(())
}
