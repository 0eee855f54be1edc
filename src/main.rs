//! restdock - self-documenting REST API gateway
//!
//! Scans the endpoint manifest tree, registers every valid endpoint, and
//! serves them alongside the catalog and playground frontend.

use restdock::GatewayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = GatewayConfig::load()?;

    // Start server
    restdock::start_server(config).await?;

    Ok(())
}
