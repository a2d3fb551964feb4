//! Example: Reading transaction and order history.
//!
//! Credentials are read from `FIRI_API_KEY`, `FIRI_SECRET_KEY` and
//! `FIRI_CLIENT_ID`, optionally via a `.env` file.
//!
//! Run with: RUST_LOG=firi_api_client=debug cargo run --example history

use std::sync::Arc;
use std::time::Duration;

use firi_api_client::auth::EnvCredentials;
use firi_api_client::rest::FiriRestClient;
use firi_api_client::types::Direction;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = FiriRestClient::builder()
        .credentials(Arc::new(EnvCredentials::from_env()?))
        .timeout(Duration::from_secs(10))
        .build()?;

    println!("=== Latest Transactions ===");
    let transactions = client.get_transactions(Direction::End, 10).await?;
    println!("{transactions:#}");

    println!("\n=== Transactions January 2024 ===");
    match client
        .get_transactions_by_year_month(1, 2024, Direction::Start)
        .await
    {
        Ok(month) => println!("{month:#}"),
        Err(e) => println!("Request failed: {e}"),
    }

    println!("\n=== Recent Orders ===");
    let orders = client.get_orders(10, None).await?;
    println!("{orders:#}");

    Ok(())
}
