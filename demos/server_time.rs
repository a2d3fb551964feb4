//! Example: Fetching the Firi server time.
//!
//! Run with: cargo run --example server_time

use firi_api_client::rest::FiriRestClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // No credentials needed for public endpoints
    let client = FiriRestClient::new()?;

    match client.get_server_time().await {
        Ok(time) => println!("Server time: {time}"),
        Err(e) => println!("{}", e.to_error_body()),
    }

    Ok(())
}
