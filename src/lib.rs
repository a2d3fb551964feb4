//! # Firi Client
//!
//! An async Rust client library for the Firi exchange REST API.
//!
//! ## Features
//!
//! - Server time, transaction history and order history endpoints
//! - HMAC-SHA256 request signing with a bounded validity window
//! - Tagged errors separating bad input, transport, HTTP status and decode failures
//! - `tracing` instrumentation on every request
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use firi_api_client::rest::FiriRestClient;
//! use firi_api_client::types::Direction;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads FIRI_API_KEY, FIRI_SECRET_KEY and FIRI_CLIENT_ID.
//!     let client = FiriRestClient::from_env()?;
//!     let time = client.get_server_time().await?;
//!     println!("Server time: {time}");
//!     let orders = client.get_orders(10, None).await?;
//!     println!("Orders: {orders}");
//!     let history = client.get_transactions(Direction::End, 25).await?;
//!     println!("Transactions: {history}");
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::FiriError;
pub use rest::FiriRestClient;
pub use types::Direction;

/// Result type alias using FiriError
pub type Result<T> = std::result::Result<T, FiriError>;

/// Outcome of a single API call: decoded JSON or a tagged error.
pub type ApiResult = Result<serde_json::Value>;
