//! Public REST API endpoints (no authentication required).

use reqwest::Method;

use crate::ApiResult;
use crate::rest::FiriRestClient;
use crate::rest::endpoints::{Endpoint, public};

impl FiriRestClient {
    /// Get the server time.
    ///
    /// Sends no credentials. Useful for checking API availability and clock
    /// drift before signing requests.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use firi_api_client::rest::FiriRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = FiriRestClient::new()?;
    ///     let time = client.get_server_time().await?;
    ///     println!("Server time: {time}");
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_server_time(&self) -> ApiResult {
        self.request(Method::GET, &Endpoint::new(public::TIME), false, None).await
    }
}
