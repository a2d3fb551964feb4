//! Private REST API endpoints (authentication required).

use reqwest::Method;

use crate::ApiResult;
use crate::rest::FiriRestClient;
use crate::rest::endpoints::{self, Endpoint};
use crate::types::Direction;

impl FiriRestClient {
    async fn private_get(&self, endpoint: &Endpoint) -> ApiResult {
        self.request(Method::GET, endpoint, true, None).await
    }

    /// Get transaction history.
    ///
    /// # Arguments
    ///
    /// * `direction` - Read from the oldest (`Start`) or newest (`End`) entry.
    /// * `count` - Number of entries to return.
    pub async fn get_transactions(&self, direction: Direction, count: u32) -> ApiResult {
        self.private_get(&endpoints::transactions(direction, count)).await
    }

    /// Get transaction history for one year.
    ///
    /// Years before 2018 are rejected with
    /// [`FiriError::InvalidArgument`](crate::FiriError::InvalidArgument) without
    /// contacting the exchange.
    pub async fn get_transactions_by_year(&self, year: i32, direction: Direction) -> ApiResult {
        let endpoint = endpoints::transactions_by_year(year, direction).inspect_err(|e| {
            tracing::error!(year, %direction, error = %e, "Rejected transactions request");
        })?;
        self.private_get(&endpoint).await
    }

    /// Get transaction history for one month.
    ///
    /// `month` must be in 1..=12 and `year` 2018 or later; otherwise the call
    /// fails with [`FiriError::InvalidArgument`](crate::FiriError::InvalidArgument)
    /// and nothing is sent.
    pub async fn get_transactions_by_year_month(
        &self,
        month: u32,
        year: i32,
        direction: Direction,
    ) -> ApiResult {
        let endpoint = endpoints::transactions_by_year_month(month, year, direction);
        let endpoint = endpoint.inspect_err(|e| {
            tracing::error!(month, year, %direction, error = %e, "Rejected transactions request");
        })?;
        self.private_get(&endpoint).await
    }

    /// Get order history.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of orders to return.
    /// * `order_type` - Optional `type` filter. Deprecated by the exchange but
    ///   still forwarded when set.
    pub async fn get_orders(&self, count: u32, order_type: Option<&str>) -> ApiResult {
        self.private_get(&endpoints::orders(count, order_type)).await
    }
}
