//! Firi REST API endpoints and the query builder used to assemble them.

use crate::error::FiriError;
use crate::types::Direction;

/// Base URL for the Firi REST API.
pub const FIRI_BASE_URL: &str = "https://api.firi.com/";

/// The exchange has no history before this year.
pub const EARLIEST_YEAR: i32 = 2018;

/// Public endpoints (no authentication required).
pub mod public {
    /// Get server time.
    pub const TIME: &str = "time";
}

/// Private endpoints (authentication required).
pub mod private {
    /// Transaction history, optionally suffixed with `/{year}` or `/{month}/{year}`.
    pub const TRANSACTIONS: &str = "v2/history/transactions";
    /// Order history.
    pub const ORDERS: &str = "v2/history/orders";
}

/// An endpoint path plus its query parameters.
///
/// Parameters keep insertion order and are percent-encoded on render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    query: Vec<(&'static str, String)>,
}

impl Endpoint {
    /// Create an endpoint with no query parameters.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Append a query parameter.
    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Append a query parameter if `value` is set.
    pub fn param_opt(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// The path without query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters in insertion order.
    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// Render as `path` or `path?k=v&...`, relative to the base URL.
    pub fn render(&self) -> Result<String, FiriError> {
        let query_string = serde_urlencoded::to_string(&self.query)
            .map_err(|e| FiriError::InvalidArgument(e.to_string()))?;
        if query_string.is_empty() {
            Ok(self.path.clone())
        } else {
            Ok(format!("{}?{}", self.path, query_string))
        }
    }
}

/// Reject years the exchange has no data for.
pub fn validate_year(year: i32) -> Result<i32, FiriError> {
    if year < EARLIEST_YEAR {
        return Err(FiriError::InvalidArgument(format!(
            "year must be {EARLIEST_YEAR} or later, got {year}"
        )));
    }
    Ok(year)
}

/// Reject months outside 1..=12.
pub fn validate_month(month: u32) -> Result<u32, FiriError> {
    if !(1..=12).contains(&month) {
        return Err(FiriError::InvalidArgument(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    Ok(month)
}

/// `v2/history/transactions?direction=..&count=..`
pub fn transactions(direction: Direction, count: u32) -> Endpoint {
    Endpoint::new(private::TRANSACTIONS)
        .param("direction", direction)
        .param("count", count)
}

/// `v2/history/transactions/{year}?direction=..`
pub fn transactions_by_year(year: i32, direction: Direction) -> Result<Endpoint, FiriError> {
    let year = validate_year(year)?;
    let endpoint = Endpoint::new(format!("{}/{year}", private::TRANSACTIONS));
    Ok(endpoint.param("direction", direction))
}

/// `v2/history/transactions/{month}/{year}?direction=..`
pub fn transactions_by_year_month(
    month: u32,
    year: i32,
    direction: Direction,
) -> Result<Endpoint, FiriError> {
    let month = validate_month(month)?;
    let year = validate_year(year)?;
    let endpoint = Endpoint::new(format!("{}/{month}/{year}", private::TRANSACTIONS));
    Ok(endpoint.param("direction", direction))
}

/// `v2/history/orders?[type=..&]count=..`
pub fn orders(count: u32, order_type: Option<&str>) -> Endpoint {
    Endpoint::new(private::ORDERS)
        .param_opt("type", order_type)
        .param("count", count)
}
