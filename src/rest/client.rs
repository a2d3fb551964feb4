//! Firi REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde_json::Value;
use url::Url;

use crate::auth::{
    Clock, CredentialsProvider, DEFAULT_VALIDITY_SECS, EnvCredentials, Payload, SystemClock,
    build_auth_headers, canonical_json, payload_query_pairs,
};
use crate::error::FiriError;
use crate::rest::endpoints::{Endpoint, FIRI_BASE_URL};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The Firi REST API client.
///
/// Every operation issues exactly one HTTP request and returns either the
/// decoded JSON body or a [`FiriError`]. Nothing is retried or cached.
///
/// # Example
///
/// ```rust,no_run
/// use firi_api_client::rest::FiriRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Create a client for public endpoints only
///     let client = FiriRestClient::new()?;
///
///     let time = client.get_server_time().await?;
///     println!("Server time: {time}");
///
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials:
///
/// ```rust,no_run
/// use firi_api_client::auth::StaticCredentials;
/// use firi_api_client::rest::FiriRestClient;
/// use firi_api_client::types::Direction;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "secret_key", "client_id")?);
///     let client = FiriRestClient::builder()
///         .credentials(credentials)
///         .build()?;
///
///     let transactions = client.get_transactions(Direction::End, 20).await?;
///     println!("Transactions: {transactions}");
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct FiriRestClient {
    http_client: ClientWithMiddleware,
    base_url: Url,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    clock: Arc<dyn Clock>,
    validity: u64,
}

impl FiriRestClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`FiriRestClient::builder()`] to configure credentials for private endpoints.
    pub fn new() -> Result<Self, FiriError> {
        Self::builder().build()
    }

    /// Create a client with credentials read from `FIRI_API_KEY`,
    /// `FIRI_SECRET_KEY` and `FIRI_CLIENT_ID`.
    pub fn from_env() -> Result<Self, FiriError> {
        Self::builder()
            .credentials(Arc::new(EnvCredentials::from_env()?))
            .build()
    }

    /// Create a new client builder.
    pub fn builder() -> FiriRestClientBuilder {
        FiriRestClientBuilder::new()
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint against the base URL.
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url, FiriError> {
        Ok(self.base_url.join(&endpoint.render()?)?)
    }

    /// Send a request and decode the JSON response.
    ///
    /// Only GET and POST are dispatched. When `authenticated` is set, the
    /// signature headers are attached and `timestamp`/`validity` are appended
    /// to the query string. `extra_data` is merged into the signed payload:
    /// a POST sends the signed JSON verbatim as its body, while a GET appends
    /// the extra fields to the query string so every signed field is sent.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &Endpoint,
        authenticated: bool,
        extra_data: Option<&Payload>,
    ) -> Result<Value, FiriError> {
        let (url, headers, body) = self
            .prepare(&method, endpoint, authenticated, extra_data)
            .inspect_err(|e| {
                tracing::error!(%method, path = endpoint.path(), error = %e, "Request rejected");
            })?;

        let mut request = self
            .http_client
            .request(method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        tracing::debug!(%method, %url, authenticated, "Sending request");
        let response = request.send().await.map_err(|e| {
            let err = FiriError::from_transport(url.as_str(), e);
            tracing::error!(%method, %url, error = %err, "API request failed");
            err
        })?;

        self.parse_response(&method, &url, response).await
    }

    /// Build the URL, headers and body of a request without sending it.
    fn prepare(
        &self,
        method: &Method,
        endpoint: &Endpoint,
        authenticated: bool,
        extra_data: Option<&Payload>,
    ) -> Result<(Url, HeaderMap, Option<String>), FiriError> {
        if *method != Method::GET && *method != Method::POST {
            return Err(FiriError::UnsupportedMethod(method.to_string()));
        }

        let mut url = self.url_for(endpoint)?;
        let mut headers = HeaderMap::new();
        let mut body = None;

        // A GET has no body, so extra fields travel in the query string.
        if *method == Method::GET {
            if let Some(extra) = extra_data {
                let pairs = payload_query_pairs(extra)?;
                if !pairs.is_empty() {
                    url.query_pairs_mut().extend_pairs(pairs);
                }
            }
        }

        if authenticated {
            let credentials = self
                .credentials
                .as_ref()
                .ok_or(FiriError::MissingCredentials)?;
            let auth = build_auth_headers(
                credentials.get_credentials(),
                self.clock.as_ref(),
                self.validity,
                extra_data,
            )?;

            for (name, value) in auth.headers.pairs() {
                let value = HeaderValue::from_str(value).map_err(|e| {
                    FiriError::Configuration(format!("Invalid value for header {name}: {e}"))
                })?;
                headers.insert(name, value);
            }
            url.query_pairs_mut().extend_pairs(auth.query.pairs());
            body = Some(auth.message);
        } else if let Some(extra) = extra_data {
            body = Some(canonical_json(extra)?);
        }

        let body = if *method == Method::POST { body } else { None };
        Ok((url, headers, body))
    }

    /// Decode a response body, mapping non-2xx statuses to [`FiriError::Http`].
    async fn parse_response(
        &self,
        method: &Method,
        url: &Url,
        response: reqwest::Response,
    ) -> Result<Value, FiriError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let err = FiriError::from_transport(url.as_str(), e.into());
            tracing::error!(
                %method, %url, status = status.as_u16(), error = %err,
                "Failed to read response body"
            );
            err
        })?;

        if !status.is_success() {
            tracing::error!(
                %method, %url, status = status.as_u16(), %body,
                "API returned error status"
            );
            return Err(FiriError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let value = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                %method, %url, status = status.as_u16(), error = %e,
                "Response body is not valid JSON"
            );
            FiriError::MalformedResponse {
                url: url.to_string(),
                message: format!("{e}. Body: {body}"),
            }
        })?;

        tracing::info!(%method, %url, status = status.as_u16(), "API request succeeded");
        Ok(value)
    }
}

impl std::fmt::Debug for FiriRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FiriRestClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_credentials", &self.credentials.is_some())
            .field("validity", &self.validity)
            .finish()
    }
}

/// Builder for [`FiriRestClient`].
pub struct FiriRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    clock: Option<Arc<dyn Clock>>,
    user_agent: Option<String>,
    timeout: Duration,
    validity: u64,
}

impl FiriRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: FIRI_BASE_URL.to_string(),
            credentials: None,
            clock: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            validity: DEFAULT_VALIDITY_SECS,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom timestamp source for signatures.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how many seconds each signature stays valid.
    pub fn validity(mut self, seconds: u64) -> Self {
        self.validity = seconds;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<FiriRestClient, FiriError> {
        if self.validity == 0 {
            return Err(FiriError::Configuration(
                "signature validity must be positive".to_string(),
            ));
        }

        // Endpoints are relative paths, so the base must end in a slash.
        let mut base_url = self.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)?;

        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("firi-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .map_err(|e| FiriError::Configuration(format!("Invalid user agent: {e}")))?;
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(|e| FiriError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(FiriRestClient {
            http_client: client,
            base_url,
            credentials: self.credentials,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            validity: self.validity,
        })
    }
}

impl Default for FiriRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
