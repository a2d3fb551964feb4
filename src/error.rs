//! Error types for the Firi client library.

use thiserror::Error;

/// The main error type for all Firi client operations.
///
/// Every failure a request can hit is reported through this type, so callers
/// can tell bad input, transport trouble, HTTP status errors and undecodable
/// bodies apart without inspecting strings.
#[derive(Error, Debug)]
pub enum FiriError {
    /// Client configuration is incomplete or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An authenticated endpoint was called on a client built without credentials
    #[error("Missing credentials: private endpoints need an API key, secret key and client id")]
    MissingCredentials,

    /// A request argument is out of range; nothing was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Only GET and POST are dispatched
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Connection-level failure talking to the exchange
    #[error("Transport error for {url}: {message}")]
    Transport {
        /// Request URL
        url: String,
        /// Underlying error message
        message: String,
    },

    /// Request timed out
    #[error("Request to {url} timed out")]
    Timeout {
        /// Request URL
        url: String,
    },

    /// The exchange answered with a non-2xx status
    #[error("HTTP {status} from {url}: {body}")]
    Http {
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// A 2xx response whose body is not valid JSON
    #[error("Malformed response from {url}: {message}")]
    MalformedResponse {
        /// Request URL
        url: String,
        /// Decoder error message
        message: String,
    },

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl FiriError {
    /// Whether the request was rejected locally before any network I/O.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            FiriError::InvalidArgument(_) | FiriError::UnsupportedMethod(_)
        )
    }

    /// Whether the request failed below the HTTP layer (connection or timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, FiriError::Transport { .. } | FiriError::Timeout { .. })
    }

    /// HTTP status code, if the exchange answered with an error status.
    pub fn status(&self) -> Option<u16> {
        match self {
            FiriError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Render the error as a uniform JSON value.
    ///
    /// The shape is always `{"error": "API request failed", "detail": "..."}`.
    pub fn to_error_body(&self) -> serde_json::Value {
        serde_json::json!({
            "error": "API request failed",
            "detail": self.to_string(),
        })
    }

    /// Classify a transport error coming out of the middleware stack.
    pub(crate) fn from_transport(url: &str, err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => FiriError::Timeout {
                url: url.to_string(),
            },
            other => FiriError::Transport {
                url: url.to_string(),
                message: other.to_string(),
            },
        }
    }
}
