//! HMAC-SHA256 signature generation for Firi API authentication.
//!
//! Firi private endpoints require a signature computed as:
//! ```text
//! hex(HMAC-SHA256(secret_key, canonical_json({timestamp, validity, ...extra})))
//! ```
//!
//! `timestamp` and `validity` are decimal strings in the signed payload and are
//! sent again as query parameters. The canonical JSON form is compact with keys
//! in lexicographic order, so the server can rebuild the exact bytes.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::{Clock, Credentials};
use crate::error::FiriError;

type HmacSha256 = Hmac<Sha256>;

/// Default number of seconds a signature stays valid.
pub const DEFAULT_VALIDITY_SECS: u64 = 2000;

/// Header carrying the API key.
pub const HEADER_ACCESS_KEY: &str = "firi-access-key";
/// Header carrying the hex signature.
pub const HEADER_SIGNATURE: &str = "firi-user-signature";
/// Header carrying the client id.
pub const HEADER_CLIENT_ID: &str = "firi-user-clientid";

/// The object that gets serialized and signed. Keys are kept sorted.
pub type Payload = BTreeMap<String, serde_json::Value>;

/// Inputs to one signature: timestamp, validity window and extra fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRequest {
    /// Unix seconds at which the request was signed
    pub timestamp: i64,
    /// Seconds the signature remains valid after `timestamp`
    pub validity: u64,
    /// Extra fields merged into the signed payload
    pub extra_data: Option<Payload>,
}

impl SignedRequest {
    /// Create a request signed at `timestamp`.
    pub fn new(timestamp: i64, validity: u64) -> Self {
        Self {
            timestamp,
            validity,
            extra_data: None,
        }
    }

    /// Read the timestamp from `clock`.
    pub fn now(clock: &dyn Clock, validity: u64) -> Self {
        Self::new(clock.now_unix(), validity)
    }

    /// Attach extra fields to the signed payload.
    pub fn with_extra_data(mut self, extra_data: Payload) -> Self {
        self.extra_data = Some(extra_data);
        self
    }

    /// The query parameters that accompany the request.
    pub fn query(&self) -> AuthQuery {
        AuthQuery {
            timestamp: self.timestamp.to_string(),
            validity: self.validity.to_string(),
        }
    }

    /// The payload to hash.
    ///
    /// Built from [`SignedRequest::query`] so the hashed values and the values
    /// sent on the wire are the same strings. `timestamp` and `validity` win
    /// over extra fields of the same name.
    pub fn payload(&self) -> Payload {
        let mut payload = self.extra_data.clone().unwrap_or_default();
        payload.extend(self.query().into_payload());
        payload
    }
}

/// The `timestamp`/`validity` query parameters of a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthQuery {
    /// Unix seconds as a decimal string
    pub timestamp: String,
    /// Validity window as a decimal string
    pub validity: String,
}

impl AuthQuery {
    /// Query pairs in wire order.
    pub fn pairs(&self) -> [(&'static str, &str); 2] {
        [
            ("timestamp", self.timestamp.as_str()),
            ("validity", self.validity.as_str()),
        ]
    }

    /// The query pair as a signable payload.
    pub fn into_payload(self) -> Payload {
        Payload::from([
            ("timestamp".to_string(), serde_json::Value::String(self.timestamp)),
            ("validity".to_string(), serde_json::Value::String(self.validity)),
        ])
    }
}

/// Authentication headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Value of `firi-access-key`
    pub access_key: String,
    /// Value of `firi-user-signature`, lowercase hex
    pub signature: String,
    /// Value of `firi-user-clientid`
    pub client_id: String,
}

impl AuthHeaders {
    /// Header name/value pairs.
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (HEADER_ACCESS_KEY, self.access_key.as_str()),
            (HEADER_SIGNATURE, self.signature.as_str()),
            (HEADER_CLIENT_ID, self.client_id.as_str()),
        ]
    }
}

/// Everything a signed request needs on the wire.
#[derive(Debug, Clone)]
pub struct SignedAuth {
    /// Headers to attach
    pub headers: AuthHeaders,
    /// Query parameters to append
    pub query: AuthQuery,
    /// The exact canonical JSON that was hashed; used as the POST body
    pub message: String,
}

/// Serialize a payload to its canonical JSON form.
pub fn canonical_json(payload: &Payload) -> Result<String, FiriError> {
    serde_json::to_string(payload)
        .map_err(|e| FiriError::InvalidArgument(format!("Payload is not serializable: {e}")))
}

/// Compute the lowercase hex HMAC-SHA256 of `payload` keyed by `secret_key`.
///
/// # Example
///
/// ```rust
/// use firi_api_client::auth::{sign, Payload};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let payload = Payload::from([
///     ("timestamp".to_string(), "1700000000".into()),
///     ("validity".to_string(), "2000".into()),
/// ]);
/// let signature = sign("test_secret", &payload)?;
/// assert_eq!(signature.len(), 64);
/// # Ok(())
/// # }
/// ```
pub fn sign(secret_key: &str, payload: &Payload) -> Result<String, FiriError> {
    sign_message(secret_key, &canonical_json(payload)?)
}

/// Compute the lowercase hex HMAC-SHA256 of an already serialized message.
pub fn sign_message(secret_key: &str, message: &str) -> Result<String, FiriError> {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|e| FiriError::Configuration(format!("Invalid HMAC key: {e}")))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Render extra payload fields as query pairs, for requests without a body.
///
/// Only string values are accepted, and `timestamp`/`validity` are reserved.
/// A server rebuilding the payload from the query string therefore sees the
/// same fields that were signed.
pub fn payload_query_pairs(payload: &Payload) -> Result<Vec<(&str, &str)>, FiriError> {
    payload
        .iter()
        .map(|(key, value)| {
            if key == "timestamp" || key == "validity" {
                let message = format!("{key} is reserved for the signature");
                return Err(FiriError::InvalidArgument(message));
            }
            match value.as_str() {
                Some(value) => Ok((key.as_str(), value)),
                None => {
                    let message = format!("query field {key} must be a string, got {value}");
                    Err(FiriError::InvalidArgument(message))
                }
            }
        })
        .collect()
}

/// Sign a prepared [`SignedRequest`] with `credentials`.
pub fn sign_request(
    credentials: &Credentials,
    request: &SignedRequest,
) -> Result<SignedAuth, FiriError> {
    let message = canonical_json(&request.payload())?;
    let signature = sign_message(credentials.expose_secret(), &message)?;

    Ok(SignedAuth {
        headers: AuthHeaders {
            access_key: credentials.api_key().to_string(),
            signature,
            client_id: credentials.client_id().to_string(),
        },
        query: request.query(),
        message,
    })
}

/// Build the authentication headers and query parameters for a request.
///
/// Reads the current time from `clock` and signs
/// `{timestamp, validity, ...extra_data}`.
pub fn build_auth_headers(
    credentials: &Credentials,
    clock: &dyn Clock,
    validity: u64,
    extra_data: Option<&Payload>,
) -> Result<SignedAuth, FiriError> {
    let mut request = SignedRequest::now(clock, validity);
    if let Some(extra) = extra_data {
        request = request.with_extra_data(extra.clone());
    }
    sign_request(credentials, &request)
}
