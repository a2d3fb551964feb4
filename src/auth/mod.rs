//! Authentication module for Firi API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - A timestamp source for time-bound signatures
//! - HMAC-SHA256 signature generation for authenticated requests

mod clock;
mod credentials;
mod signature;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{
    Credentials, CredentialsProvider, ENV_API_KEY, ENV_CLIENT_ID, ENV_SECRET_KEY, EnvCredentials,
    StaticCredentials,
};
pub use signature::{
    AuthHeaders, AuthQuery, DEFAULT_VALIDITY_SECS, HEADER_ACCESS_KEY, HEADER_CLIENT_ID,
    HEADER_SIGNATURE, Payload, SignedAuth, SignedRequest, build_auth_headers, canonical_json,
    payload_query_pairs, sign, sign_message, sign_request,
};
