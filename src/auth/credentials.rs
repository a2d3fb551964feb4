//! Credential management for Firi API authentication.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::error::FiriError;

/// Default environment variable holding the API key.
pub const ENV_API_KEY: &str = "FIRI_API_KEY";
/// Default environment variable holding the secret key.
pub const ENV_SECRET_KEY: &str = "FIRI_SECRET_KEY";
/// Default environment variable holding the client id.
pub const ENV_CLIENT_ID: &str = "FIRI_CLIENT_ID";

/// API credentials: access key, signing secret and client id.
///
/// Fields are fixed at construction.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    client_id: String,
    secret_key: SecretString,
}

impl Credentials {
    /// Create new credentials.
    ///
    /// Fails with [`FiriError::Configuration`] if any field is empty.
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Result<Self, FiriError> {
        let api_key = api_key.into();
        let secret_key = secret_key.into();
        let client_id = client_id.into();

        for (name, value) in [
            ("api key", &api_key),
            ("secret key", &secret_key),
            ("client id", &client_id),
        ] {
            if value.trim().is_empty() {
                let message = format!("{name} must not be empty");
                return Err(FiriError::Configuration(message));
            }
        }

        Ok(Self {
            api_key,
            client_id,
            secret_key: SecretString::from(secret_key),
        })
    }

    /// The API key, sent as `firi-access-key`.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The client id, sent as `firi-user-clientid`.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Get the secret key for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("client_id", &self.client_id)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize where credentials come from,
/// for example a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Result<Self, FiriError> {
        Ok(Self {
            credentials: Credentials::new(api_key, secret_key, client_id)?,
        })
    }
}

impl From<Credentials> for StaticCredentials {
    fn from(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl CredentialsProvider for Arc<StaticCredentials> {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads `FIRI_API_KEY`, `FIRI_SECRET_KEY` and `FIRI_CLIENT_ID`.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Create credentials from the default environment variables.
    pub fn from_env() -> Result<Self, FiriError> {
        Self::from_env_vars(ENV_API_KEY, ENV_SECRET_KEY, ENV_CLIENT_ID)
    }

    /// Create credentials from custom environment variable names.
    ///
    /// A missing variable is a [`FiriError::Configuration`] naming it.
    pub fn from_env_vars(
        key_var: &str,
        secret_var: &str,
        client_id_var: &str,
    ) -> Result<Self, FiriError> {
        let api_key = read_env(key_var)?;
        let secret_key = read_env(secret_var)?;
        let client_id = read_env(client_id_var)?;

        Ok(Self {
            credentials: Credentials::new(api_key, secret_key, client_id)?,
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

fn read_env(var: &str) -> Result<String, FiriError> {
    std::env::var(var)
        .map_err(|_| FiriError::Configuration(format!("Environment variable {var} not set")))
}
