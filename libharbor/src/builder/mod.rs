//! Builder for configured clients.

use crate::auth::Credentials;
use crate::client::{Client, ClientConfig};
use crate::config::Settings;
use crate::distribution::DistributionClient;
use crate::error::{HarborError, Result};


/// Builder for a control-plane [`Client`] or a [`DistributionClient`].
///
/// # Examples
///
/// ```
/// use libharbor::ClientBuilder;
///
/// let client = ClientBuilder::new()
///     .endpoint("https://harbor.example.com")
///     .basic_auth("admin", "Harbor12345")
///     .timeout(30)
///     .build()
///     .unwrap();
/// assert_eq!(client.base_url(), "https://harbor.example.com/api/v2.0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    endpoint: Option<String>,
    credentials: Credentials,
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from loaded settings.
    ///
    /// Fails when the settings name conflicting credentials.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut builder = Self::new()
            .credentials(settings.credentials()?)
            .insecure(settings.network.insecure);
        if !settings.endpoint.trim().is_empty() {
            builder = builder.endpoint(&settings.endpoint);
        }
        if let Some(seconds) = settings.network.timeout {
            builder = builder.timeout(seconds);
        }
        Ok(builder)
    }

    /// Set the server URL.
    pub fn endpoint(mut self, url: &str) -> Self {
        self.endpoint = Some(url.to_string());
        self
    }

    /// Authenticate with HTTP Basic credentials.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Credentials::basic(username, password);
        self
    }

    /// Authenticate with a bearer token.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Credentials::bearer(token);
        self
    }

    /// Set credentials for authentication.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config = self.config.with_timeout(seconds);
        self
    }

    /// Accept invalid TLS certificates.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.config = self.config.with_insecure(insecure);
        self
    }

    /// Build the control-plane client.
    pub fn build(self) -> Result<Client> {
        let endpoint = self.require_endpoint()?;
        Client::with_config(&endpoint, self.credentials, self.config)
    }

    /// Build a Distribution Spec client for the same server and credentials.
    pub fn build_distribution(self) -> Result<DistributionClient> {
        let endpoint = self.require_endpoint()?;
        DistributionClient::with_config(&endpoint, self.credentials, self.config)
    }

    fn require_endpoint(&self) -> Result<String> {
        self.endpoint
            .clone()
            .ok_or_else(|| HarborError::validation("Server URL is required"))
    }
}
