//! Client settings.
//!
//! Settings are optional: a [`crate::ClientBuilder`] can be configured
//! entirely in code. When a YAML file is used, its values are layered over the
//! defaults below.
//!
//! ```yaml
//! endpoint: https://harbor.example.com
//! credentials:
//!   username: admin
//!   password: Harbor12345
//! network:
//!   timeout: 30
//!   insecure: false
//! ```

use crate::auth::Credentials;
use crate::error::{HarborError, Result};
use config::{Config as ConfigRs, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;


/// Root settings structure.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Default, Clone)]
pub struct Settings {
    /// Harbor server URL, e.g. `https://harbor.example.com`
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub credentials: CredentialSettings,
    #[serde(default)]
    pub network: Network,
}

impl Settings {
    /// Parses `Settings` from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let builder = ConfigRs::builder()
            .add_source(ConfigRs::try_from(&Settings::default())?)
            .add_source(File::from_str(s, FileFormat::Yaml));

        Self::from_builder(builder, None)
    }

    /// Loads `Settings` from a YAML file. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let builder = ConfigRs::builder()
            .add_source(ConfigRs::try_from(&Settings::default())?)
            .add_source(File::from(path).format(FileFormat::Yaml).required(true));

        Self::from_builder(builder, Some(path.display().to_string()))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: Option<String>,
    ) -> Result<Self> {
        builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| HarborError::config_with_source("Failed to load settings", path.as_deref(), e))
    }

    /// Resolves the configured credentials.
    ///
    /// A username with a password selects Basic, a token selects Bearer,
    /// neither means anonymous access.
    ///
    /// # Errors
    ///
    /// Returns [`HarborError::Config`] when both a password and a token are
    /// configured, or when only one of username and password is set.
    pub fn credentials(&self) -> Result<Credentials> {
        let creds = &self.credentials;
        match (&creds.username, &creds.password, &creds.token) {
            (None, None, None) => Ok(Credentials::anonymous()),
            (None, None, Some(token)) => Ok(Credentials::bearer(token.clone())),
            (Some(username), Some(password), None) => {
                Ok(Credentials::basic(username.clone(), password.clone()))
            }
            (_, _, Some(_)) => Err(HarborError::config(
                "Basic credentials and a bearer token are mutually exclusive",
                None,
            )),
            (Some(_), None, None) => Err(HarborError::config(
                "A username requires a password",
                None,
            )),
            (None, Some(_), None) => Err(HarborError::config(
                "A password requires a username",
                None,
            )),
        }
    }
}

/// Credential settings. All fields are optional.
#[derive(Default, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct CredentialSettings {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl std::fmt::Debug for CredentialSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSettings")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Network settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Default, Clone)]
pub struct Network {
    /// Request timeout in seconds; none by default.
    #[serde(default)]
    pub timeout: Option<u64>,
    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,
}
