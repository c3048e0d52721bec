//! System endpoints.

use crate::body::RequestBody;
use crate::client::{Client, SYSTEM_INFO_PATH};
use crate::error::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// General information about the Harbor instance.
///
/// Fields not modelled here are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harbor_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_auth_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_creation_restriction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_registration: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_ca_root: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_storage_provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_enable: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// OIDC endpoint to check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OidcEndpoint {
    pub url: String,
    pub verify_cert: bool,
}

impl Client {
    /// `GET /systeminfo`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use libharbor::ClientBuilder;
    ///
    /// # async fn example() -> libharbor::error::Result<()> {
    /// let client = ClientBuilder::new().endpoint("harbor.example.com").build()?;
    /// let info = client.system_info().await?;
    /// println!("{:?}", info.harbor_version);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn system_info(&self) -> Result<SystemInfo> {
        self.get_json(SYSTEM_INFO_PATH).await
    }

    /// `POST /system/oidc/ping`: checks that Harbor can reach the OIDC endpoint.
    pub async fn oidc_ping(&self, endpoint: &OidcEndpoint) -> Result<()> {
        self.send(
            Method::POST,
            "/system/oidc/ping",
            RequestBody::json(endpoint)?,
        )
        .await
    }
}
