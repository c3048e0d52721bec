//! Client for the OCI Distribution Specification endpoints.
//!
//! This client talks to `/v2/` directly. It does not use the CSRF session of
//! the control-plane [`crate::client::Client`]; it only applies credentials.
//! Success is exactly 200 or 201 on every endpoint, so a 202 Accepted is a
//! failure too. Failures carry the Distribution Spec error list verbatim.

use crate::auth::Credentials;
use crate::client::{ClientConfig, normalize_url, translate_reqwest_error};
use crate::digest::Digest;
use crate::error::{HarborError, Result};
use crate::oci::{DistributionErrors, MANIFEST_ACCEPT, ManifestInfo, ManifestOrIndex, TagList, TagPage};
use crate::pagination::{QueryBuilder, next_link};
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap};
use reqwest::{Client as ReqwestClient, Method, Response, StatusCode};
use std::str::FromStr;
use tracing::debug;


/// Header carrying the canonical digest of a manifest.
pub const CONTENT_DIGEST_HEADER: &str = "Docker-Content-Digest";

const SUCCESS: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];

/// Client for the `/v2/` registry endpoints.
#[derive(Debug, Clone)]
pub struct DistributionClient {
    http_client: ReqwestClient,
    /// Server URL without the `/v2` suffix, e.g. "https://harbor.example.com"
    server_url: String,
    credentials: Credentials,
}

impl DistributionClient {
    /// Creates a client for `server` with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use libharbor::auth::Credentials;
    /// use libharbor::distribution::DistributionClient;
    ///
    /// let client = DistributionClient::new("harbor.example.com", Credentials::anonymous()).unwrap();
    /// assert_eq!(client.server_url(), "https://harbor.example.com");
    /// ```
    pub fn new(server: &str, credentials: Credentials) -> Result<Self> {
        Self::with_config(server, credentials, ClientConfig::default())
    }

    /// Creates a client for `server` with a custom configuration.
    pub fn with_config(server: &str, credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http_client: config.build_http_client()?,
            server_url: normalize_url(server)?,
            credentials,
        })
    }

    /// Returns the normalized server URL.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Checks that the server implements the Distribution Spec and accepts
    /// the credentials.
    pub async fn ping(&self) -> Result<()> {
        self.request(Method::GET, "/v2/", None).await?;
        Ok(())
    }

    /// Fetches and decodes a manifest or index.
    ///
    /// When `reference` is a digest, the body must hash to it.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use libharbor::auth::Credentials;
    /// use libharbor::distribution::DistributionClient;
    ///
    /// # async fn example() -> libharbor::error::Result<()> {
    /// let client = DistributionClient::new("harbor.example.com", Credentials::anonymous())?;
    /// let manifest = client.get_manifest("library/nginx", "alpine").await?;
    /// if let Some(index) = manifest.as_index() {
    ///     println!("{} platforms", index.manifests().len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_manifest(&self, name: &str, reference: &str) -> Result<ManifestOrIndex> {
        let path = format!("/v2/{}/manifests/{}", name, reference);
        let response = self
            .request(Method::GET, &path, Some(MANIFEST_ACCEPT))
            .await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HarborError::network_with_source("Failed to read manifest response", e))?;

        if let Ok(digest) = Digest::from_str(reference) {
            digest.verify(&bytes)?;
        }

        ManifestOrIndex::from_bytes(&bytes)
    }

    /// Reads manifest metadata without downloading the body.
    pub async fn head_manifest(&self, name: &str, reference: &str) -> Result<ManifestInfo> {
        let path = format!("/v2/{}/manifests/{}", name, reference);
        let response = self
            .request(Method::HEAD, &path, Some(MANIFEST_ACCEPT))
            .await?;

        let headers = response.headers();
        Ok(ManifestInfo {
            digest: header_str(headers, CONTENT_DIGEST_HEADER),
            media_type: header_str(headers, CONTENT_TYPE.as_str()),
            size: header_str(headers, CONTENT_LENGTH.as_str()).and_then(|v| v.parse().ok()),
        })
    }

    /// Lists all tags of a repository in one call.
    pub async fn list_tags(&self, name: &str) -> Result<TagList> {
        let path = format!("/v2/{}/tags/list", name);
        let response = self.request(Method::GET, &path, None).await?;
        decode_json(response).await
    }

    /// Lists up to `n` tags following `last`.
    ///
    /// `next` holds the path of the following page when the registry sends a
    /// `Link` header.
    pub async fn list_tags_paged(&self, name: &str, n: usize, last: Option<&str>) -> Result<TagPage> {
        let mut query = QueryBuilder::new();
        query.push("n", n).push_opt("last", last);
        let path = query.apply_to(&format!("/v2/{}/tags/list", name));

        let response = self.request(Method::GET, &path, None).await?;
        let next = next_link(response.headers());
        let list: TagList = decode_json(response).await?;

        Ok(TagPage {
            name: list.name,
            tags: list.tags,
            next,
        })
    }

    /// Deletes a manifest.
    pub async fn delete_manifest(&self, name: &str, reference: &str) -> Result<()> {
        let path = format!("/v2/{}/manifests/{}", name, reference);
        self.request(Method::DELETE, &path, None)
            .await?;
        Ok(())
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        accept: Option<&str>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.server_url, path);
        let mut request = self.http_client.request(method.clone(), &url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }
        let request = self.credentials.apply(request);

        let response = request
            .send()
            .await
            .map_err(|e| translate_reqwest_error(e, &self.server_url))?;

        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "Distribution exchange");

        if SUCCESS.contains(&status) {
            return Ok(response);
        }
        Err(decode_distribution_error(response).await)
    }
}

async fn decode_distribution_error(response: Response) -> HarborError {
    let status = response.status().as_u16();
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            return HarborError::network_with_source("Failed to read error response body", e);
        }
    };

    if body.iter().all(u8::is_ascii_whitespace) {
        return HarborError::Distribution {
            status,
            errors: Vec::new(),
        };
    }

    match serde_json::from_slice::<DistributionErrors>(&body) {
        Ok(errors) => HarborError::Distribution {
            status,
            errors: errors.errors,
        },
        Err(e) => HarborError::decode_with_source(
            format!("Failed to decode error response (status: {})", status),
            e,
        ),
    }
}

async fn decode_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| HarborError::network_with_source("Failed to read response body", e))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| HarborError::decode_with_source("Failed to decode response body", e))
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
