//! HTTP transport for the Harbor control-plane API.
//!
//! Every façade call funnels through [`Client::execute`], which encodes the
//! body, primes and attaches the CSRF token for mutating calls, applies the
//! credentials, classifies the status and hands the body to a
//! [`ResponseSink`].

use crate::auth::Credentials;
use crate::body::{RequestBody, ResponseSink};
use crate::error::{HarborError, Result};
use crate::pagination::Page;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, trace, warn};


/// Path prefix of the control-plane API.
pub const API_PREFIX: &str = "/api/v2.0";

/// Header carrying the CSRF token.
pub const CSRF_TOKEN_HEADER: &str = "X-Harbor-CSRF-Token";

/// Endpoint used to obtain a CSRF token.
pub const SYSTEM_INFO_PATH: &str = "/systeminfo";

/// Returns true for the statuses the control-plane API treats as success.
pub fn is_success_status(status: u16) -> bool {
    (200..=226).contains(&status)
}

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libharbor::client::ClientConfig;
///
/// let config = ClientConfig::new().with_timeout(60).with_insecure(true);
/// assert_eq!(config.timeout_seconds, Some(60));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: none)
    pub timeout_seconds: Option<u64>,
    /// Accept invalid TLS certificates (default: false)
    pub insecure: bool,
}

impl ClientConfig {
    /// Creates a new configuration with no timeout and strict TLS.
    ///
    /// ```
    /// use libharbor::client::ClientConfig;
    ///
    /// let config = ClientConfig::new();
    /// assert_eq!(config.timeout_seconds, None);
    /// assert!(!config.insecure);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Accepts invalid TLS certificates when `insecure` is true.
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub(crate) fn build_http_client(&self) -> Result<ReqwestClient> {
        let mut builder = ReqwestClient::builder().danger_accept_invalid_certs(self.insecure);
        if let Some(seconds) = self.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        builder
            .build()
            .map_err(|e| HarborError::network_with_source("Failed to create HTTP client", e))
    }
}

/// CSRF token cache shared by all clones of a [`Client`].
///
/// The lock is only held to read or replace the value, never across a request.
#[derive(Debug, Default)]
pub struct CsrfSession {
    token: Mutex<Option<String>>,
}

impl CsrfSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token, if any.
    pub fn current_token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replaces the cached token.
    pub fn set_token<S: Into<String>>(&self, token: S) {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.into());
    }

    /// Forgets the cached token; the next mutating call bootstraps again.
    pub fn clear(&self) {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

/// `{code, message}` error body of the control-plane API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    Envelope { errors: Vec<ApiErrorBody> },
    Single(ApiErrorBody),
}

#[derive(Debug)]
struct Inner {
    http_client: ReqwestClient,
    /// Server URL as configured, e.g. "https://harbor.example.com"
    endpoint: String,
    /// `endpoint` followed by [`API_PREFIX`]
    base_url: String,
    credentials: Credentials,
    session: CsrfSession,
}

/// Client for the Harbor control-plane API.
///
/// Cloning is cheap; clones share the connection pool and the CSRF session.
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

impl Client {
    /// Creates a client for `endpoint` with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use libharbor::auth::Credentials;
    /// use libharbor::client::Client;
    ///
    /// let client = Client::new("harbor.example.com", Credentials::anonymous()).unwrap();
    /// assert_eq!(client.base_url(), "https://harbor.example.com/api/v2.0");
    /// ```
    pub fn new(endpoint: &str, credentials: Credentials) -> Result<Self> {
        Self::with_config(endpoint, credentials, ClientConfig::default())
    }

    /// Creates a client for `endpoint` with a custom configuration.
    pub fn with_config(endpoint: &str, credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let endpoint = normalize_url(endpoint)?;
        let http_client = config.build_http_client()?;
        let base_url = format!("{}{}", endpoint, API_PREFIX);

        Ok(Self {
            inner: Arc::new(Inner {
                http_client,
                endpoint,
                base_url,
                credentials,
                session: CsrfSession::new(),
            }),
        })
    }

    /// Returns the normalized server URL.
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Returns the URL every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Returns the CSRF session shared by this client and its clones.
    pub fn session(&self) -> &CsrfSession {
        &self.inner.session
    }

    /// Performs one exchange and returns the response headers.
    ///
    /// `path` is relative to [`Client::base_url`] and may carry a query string.
    /// Statuses 200 through 226 are success; anything else is decoded as a
    /// `{code, message}` body into [`HarborError::Api`].
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        sink: ResponseSink<'_>,
    ) -> Result<HeaderMap> {
        let body = body.into_body()?;

        let mut request = self.inner.http_client.request(method.clone(), self.url(path));
        if method != Method::GET {
            if let Some(token) = self.csrf_token().await? {
                request = request.header(CSRF_TOKEN_HEADER, token);
            }
            request = request.header(CONTENT_TYPE, "application/json");
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = self.dispatch(&method, path, request).await?;
        let headers = response.headers().clone();
        sink.drain(response).await?;
        Ok(headers)
    }

    /// GETs `path` and decodes the JSON body.
    pub async fn get_json<T: DeserializeOwned + Send>(&self, path: &str) -> Result<T> {
        let mut slot: Option<T> = None;
        self.execute(
            Method::GET,
            path,
            RequestBody::Empty,
            ResponseSink::json(&mut slot),
        )
        .await?;
        slot.ok_or_else(|| HarborError::decode(format!("Empty response body from {}", path)))
    }

    /// GETs a JSON list and reads the pagination headers.
    pub async fn get_page<T: DeserializeOwned + Send>(&self, path: &str) -> Result<Page<T>> {
        let mut slot: Option<Vec<T>> = None;
        let headers = self
            .execute(
                Method::GET,
                path,
                RequestBody::Empty,
                ResponseSink::json(&mut slot),
            )
            .await?;
        let items = slot.unwrap_or_default();
        Ok(Page::from_headers(items, &headers))
    }

    /// GETs `path` and returns the raw body.
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.execute(
            Method::GET,
            path,
            RequestBody::Empty,
            ResponseSink::Buffer(&mut buffer),
        )
        .await?;
        Ok(buffer)
    }

    /// Sends `body` with `method` and decodes the JSON response.
    pub async fn send_json<T: DeserializeOwned + Send>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<T> {
        let mut slot: Option<T> = None;
        self.execute(method, path, body, ResponseSink::json(&mut slot))
            .await?;
        slot.ok_or_else(|| HarborError::decode(format!("Empty response body from {}", path)))
    }

    /// Sends `body` with `method`, discarding the response body.
    pub async fn send(&self, method: Method, path: &str, body: RequestBody) -> Result<()> {
        self.send_with_headers(method, path, body).await?;
        Ok(())
    }

    /// Sends `body` with `method` and returns the response headers.
    pub async fn send_with_headers(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<HeaderMap> {
        self.execute(method, path, body, ResponseSink::Discard).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// Returns the cached CSRF token, priming the session when it is empty.
    async fn csrf_token(&self) -> Result<Option<String>> {
        if let Some(token) = self.inner.session.current_token() {
            return Ok(Some(token));
        }

        debug!(endpoint = %self.inner.endpoint, "Fetching CSRF token");
        let request = self.inner.http_client.get(self.url(SYSTEM_INFO_PATH));
        self.dispatch(&Method::GET, SYSTEM_INFO_PATH, request)
            .await
            .map_err(HarborError::bootstrap)?;

        let token = self.inner.session.current_token();
        if token.is_none() {
            warn!(
                endpoint = %self.inner.endpoint,
                "Server did not return a CSRF token; sending request without one"
            );
        }
        Ok(token)
    }

    /// Applies the credentials, sends the request and classifies the status.
    async fn dispatch(&self, method: &Method, path: &str, request: RequestBuilder) -> Result<Response> {
        let request = self.inner.credentials.apply(request);
        let response = request
            .send()
            .await
            .map_err(|e| translate_reqwest_error(e, &self.inner.endpoint))?;

        let status = response.status().as_u16();
        debug!(%method, path, status, "Harbor API exchange");

        if !is_success_status(status) {
            return Err(decode_api_error(method, response).await);
        }

        if *method == Method::GET {
            self.refresh_token(response.headers());
        }
        Ok(response)
    }

    fn refresh_token(&self, headers: &HeaderMap) {
        if let Some(token) = headers
            .get(CSRF_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
        {
            trace!("Refreshed CSRF token");
            self.inner.session.set_token(token);
        }
    }
}

/// Decodes a non-success response into [`HarborError::Api`].
async fn decode_api_error(method: &Method, response: Response) -> HarborError {
    let status = response.status();
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            return HarborError::network_with_source("Failed to read error response body", e);
        }
    };

    if body.is_empty() && *method == Method::HEAD {
        return HarborError::api(
            status.as_u16(),
            "UNKNOWN",
            status.canonical_reason().unwrap_or("no response body"),
        );
    }

    match serde_json::from_slice::<ErrorPayload>(&body) {
        Ok(ErrorPayload::Single(error)) => HarborError::api(status.as_u16(), error.code, error.message),
        Ok(ErrorPayload::Envelope { errors }) => match errors.into_iter().next() {
            Some(error) => HarborError::api(status.as_u16(), error.code, error.message),
            None => HarborError::api(status.as_u16(), "UNKNOWN", ""),
        },
        Err(e) => HarborError::decode_with_source(
            format!("Failed to decode error response (status: {})", status.as_u16()),
            e,
        ),
    }
}

/// Normalizes a server URL by ensuring it has a scheme and removing trailing slashes.
///
/// URLs without a scheme default to `https://`.
pub(crate) fn normalize_url(url: &str) -> Result<String> {
    let url = url.trim();

    if url.is_empty() {
        return Err(HarborError::validation("Server URL cannot be empty"));
    }

    let url = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{}", url)
    } else {
        url.to_string()
    };

    Ok(url.trim_end_matches('/').to_string())
}

/// Translates a reqwest error into a HarborError.
pub(crate) fn translate_reqwest_error(error: reqwest::Error, server_url: &str) -> HarborError {
    if error.is_timeout() {
        HarborError::network_with_source(format!("Request to {} timed out", server_url), error)
    } else if error.is_connect() {
        HarborError::network_with_source(
            format!("Failed to connect to server at {}", server_url),
            error,
        )
    } else if error.is_request() {
        HarborError::network_with_source(format!("Failed to send request to {}", server_url), error)
    } else {
        HarborError::network_with_source(
            format!("Network error communicating with {}", server_url),
            error,
        )
    }
}
