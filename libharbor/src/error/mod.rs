//! Error types for libharbor
//!
//! Every operation of the control-plane client, the distribution client and
//! the reference parser reports failures through [`HarborError`]. Errors are
//! returned to the immediate caller; nothing is retried or swallowed, and a
//! client stays usable after any failure.

use crate::oci::DistributionErrorInfo;
use thiserror::Error;


type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for libharbor operations
#[derive(Error, Debug)]
pub enum HarborError {
    /// The request body could not be serialized. Raised before any I/O.
    #[error("Encoding error: {message}")]
    Encoding {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Network-related errors (connection, timeout, DNS, body read)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// The CSRF priming call that precedes the first mutating request failed.
    #[error("Failed to obtain a CSRF token from the server: {source}")]
    Bootstrap {
        #[source]
        source: Box<HarborError>,
    },

    /// The control-plane API answered outside the success range.
    #[error("API error (status: {status}): {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// A distribution endpoint answered outside its success set.
    #[error("Distribution error (status: {status}): {}", describe(.errors))]
    Distribution {
        status: u16,
        errors: Vec<DistributionErrorInfo>,
    },

    /// A response body did not have the expected shape.
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// The image coordinate is not a syntactically valid reference.
    #[error("Invalid image reference: {message}")]
    Reference {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// The image coordinate parsed but lacks a project, repository or reference.
    #[error("Not a valid registry coordinate: {image}")]
    NotRegistryCoordinate { image: String },

    /// A named resource could not be located.
    #[error("{resource_type} not found: {name}")]
    NotFound { resource_type: String, name: String },

    /// Invalid caller input (empty endpoint, digest mismatch, ...)
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Configuration errors (invalid settings file, conflicting credentials)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },
}

/// Result type alias for libharbor operations
pub type Result<T> = std::result::Result<T, HarborError>;

fn describe(errors: &[DistributionErrorInfo]) -> String {
    if errors.is_empty() {
        return "(no error details)".to_string();
    }
    errors
        .iter()
        .map(|e| match &e.message {
            Some(message) => format!("{}: {}", e.code, message),
            None => e.code.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl HarborError {
    /// Creates a new encoding error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libharbor::error::HarborError;
    /// use std::io;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::InvalidData, "not serializable");
    /// let err = HarborError::encoding_with_source("failed to encode body", io_err);
    /// assert!(matches!(err, HarborError::Encoding { .. }));
    /// ```
    pub fn encoding_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Encoding {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new network error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libharbor::error::HarborError;
    ///
    /// let err = HarborError::network("connection refused");
    /// assert!(matches!(err, HarborError::Network { .. }));
    /// ```
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new network error with a source error.
    pub fn network_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wraps the failure of the CSRF priming call.
    pub fn bootstrap(source: HarborError) -> Self {
        Self::Bootstrap {
            source: Box::new(source),
        }
    }

    /// Creates a new API error from a decoded `{code, message}` body.
    ///
    /// # Examples
    ///
    /// ```
    /// use libharbor::error::HarborError;
    ///
    /// let err = HarborError::api(404, "NOT_FOUND", "project foo not found");
    /// assert!(err.is_not_found());
    /// ```
    pub fn api<C: Into<String>, M: Into<String>>(status: u16, code: C, message: M) -> Self {
        Self::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a new decode error.
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new decode error with a source error.
    pub fn decode_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new reference parse error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libharbor::error::HarborError;
    ///
    /// let err = HarborError::reference("repository name must be lowercase");
    /// assert!(matches!(err, HarborError::Reference { .. }));
    /// ```
    pub fn reference<S: Into<String>>(message: S) -> Self {
        Self::Reference {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new reference parse error with a source error.
    pub fn reference_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Reference {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new not-a-registry-coordinate error.
    pub fn not_registry_coordinate<S: Into<String>>(image: S) -> Self {
        Self::NotRegistryCoordinate {
            image: image.into(),
        }
    }

    /// Creates a new not found error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libharbor::error::HarborError;
    ///
    /// let err = HarborError::not_found("label", "qa-passed");
    /// assert!(matches!(err, HarborError::NotFound { .. }));
    /// ```
    pub fn not_found<S: Into<String>>(resource_type: S, name: S) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new validation error with a source error.
    pub fn validation_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Validation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libharbor::error::HarborError;
    ///
    /// let err = HarborError::config("both password and token configured", Some("/etc/harbor.yaml"));
    /// assert!(matches!(err, HarborError::Config { .. }));
    /// ```
    pub fn config<S: Into<String>>(message: S, path: Option<S>) -> Self {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the HTTP status of a server-reported failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Distribution { status, .. } => Some(*status),
            Self::Bootstrap { source } => source.status(),
            _ => None,
        }
    }

    /// Returns true when the failure means the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Api { status, .. } | Self::Distribution { status, .. } => *status == 404,
            _ => false,
        }
    }
}

impl From<config::ConfigError> for HarborError {
    fn from(err: config::ConfigError) -> Self {
        HarborError::config_with_source("Configuration error", None, err)
    }
}
