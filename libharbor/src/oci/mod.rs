//! OCI specification data structures.
//!
//! Image types are re-exported from the `oci-spec` crate. The distribution
//! wire types (tag lists, error bodies, manifest metadata) are defined here so
//! that registries returning vendor-specific error codes or a `null` tag list
//! still decode.

pub use oci_spec::image::{Descriptor, ImageConfiguration, ImageIndex, ImageManifest, Platform};

use crate::error::{HarborError, Result};
use serde::{Deserialize, Serialize};

/// Manifest media types accepted when fetching a manifest.
pub const MANIFEST_ACCEPT: &str = "application/vnd.oci.image.manifest.v1+json, \
     application/vnd.oci.image.index.v1+json, \
     application/vnd.docker.distribution.manifest.v2+json, \
     application/vnd.docker.distribution.manifest.list.v2+json";

/// Response of `GET /v2/<name>/tags/list`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagList {
    /// Repository name.
    pub name: String,
    /// Tags, empty when the registry answers `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

/// One page of a paginated tag listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagPage {
    /// Repository name.
    pub name: String,
    /// Tags on this page.
    pub tags: Vec<String>,
    /// Path of the next page, from the `Link` header.
    pub next: Option<String>,
}

/// Error body defined by the Distribution Spec: `{"errors": [...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DistributionErrors {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<DistributionErrorInfo>,
}

/// A single entry of a Distribution Spec error body.
///
/// `code` is kept as a string: registries extend the standard code list
/// (`MANIFEST_UNKNOWN`, `NAME_UNKNOWN`, `UNAUTHORIZED`, `DENIED`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionErrorInfo {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

/// Manifest metadata returned by `HEAD /v2/<name>/manifests/<reference>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestInfo {
    /// Value of `Docker-Content-Digest`.
    pub digest: Option<String>,
    /// Value of `Content-Type`.
    pub media_type: Option<String>,
    /// Value of `Content-Length`.
    pub size: Option<u64>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A manifest body as returned by the registry: a single-platform image
/// manifest or a multi-platform index.
#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum ManifestOrIndex {
    Manifest(ImageManifest),
    Index(ImageIndex),
}

impl ManifestOrIndex {
    /// Decodes manifest bytes, choosing the shape from `mediaType` and, when
    /// that is absent, from the fields present.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| HarborError::decode_with_source("Failed to parse manifest JSON", e))?;

        let media_type = value
            .get("mediaType")
            .and_then(|v| v.as_str())
            .unwrap_or("");

        let is_index = if media_type.contains("index") || media_type.contains("list") {
            true
        } else if media_type.contains("manifest") {
            false
        } else if value.get("manifests").is_some() {
            true
        } else if value.get("layers").is_some() || value.get("config").is_some() {
            false
        } else {
            return Err(HarborError::decode(
                "Unable to determine if content is a manifest or index",
            ));
        };

        if is_index {
            serde_json::from_value(value)
                .map(ManifestOrIndex::Index)
                .map_err(|e| HarborError::decode_with_source("Failed to parse image index", e))
        } else {
            serde_json::from_value(value)
                .map(ManifestOrIndex::Manifest)
                .map_err(|e| HarborError::decode_with_source("Failed to parse image manifest", e))
        }
    }

    /// Returns true if this is a multi-platform index.
    pub fn is_index(&self) -> bool {
        matches!(self, ManifestOrIndex::Index(_))
    }

    /// Returns the manifest if this is a single-platform image.
    pub fn as_manifest(&self) -> Option<&ImageManifest> {
        match self {
            ManifestOrIndex::Manifest(m) => Some(m),
            ManifestOrIndex::Index(_) => None,
        }
    }

    /// Returns the index if this is a multi-platform image.
    pub fn as_index(&self) -> Option<&ImageIndex> {
        match self {
            ManifestOrIndex::Manifest(_) => None,
            ManifestOrIndex::Index(i) => Some(i),
        }
    }
}
