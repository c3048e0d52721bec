//! Typed Harbor resource operations.
//!
//! Each submodule adds methods to [`crate::client::Client`] for one resource
//! family. All paths are relative to `/api/v2.0`.

pub mod artifact;
pub mod audit;
pub mod icon;
pub mod label;
pub mod project;
pub mod repository;
pub mod scan;
pub mod system;

use serde::{Deserialize, Deserializer};


/// Encodes one path segment.
///
/// Harbor expects slashes inside a repository name to be percent-encoded
/// twice: `team/app` becomes `team%252Fapp`.
pub(crate) fn segment(value: &str) -> String {
    value.replace('/', "%252F")
}

/// `/projects/{project}/repositories/{repository}`
pub(crate) fn repository_path(project: &str, repository: &str) -> String {
    format!(
        "/projects/{}/repositories/{}",
        segment(project),
        segment(repository)
    )
}

/// `/projects/{project}/repositories/{repository}/artifacts/{reference}`
pub(crate) fn artifact_path(project: &str, repository: &str, reference: &str) -> String {
    format!(
        "{}/artifacts/{}",
        repository_path(project, repository),
        segment(reference)
    )
}

/// Deserializes `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
