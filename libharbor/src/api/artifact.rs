//! Artifact and tag endpoints.

use super::{artifact_path, null_as_default, repository_path, segment};
use crate::api::label::Label;
use crate::body::RequestBody;
use crate::client::Client;
use crate::error::Result;
use crate::pagination::{ListOptions, Page, QueryBuilder};
use crate::reference::ImageReference;
use chrono::{DateTime, Utc};
use reqwest::Method;
use reqwest::header::LOCATION;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// An artifact (image, chart, or other OCI content).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<String>,
    #[serde(default)]
    pub digest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_attrs: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub references: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub addition_links: HashMap<String, AdditionLink>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<Label>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scan_overview: HashMap<String, serde_json::Value>,
}

/// Link to an addition of an artifact (build history, chart values, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdditionLink {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub absolute: bool,
}

/// A tag attached to an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immutable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed: Option<bool>,
}

impl Tag {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A Helm chart dependency.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartDependency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Vulnerability reports keyed by report MIME type.
pub type Vulnerabilities = HashMap<String, serde_json::Value>;

/// Result of [`Client::copy_artifact`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopyArtifactResponse {
    /// `Location` of the copied artifact.
    pub location: Option<String>,
}

/// Kinds of artifact additions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addition {
    BuildHistory,
    Values,
    Readme,
    Dependencies,
    Vulnerabilities,
}

impl Addition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Addition::BuildHistory => "build_history",
            Addition::Values => "values.yaml",
            Addition::Readme => "readme.md",
            Addition::Dependencies => "dependencies",
            Addition::Vulnerabilities => "vulnerabilities",
        }
    }
}

impl fmt::Display for Addition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which related data to include with an artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetArtifactOptions {
    pub with_tag: bool,
    pub with_scan_overview: bool,
    pub with_label: bool,
    pub with_immutable_status: bool,
    pub with_signature: bool,
}

impl GetArtifactOptions {
    fn append_to(&self, query: &mut QueryBuilder) {
        query
            .push("with_tag", self.with_tag)
            .push("with_scan_overview", self.with_scan_overview)
            .push("with_label", self.with_label)
            .push("with_immutable_status", self.with_immutable_status)
            .push("with_signature", self.with_signature);
    }
}

/// Options of `GET .../artifacts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArtifactsOptions {
    pub list: ListOptions,
    pub artifact: GetArtifactOptions,
}

/// Options of `GET .../artifacts/{reference}/tags`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTagsOptions {
    pub list: ListOptions,
    pub with_immutable_status: bool,
    pub with_signature: bool,
}

impl Client {
    /// `GET /projects/{project}/repositories/{repository}/artifacts`
    pub async fn list_artifacts(
        &self,
        project: &str,
        repository: &str,
        options: &ListArtifactsOptions,
    ) -> Result<Page<Artifact>> {
        let mut query = QueryBuilder::new();
        options.list.append_to(&mut query);
        options.artifact.append_to(&mut query);
        let path = query.apply_to(&format!("{}/artifacts", repository_path(project, repository)));
        self.get_page(&path).await
    }

    /// `GET /projects/{project}/repositories/{repository}/artifacts/{reference}`
    pub async fn get_artifact(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        options: &GetArtifactOptions,
    ) -> Result<Artifact> {
        let mut query = QueryBuilder::new();
        options.append_to(&mut query);
        let path = query.apply_to(&artifact_path(project, repository, reference));
        self.get_json(&path).await
    }

    /// Looks up an artifact by image coordinate, e.g.
    /// `harbor.example.com/library/nginx:alpine`.
    ///
    /// The domain is ignored; the coordinate must name a project, a
    /// repository and a tag or digest.
    pub async fn get_artifact_by_image(&self, image: &str, options: &GetArtifactOptions) -> Result<Artifact> {
        let reference = ImageReference::parse_coordinate(image)?;
        debug!(image, project = reference.project(), repository = reference.repository(), "Resolved image coordinate");
        self.get_artifact(
            reference.project(),
            reference.repository(),
            reference.reference(),
            options,
        )
        .await
    }

    /// `DELETE /projects/{project}/repositories/{repository}/artifacts/{reference}`
    pub async fn delete_artifact(&self, project: &str, repository: &str, reference: &str) -> Result<()> {
        self.send(
            Method::DELETE,
            &artifact_path(project, repository, reference),
            RequestBody::Empty,
        )
        .await
    }

    /// `POST /projects/{project}/repositories/{repository}/artifacts?from=`
    ///
    /// `from` is `project/repository:tag` or `project/repository@digest`.
    pub async fn copy_artifact(&self, project: &str, repository: &str, from: &str) -> Result<CopyArtifactResponse> {
        let mut query = QueryBuilder::new();
        query.push("from", from);
        let path = query.apply_to(&format!("{}/artifacts", repository_path(project, repository)));

        let headers = self
            .send_with_headers(Method::POST, &path, RequestBody::Empty)
            .await?;
        Ok(CopyArtifactResponse {
            location: headers
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string()),
        })
    }

    /// `GET .../artifacts/{reference}/additions/{addition}`, raw body.
    pub async fn get_artifact_addition(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        addition: Addition,
    ) -> Result<Vec<u8>> {
        let path = format!("{}/additions/{}", artifact_path(project, repository, reference), addition);
        self.get_bytes(&path).await
    }

    /// The vulnerabilities addition, decoded.
    pub async fn get_artifact_vulnerabilities(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
    ) -> Result<Vulnerabilities> {
        let path = format!(
            "{}/additions/{}",
            artifact_path(project, repository, reference),
            Addition::Vulnerabilities
        );
        self.get_json(&path).await
    }

    /// The chart dependencies addition, decoded.
    pub async fn get_artifact_dependencies(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
    ) -> Result<Vec<ChartDependency>> {
        let path = format!(
            "{}/additions/{}",
            artifact_path(project, repository, reference),
            Addition::Dependencies
        );
        self.get_json(&path).await
    }

    /// `POST .../artifacts/{reference}/tags`
    pub async fn create_artifact_tag(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        tag: &Tag,
    ) -> Result<()> {
        let path = format!("{}/tags", artifact_path(project, repository, reference));
        self.send(Method::POST, &path, RequestBody::json(tag)?)
            .await
    }

    /// `GET .../artifacts/{reference}/tags`
    pub async fn list_artifact_tags(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        options: &ListTagsOptions,
    ) -> Result<Page<Tag>> {
        let mut query = QueryBuilder::new();
        options.list.append_to(&mut query);
        query
            .push("with_signature", options.with_signature)
            .push("with_immutable_status", options.with_immutable_status);
        let path = query.apply_to(&format!("{}/tags", artifact_path(project, repository, reference)));
        self.get_page(&path).await
    }

    /// `DELETE .../artifacts/{reference}/tags/{tag}`
    pub async fn delete_artifact_tag(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        tag: &str,
    ) -> Result<()> {
        let path = format!(
            "{}/tags/{}",
            artifact_path(project, repository, reference),
            segment(tag)
        );
        self.send(Method::DELETE, &path, RequestBody::Empty).await
    }
}
