//! Project endpoints.

use super::{null_as_default, segment};
use crate::api::audit::AuditLog;
use crate::body::RequestBody;
use crate::client::Client;
use crate::error::Result;
use crate::pagination::{ListOptions, Page, QueryBuilder};
use chrono::{DateTime, Utc};
use reqwest::Method;
use reqwest::header::LOCATION;
use serde::{Deserialize, Serialize};

/// A project as returned by the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub togglable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user_role_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_user_role_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProjectMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cve_allowlist: Option<serde_json::Value>,
}

/// Project metadata. Harbor encodes booleans here as the strings `"true"`/`"false"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_content_trust: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevent_vul: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reuse_sys_cve_allowlist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_id: Option<String>,
}

/// Body of project creation and update calls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectReq {
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProjectMetadata>,
    /// Quota in bytes, `-1` for unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_limit: Option<i64>,
    /// Upstream registry of a proxy-cache project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<i64>,
}

impl ProjectReq {
    pub fn new<S: Into<String>>(project_name: S) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    pub fn with_storage_limit(mut self, bytes: i64) -> Self {
        self.storage_limit = Some(bytes);
        self
    }
}

/// Counts and quota of a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectSummary {
    #[serde(default)]
    pub repo_count: i64,
    #[serde(default)]
    pub project_admin_count: i64,
    #[serde(default)]
    pub maintainer_count: i64,
    #[serde(default)]
    pub developer_count: i64,
    #[serde(default)]
    pub guest_count: i64,
    #[serde(default)]
    pub limited_guest_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<serde_json::Value>,
}

/// Whether a project can be deleted, and why not.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectDeletable {
    #[serde(default)]
    pub deletable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Filters of `GET /projects`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProjectsOptions {
    pub list: ListOptions,
    pub name: Option<String>,
    pub public: Option<bool>,
    pub owner: Option<String>,
    pub with_detail: Option<bool>,
}

impl ListProjectsOptions {
    fn to_query(&self) -> QueryBuilder {
        let mut query = QueryBuilder::new();
        self.list.append_to(&mut query);
        query
            .push_opt("name", self.name.as_deref())
            .push_opt("public", self.public)
            .push_opt("owner", self.owner.as_deref())
            .push_opt("with_detail", self.with_detail);
        query
    }
}

impl Client {
    /// `GET /projects`
    pub async fn list_projects(&self, options: &ListProjectsOptions) -> Result<Page<Project>> {
        let path = options.to_query().apply_to("/projects");
        self.get_page(&path).await
    }

    /// `POST /projects`, returning the `Location` of the new project.
    pub async fn create_project(&self, project: &ProjectReq) -> Result<Option<String>> {
        let headers = self
            .send_with_headers(Method::POST, "/projects", RequestBody::json(project)?)
            .await?;
        Ok(headers
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()))
    }

    /// `GET /projects/{name_or_id}`
    pub async fn get_project(&self, name_or_id: &str) -> Result<Project> {
        self.get_json(&format!("/projects/{}", segment(name_or_id)))
            .await
    }

    /// `HEAD /projects?project_name=`: true when the project exists.
    pub async fn head_project(&self, name: &str) -> Result<bool> {
        let mut query = QueryBuilder::new();
        query.push("project_name", name);
        let path = query.apply_to("/projects");

        match self.send(Method::HEAD, &path, RequestBody::Empty).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// `PUT /projects/{name_or_id}`
    pub async fn update_project(&self, name_or_id: &str, project: &ProjectReq) -> Result<()> {
        self.send(
            Method::PUT,
            &format!("/projects/{}", segment(name_or_id)),
            RequestBody::json(project)?,
        )
        .await
    }

    /// `DELETE /projects/{name_or_id}`
    pub async fn delete_project(&self, name_or_id: &str) -> Result<()> {
        self.send(
            Method::DELETE,
            &format!("/projects/{}", segment(name_or_id)),
            RequestBody::Empty,
        )
        .await
    }

    /// `GET /projects/{name_or_id}/summary`
    pub async fn get_project_summary(&self, name_or_id: &str) -> Result<ProjectSummary> {
        self.get_json(&format!("/projects/{}/summary", segment(name_or_id)))
            .await
    }

    /// `GET /projects/{name_or_id}/_deletable`
    pub async fn get_project_deletable(&self, name_or_id: &str) -> Result<ProjectDeletable> {
        self.get_json(&format!("/projects/{}/_deletable", segment(name_or_id)))
            .await
    }

    /// `GET /projects/{name}/logs`
    pub async fn list_project_logs(&self, name: &str, options: &ListOptions) -> Result<Page<AuditLog>> {
        let mut query = QueryBuilder::new();
        options.append_to(&mut query);
        let path = query.apply_to(&format!("/projects/{}/logs", segment(name)));
        self.get_page(&path).await
    }
}
