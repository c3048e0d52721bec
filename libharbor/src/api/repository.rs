//! Repository endpoints.

use super::{repository_path, segment};
use crate::body::RequestBody;
use crate::client::Client;
use crate::error::{HarborError, Result};
use crate::pagination::{ListOptions, Page, QueryBuilder};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// A repository. `name` includes the project, e.g. `library/nginx`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

impl Repository {
    /// Repository name with the `project/` prefix removed.
    pub fn name_in_project<'a>(&'a self, project: &str) -> &'a str {
        self.name
            .strip_prefix(project)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(&self.name)
    }
}

impl Client {
    /// `GET /projects/{project}/repositories`
    pub async fn list_repositories(&self, project: &str, options: &ListOptions) -> Result<Page<Repository>> {
        let mut query = QueryBuilder::new();
        options.append_to(&mut query);
        let path = query.apply_to(&format!("/projects/{}/repositories", segment(project)));
        self.get_page(&path).await
    }

    /// `GET /projects/{project}/repositories/{repository}`
    pub async fn get_repository(&self, project: &str, repository: &str) -> Result<Repository> {
        self.get_json(&repository_path(project, repository)).await
    }

    /// `PUT /projects/{project}/repositories/{repository}`
    ///
    /// The target is taken from `repository.name`, with or without the
    /// project prefix.
    pub async fn update_repository(&self, project: &str, repository: &Repository) -> Result<()> {
        let name = repository.name_in_project(project);
        if name.is_empty() {
            return Err(HarborError::validation("Repository name is required"));
        }
        self.send(
            Method::PUT,
            &repository_path(project, name),
            RequestBody::json(repository)?,
        )
        .await
    }

    /// `DELETE /projects/{project}/repositories/{repository}`
    pub async fn delete_repository(&self, project: &str, repository: &str) -> Result<()> {
        self.send(
            Method::DELETE,
            &repository_path(project, repository),
            RequestBody::Empty,
        )
        .await
    }
}
